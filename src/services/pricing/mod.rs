//! Administrative price table management
//!
//! Bulk price import is a destructive operation: a malformed payload
//! must abort loudly instead of silently corrupting pricing data, which
//! is why this path returns errors while the display paths never do.

pub mod service;
pub mod types;


pub use service::PricingService;
pub use types::{ModelPrice, PriceUpdateMode};
