//! Stateful services built on top of the core computation modules

pub mod pricing;

pub use pricing::{ModelPrice, PriceUpdateMode, PricingService};
