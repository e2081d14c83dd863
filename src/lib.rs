//! # Quota Engine
//!
//! Quota and cost computation for an AI gateway: turns usage records
//! (token counts plus the pricing snapshot captured at billing time)
//! into billed amounts, pre-discount amounts and display strings, and
//! folds usage batches into chartable time series.
//!
//! ## Features
//!
//! - **Ratio-based pricing**: per-thousand ratios composed with group
//!   discounts, displayed as per-million USD prices
//! - **Decimal money arithmetic**: `rust_decimal` end to end, with one
//!   central rounding strategy; no binary floats on billing paths
//! - **Graceful degradation**: display functions never fail on
//!   partially populated or legacy records
//! - **Date-bucketed aggregation**: zero-filled, index-aligned series
//!   for analytics dashboards
//! - **Administrative price sync**: bulk import with strict payload
//!   validation
//!
//! ## Quick Start
//!
//! ```
//! use quota_engine::{
//!     compute_original_quota, resolve_display_price, BillingConfig, BillingType,
//!     QuotaFormatter, RatioMetadata, UsageRecord,
//! };
//! use rust_decimal_macros::dec;
//!
//! // Session-scoped conversion factor, injected once
//! let config = BillingConfig::default();
//! let formatter = QuotaFormatter::new(&config);
//! assert_eq!(formatter.render(1_000_000, 2), "2.00");
//!
//! // Effective per-million price for a discounted group
//! let price = resolve_display_price(dec!(2.5), dec!(1), BillingType::Tokens);
//! assert_eq!(price, "5");
//!
//! // Reconstruct the pre-discount quota of a billed record
//! let record = UsageRecord {
//!     quota: 100,
//!     metadata: Some(RatioMetadata {
//!         group_ratio: Some(dec!(0.5)),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//! assert_eq!(compute_original_quota(&record), dec!(200));
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::{BillingConfig, DEFAULT_QUOTA_PER_UNIT};
pub use utils::error::{QuotaError, Result};

// Export quota computation
pub use core::quota::{
    apply_group_discount, compute_original_quota, compute_usage_quota, render_compact,
    resolve_display_price, saved_percent, step_breakdown, BillingType, QuotaFormatter,
    RatioMetadata, UsageRecord, PRICE_SCALE, ROUNDING, USD_PER_QUOTA_UNIT,
};

// Export aggregation
pub use core::analytics::{
    average_series, date_buckets, DailyUsageReport, MetricSeries, TimeSeries, UsageAggregator,
    UsageSummary,
};

// Export the administrative pricing service
pub use services::pricing::{ModelPrice, PriceUpdateMode, PricingService};
