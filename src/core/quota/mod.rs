//! Quota and cost computation
//!
//! Converts usage records (token counts plus the pricing snapshot taken
//! at billing time) into billed quota amounts, pre-discount amounts and
//! display strings.
//!
//! ## Design
//! - Single source of truth for the ratio -> price chain
//! - All money arithmetic in `Decimal`; rounding happens once, at the
//!   presentation step, with the strategy defined below
//! - Display functions degrade to `"0"` on missing data instead of failing

pub mod calculator;
pub mod formatter;
pub mod resolver;
pub mod types;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

// Re-export main types and functions
pub use calculator::{
    apply_group_discount, compute_original_quota, compute_usage_quota, saved_percent,
    step_breakdown,
};
pub use formatter::{render_compact, QuotaFormatter};
pub use resolver::resolve_display_price;
pub use types::{BillingType, RatioMetadata, UsageRecord};

/// USD value of one quota unit: $0.002 per 1K tokens at ratio 1.
pub const USD_PER_QUOTA_UNIT: Decimal = dec!(0.002);

/// Decimal places used for fine-grained price display.
pub const PRICE_SCALE: u32 = 6;

/// Rounding applied at every presentation step. Half-away-from-zero,
/// so $0.0000005 rounds up to $0.000001 rather than to even.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;
