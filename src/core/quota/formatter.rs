//! Quota rendering
//!
//! Converts raw integer quota units into display currency using the
//! session's `quota_per_unit` conversion factor. The factor is injected
//! once at construction and never re-read.

use crate::config::{BillingConfig, DEFAULT_QUOTA_PER_UNIT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ROUNDING;

/// Renders raw quota units as currency strings
#[derive(Debug, Clone)]
pub struct QuotaFormatter {
    quota_per_unit: Decimal,
}

impl QuotaFormatter {
    /// Create a formatter from the session configuration. A
    /// non-positive conversion factor falls back to the default unit so
    /// rendering can never divide by zero.
    pub fn new(config: &BillingConfig) -> Self {
        let quota_per_unit = if config.quota_per_unit > Decimal::ZERO {
            config.quota_per_unit
        } else {
            DEFAULT_QUOTA_PER_UNIT
        };
        Self { quota_per_unit }
    }

    /// The conversion factor this formatter was built with
    pub fn quota_per_unit(&self) -> Decimal {
        self.quota_per_unit
    }

    /// Unrounded USD value of a raw quota amount
    pub fn to_usd(&self, quota: i64) -> Decimal {
        Decimal::from(quota) / self.quota_per_unit
    }

    /// Render a raw quota amount to a fixed number of decimal places:
    /// `render(1_000_000, 2)` at the default unit yields `"2.00"`.
    pub fn render(&self, quota: i64, decimals: u32) -> String {
        let value = self.to_usd(quota).round_dp_with_strategy(decimals, ROUNDING);
        format!("{:.*}", decimals as usize, value)
    }

    /// Render an optional quota amount, treating a missing value as 0
    pub fn render_opt(&self, quota: Option<i64>, decimals: u32) -> String {
        self.render(quota.unwrap_or(0), decimals)
    }

    /// Inverse conversion: how many raw quota units a currency amount
    /// is worth, rounded to a whole unit.
    pub fn quota_from_money(&self, money: Decimal) -> Decimal {
        (money * self.quota_per_unit).round_dp_with_strategy(0, ROUNDING)
    }
}

impl Default for QuotaFormatter {
    fn default() -> Self {
        Self::new(&BillingConfig::default())
    }
}

/// Compact human display for large counts: `1234` -> `1234`,
/// `12_500` -> `12.5k`, `3_400_000` -> `3.4M`, `2_100_000_000` -> `2.1B`.
pub fn render_compact(n: i64) -> String {
    let value = Decimal::from(n);
    if n >= 1_000_000_000 {
        format!("{:.1}B", (value / dec!(1000000000)).round_dp_with_strategy(1, ROUNDING))
    } else if n >= 1_000_000 {
        format!("{:.1}M", (value / dec!(1000000)).round_dp_with_strategy(1, ROUNDING))
    } else if n >= 10_000 {
        format!("{:.1}k", (value / dec!(1000)).round_dp_with_strategy(1, ROUNDING))
    } else {
        n.to_string()
    }
}
