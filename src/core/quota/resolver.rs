//! Display price resolution
//!
//! Resolves the per-unit price shown next to a usage record from the
//! model's base ratio and the user's group multiplier. Token-billed
//! ratios are stored per-thousand and displayed per-million, hence the
//! extra x1000 before the USD conversion.

use super::calculator::apply_group_discount;
use super::types::BillingType;
use super::{PRICE_SCALE, ROUNDING, USD_PER_QUOTA_UNIT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Resolve the display unit price for a ratio under a group multiplier.
///
/// For `BillingType::Tokens` the result is a per-million-token USD
/// price; for `BillingType::Fixed` it is the flat per-call USD price.
/// Formatted to at most [`PRICE_SCALE`] decimals with trailing zeros
/// trimmed; a zero ratio or group multiplier yields exactly `"0"`.
pub fn resolve_display_price(
    ratio: Decimal,
    group_ratio: Decimal,
    billing_type: BillingType,
) -> String {
    let mut effective = apply_group_discount(ratio, group_ratio);

    if billing_type == BillingType::Tokens {
        effective *= dec!(1000);
    }

    format_price(effective * USD_PER_QUOTA_UNIT)
}

/// Format a USD price: round to [`PRICE_SCALE`] decimals, trim trailing
/// zeros, drop the decimal point for integral values.
pub(crate) fn format_price(price: Decimal) -> String {
    price
        .round_dp_with_strategy(PRICE_SCALE, ROUNDING)
        .normalize()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_million_price_chain() {
        // 2.5 * 1.0 * 1000 * 0.002 = 5.000000 -> "5"
        assert_eq!(
            resolve_display_price(dec!(2.5), dec!(1), BillingType::Tokens),
            "5"
        );
    }

    #[test]
    fn test_group_discount_applied() {
        // 0.35 * 0.8 * 1000 * 0.002 = 0.56
        assert_eq!(
            resolve_display_price(dec!(0.35), dec!(0.8), BillingType::Tokens),
            "0.56"
        );
    }

    #[test]
    fn test_fixed_billing_skips_per_million_scale() {
        // 5 * 1 * 0.002 = 0.01 per call
        assert_eq!(
            resolve_display_price(dec!(5), dec!(1), BillingType::Fixed),
            "0.01"
        );
    }

    #[test]
    fn test_zero_ratio_renders_bare_zero() {
        assert_eq!(
            resolve_display_price(Decimal::ZERO, dec!(1), BillingType::Tokens),
            "0"
        );
        assert_eq!(
            resolve_display_price(dec!(2.5), Decimal::ZERO, BillingType::Tokens),
            "0"
        );
    }

    #[test]
    fn test_trailing_zero_trim_keeps_significant_digits() {
        // 0.0625 * 1 * 1000 * 0.002 = 0.125
        assert_eq!(
            resolve_display_price(dec!(0.0625), dec!(1), BillingType::Tokens),
            "0.125"
        );
    }

    #[test]
    fn test_sub_cent_precision() {
        // 0.0001 * 1 * 1000 * 0.002 = 0.0000002 -> rounds away from zero
        assert_eq!(format_price(dec!(0.0000002)), "0");
        assert_eq!(format_price(dec!(0.0000005)), "0.000001");
    }
}
