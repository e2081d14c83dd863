//! Cost calculation
//!
//! Forward path: token counts x per-category ratios -> billed quota.
//! Inverse path: reconstruct the pre-discount quota from the billed
//! quota and the group multiplier when the backend did not store it.

use super::formatter::QuotaFormatter;
use super::resolver::resolve_display_price;
use super::types::{BillingType, RatioMetadata, UsageRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Compose a base ratio with a group multiplier. Pure multiplication,
/// no rounding; rounding happens only at display time.
pub fn apply_group_discount(base_ratio: Decimal, group_ratio: Decimal) -> Decimal {
    base_ratio * group_ratio
}

/// Reconstruct the pre-discount quota for a single record.
///
/// The backend does not always store the original amount, so it is
/// derived as `quota / group_ratio`. When the group multiplier is
/// absent or zero, or the billed quota is zero, the pre-supplied
/// metadata value is used instead (zero if none). Never panics and
/// never produces a non-finite value.
///
/// Only valid for one record at a time: the group multiplier must be
/// the one in effect when that record was billed, so this must not be
/// applied to summed or aggregated quotas.
pub fn compute_original_quota(record: &UsageRecord) -> Decimal {
    let fallback = record
        .metadata
        .as_ref()
        .and_then(RatioMetadata::original_quota_hint)
        .map(Decimal::from)
        .unwrap_or(Decimal::ZERO);

    let group_ratio = match record.metadata.as_ref().and_then(|m| m.group_ratio) {
        Some(ratio) if !ratio.is_zero() => ratio,
        _ => return fallback,
    };

    if record.quota == 0 {
        return fallback;
    }

    let original = Decimal::from(record.quota) / group_ratio;
    if original.is_zero() {
        fallback
    } else {
        original
    }
}

/// Percentage saved by the group discount, for the detail-row badge:
/// `(1 - quota / original) * 100`, rounded to whole percent. `None`
/// unless both the billed and pre-discount quotas are positive, so
/// degraded records show no badge rather than a bogus figure.
pub fn saved_percent(record: &UsageRecord) -> Option<Decimal> {
    let original = compute_original_quota(record);
    if record.quota <= 0 || original <= Decimal::ZERO {
        return None;
    }
    let saved = (Decimal::ONE - Decimal::from(record.quota) / original) * dec!(100);
    Some(saved.round_dp_with_strategy(0, super::ROUNDING))
}

/// Forward cost computation: the quota a record should have been billed
/// given its token counts and pricing snapshot.
///
/// Token-billed records cost the per-category sum of `tokens x ratio`,
/// discounted by the group multiplier. Extra categories with no
/// matching ratio are free; ratios with no matching count are ignored.
/// Fixed-billed records cost a flat `(input + output) x 1000` units per
/// call, discounted the same way.
pub fn compute_usage_quota(record: &UsageRecord) -> Decimal {
    let Some(meta) = record.metadata.as_ref() else {
        return Decimal::ZERO;
    };

    let group_ratio = meta.group_ratio.unwrap_or(Decimal::ONE);
    let input_ratio = meta.input_ratio.unwrap_or(Decimal::ZERO);
    let output_ratio = meta.output_ratio.unwrap_or(Decimal::ZERO);

    match meta.billing_type {
        BillingType::Fixed => (input_ratio + output_ratio) * dec!(1000) * group_ratio,
        BillingType::Tokens => {
            let mut units = Decimal::from(record.prompt_tokens.max(0)) * input_ratio
                + Decimal::from(record.completion_tokens.max(0)) * output_ratio;

            for (category, count) in &record.extra_tokens {
                if let Some(ratio) = meta.extra_ratios.get(category) {
                    units += Decimal::from((*count).max(0)) * *ratio;
                }
            }

            units * group_ratio
        }
    }
}

/// Effective (group-discounted) per-million input price for display,
/// preferring the pre-formatted metadata string when present.
fn effective_price(
    preformatted: Option<&String>,
    ratio: Option<Decimal>,
    group_ratio: Decimal,
) -> String {
    if let Some(price) = preformatted {
        return price.clone();
    }
    match ratio {
        Some(ratio) if !ratio.is_zero() => {
            format!(
                "${}",
                resolve_display_price(ratio, group_ratio, BillingType::Tokens)
            )
        }
        _ => "$0".to_string(),
    }
}

/// Human-readable derivation of a record's billed amount:
/// `"(prompt / 1,000,000 * $in) + (completion / 1,000,000 * $out) = $total"`.
/// The completion term is omitted entirely when there are no
/// completion tokens.
pub fn step_breakdown(record: &UsageRecord, formatter: &QuotaFormatter) -> String {
    let meta = record.metadata.as_ref();
    let group_ratio = meta
        .and_then(|m| m.group_ratio)
        .filter(|ratio| !ratio.is_zero())
        .unwrap_or(Decimal::ONE);

    let input_price = effective_price(
        meta.and_then(|m| m.input_price.as_ref()),
        meta.and_then(|m| m.input_ratio),
        group_ratio,
    );
    let output_price = effective_price(
        meta.and_then(|m| m.output_price.as_ref()),
        meta.and_then(|m| m.output_ratio),
        group_ratio,
    );

    let prompt_tokens = record.prompt_tokens.max(0);
    let completion_tokens = record.completion_tokens.max(0);

    let mut step = format!("({} / 1,000,000 * {})", prompt_tokens, input_price);
    if completion_tokens > 0 {
        step.push_str(&format!(
            " + ({} / 1,000,000 * {})",
            completion_tokens, output_price
        ));
    }
    step.push_str(&format!(" = ${}", formatter.render(record.quota, 6)));
    step
}
