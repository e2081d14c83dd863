//! Type definitions for quota computation
//!
//! These mirror the backend's usage-log JSON. Records are created
//! server-side at request completion and are immutable afterwards; this
//! crate only reads them and derives display values. Every field is
//! optional-tolerant so that legacy or partially populated records still
//! deserialize and render.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a model is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    /// Proportional to token count; ratios are per-thousand-token
    /// multipliers, displayed as per-million prices
    #[default]
    Tokens,
    /// Flat amount per call regardless of token count (backend name:
    /// "times")
    #[serde(rename = "times")]
    Fixed,
}

/// Pricing snapshot attached to a usage record at billing time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioMetadata {
    /// Base per-unit price multiplier for prompt tokens
    pub input_ratio: Option<Decimal>,
    /// Base per-unit price multiplier for completion tokens
    pub output_ratio: Option<Decimal>,
    /// Per-category multipliers for extra token categories; an absent
    /// key means that category was free
    pub extra_ratios: HashMap<String, Decimal>,
    /// Billing-group discount multiplier (1 = none, <1 = discount,
    /// >1 = surcharge)
    pub group_ratio: Option<Decimal>,
    /// Display label for the billing group
    pub group_name: Option<String>,
    /// Billing mode for this record
    pub billing_type: BillingType,
    /// Pre-formatted effective input price, used verbatim when present
    pub input_price: Option<String>,
    /// Pre-formatted effective output price, used verbatim when present
    pub output_price: Option<String>,
    /// Pre-formatted undiscounted input price
    pub input_price_origin: Option<String>,
    /// Pre-formatted undiscounted output price
    pub output_price_origin: Option<String>,
    /// Pre-discount quota stored by newer backends
    pub original_quota: Option<i64>,
    /// Pre-discount quota under its legacy field name
    pub origin_quota: Option<i64>,
}

impl RatioMetadata {
    /// Pre-supplied original quota, resolved through the explicit
    /// fallback chain: `original_quota`, then the legacy `origin_quota`.
    pub fn original_quota_hint(&self) -> Option<i64> {
        self.original_quota.or(self.origin_quota)
    }
}

/// One billing event as returned by the backend log API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRecord {
    /// Actual billed amount in raw quota units
    pub quota: i64,
    /// Prompt token count
    pub prompt_tokens: i64,
    /// Completion token count
    pub completion_tokens: i64,
    /// Additional token categories (cached, audio, reasoning, ...)
    pub extra_tokens: HashMap<String, i64>,
    /// Pricing context captured when the record was created
    pub metadata: Option<RatioMetadata>,
}

impl UsageRecord {
    /// Total primary tokens (prompt + completion)
    pub fn total_tokens(&self) -> i64 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "quota": 1200,
            "prompt_tokens": 1000,
            "completion_tokens": 200,
            "metadata": {
                "input_ratio": 2.5,
                "output_ratio": 10,
                "group_ratio": 0.8,
                "group_name": "vip",
                "billing_type": "tokens"
            }
        }"#;

        let record: UsageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.quota, 1200);
        assert_eq!(record.total_tokens(), 1200);

        let meta = record.metadata.unwrap();
        assert_eq!(meta.input_ratio, Some(dec!(2.5)));
        assert_eq!(meta.group_ratio, Some(dec!(0.8)));
        assert_eq!(meta.billing_type, BillingType::Tokens);
        assert_eq!(meta.group_name.as_deref(), Some("vip"));
    }

    #[test]
    fn test_partial_record_deserialization() {
        // Legacy records may carry almost nothing
        let record: UsageRecord = serde_json::from_str(r#"{"quota": 5}"#).unwrap();
        assert_eq!(record.quota, 5);
        assert_eq!(record.prompt_tokens, 0);
        assert!(record.metadata.is_none());
        assert!(record.extra_tokens.is_empty());
    }

    #[test]
    fn test_billing_type_times_alias() {
        let meta: RatioMetadata =
            serde_json::from_str(r#"{"billing_type": "times"}"#).unwrap();
        assert_eq!(meta.billing_type, BillingType::Fixed);

        // Round-trips back to the backend name
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""billing_type":"times""#));
    }

    #[test]
    fn test_original_quota_hint_order() {
        let meta = RatioMetadata {
            original_quota: Some(300),
            origin_quota: Some(200),
            ..Default::default()
        };
        assert_eq!(meta.original_quota_hint(), Some(300));

        let meta = RatioMetadata {
            origin_quota: Some(200),
            ..Default::default()
        };
        assert_eq!(meta.original_quota_hint(), Some(200));

        assert_eq!(RatioMetadata::default().original_quota_hint(), None);
    }
}
