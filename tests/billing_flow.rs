//! End-to-end billing flow tests: raw usage record through price
//! resolution, cost derivation, rendering and aggregation.

use chrono::NaiveDate;
use quota_engine::{
    compute_original_quota, resolve_display_price, saved_percent, step_breakdown, BillingConfig,
    BillingType,
    PriceUpdateMode, PricingService, QuotaError, QuotaFormatter, RatioMetadata, UsageAggregator,
    UsageRecord, UsageSummary,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn sample_record() -> UsageRecord {
    serde_json::from_value(json!({
        "quota": 1000,
        "prompt_tokens": 1000,
        "completion_tokens": 500,
        "metadata": {
            "input_ratio": 0.25,
            "output_ratio": 1.0,
            "group_ratio": 0.8,
            "group_name": "default",
            "billing_type": "tokens"
        }
    }))
    .unwrap()
}

#[test]
fn full_record_display_pipeline() {
    let record = sample_record();
    let formatter = QuotaFormatter::new(&BillingConfig::default());
    let meta = record.metadata.clone().unwrap();

    // Undiscounted and effective per-million prices
    let original = resolve_display_price(
        meta.input_ratio.unwrap(),
        Decimal::ONE,
        BillingType::Tokens,
    );
    assert_eq!(original, "0.5");

    let effective = resolve_display_price(
        meta.input_ratio.unwrap(),
        meta.group_ratio.unwrap(),
        BillingType::Tokens,
    );
    assert_eq!(effective, "0.4");

    // Pre-discount quota reconstructed from the 20% discount
    assert_eq!(compute_original_quota(&record), dec!(1250));
    assert_eq!(saved_percent(&record), Some(dec!(20)));

    // Derivation string shown on the log row
    let step = step_breakdown(&record, &formatter);
    assert_eq!(
        step,
        "(1000 / 1,000,000 * $0.4) + (500 / 1,000,000 * $1.6) = $0.002000"
    );
}

#[test]
fn degraded_records_always_render() {
    let formatter = QuotaFormatter::new(&BillingConfig::default());

    // No metadata at all
    let bare: UsageRecord = serde_json::from_value(json!({"quota": 0})).unwrap();
    assert_eq!(compute_original_quota(&bare), Decimal::ZERO);
    assert_eq!(
        step_breakdown(&bare, &formatter),
        "(0 / 1,000,000 * $0) = $0.000000"
    );

    // Zero group ratio must not divide
    let zero_group: UsageRecord = serde_json::from_value(json!({
        "quota": 100,
        "metadata": {"group_ratio": 0}
    }))
    .unwrap();
    assert_eq!(compute_original_quota(&zero_group), Decimal::ZERO);

    // ... unless the backend stored the original amount
    let with_hint: UsageRecord = serde_json::from_value(json!({
        "quota": 100,
        "metadata": {"group_ratio": 0, "origin_quota": 250}
    }))
    .unwrap();
    assert_eq!(compute_original_quota(&with_hint), dec!(250));
}

#[test]
fn aggregation_feeds_even_chart_axes() {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();

    let rows: Vec<UsageSummary> = serde_json::from_value(json!([
        {"Date": "2024-05-02", "Channel": "openai", "Quota": 1500000,
         "PromptTokens": 900, "CompletionTokens": 100, "RequestCount": 5, "RequestTime": 10000},
        {"Date": "2024-05-06", "Channel": "openai", "Quota": 500000,
         "PromptTokens": 300, "CompletionTokens": 50, "RequestCount": 2, "RequestTime": 1000}
    ]))
    .unwrap();

    let aggregator = UsageAggregator::new(&BillingConfig::default());
    let report = aggregator.aggregate_by_date(&rows, start, end, |r| r.channel.clone());

    assert_eq!(report.dates.len(), 7);
    let costs = &report.costs.series[0];
    assert_eq!(costs.points.len(), 7);
    assert_eq!(costs.points[1], dec!(3.000));
    assert_eq!(costs.points[5], dec!(1.000));
    assert!(costs.points[0].is_zero());
    assert_eq!(report.costs.total, dec!(4.000));
    assert_eq!(report.tokens.total, dec!(1350));
}

#[test]
fn price_sync_rejects_malformed_payload_loudly() {
    let service = PricingService::new();

    let err = PricingService::parse_price_payload(json!({"error": "nope"})).unwrap_err();
    assert!(matches!(err, QuotaError::InvalidPayload(_)));

    let prices = PricingService::parse_price_payload(json!([
        {"model": "gpt-4o", "type": "tokens", "input": 2.5, "output": 10}
    ]))
    .unwrap();
    service
        .sync_prices(prices, PriceUpdateMode::Overwrite)
        .unwrap();
    assert_eq!(service.len(), 1);

    let gpt4o = service.price_of("gpt-4o").unwrap();
    assert_eq!(
        resolve_display_price(gpt4o.input, Decimal::ONE, gpt4o.price_type),
        "5"
    );
}

#[test]
fn original_quota_respects_metadata_fallback_chain() {
    let record = UsageRecord {
        quota: 0,
        metadata: Some(RatioMetadata {
            group_ratio: Some(dec!(0.5)),
            original_quota: Some(111),
            origin_quota: Some(222),
            ..Default::default()
        }),
        ..Default::default()
    };
    // Newer field wins over the legacy one
    assert_eq!(compute_original_quota(&record), dec!(111));
}
