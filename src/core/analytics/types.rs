//! Type definitions for usage aggregation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One per-day usage row as returned by the backend statistics API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UsageSummary {
    /// Calendar day the row belongs to
    pub date: Option<NaiveDate>,
    /// Channel name (set for channel-grouped queries)
    pub channel: String,
    /// Model name (set for model-grouped queries)
    pub model_name: String,
    /// Billed quota units for the day
    pub quota: i64,
    /// Prompt tokens for the day
    pub prompt_tokens: i64,
    /// Completion tokens for the day
    pub completion_tokens: i64,
    /// Number of requests for the day
    pub request_count: i64,
    /// Accumulated request duration in milliseconds
    pub request_time: i64,
}

impl UsageSummary {
    /// Primary token total for the row
    pub fn tokens(&self) -> i64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// One named, index-aligned series over the report's day buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Group label (channel name, model name, or "average")
    pub name: String,
    /// One value per day bucket, zero-filled
    pub points: Vec<Decimal>,
}

/// All series for one metric, plus its total across the range
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricSeries {
    /// Total across every group and day
    pub total: Decimal,
    /// One series per distinct group key
    pub series: Vec<TimeSeries>,
}

/// Aggregated report over a date range
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyUsageReport {
    /// Contiguous day buckets spanning the requested range
    pub dates: Vec<NaiveDate>,
    /// Cost in display currency, 3 decimal places
    pub costs: MetricSeries,
    /// Prompt + completion token counts
    pub tokens: MetricSeries,
    /// Request counts
    pub requests: MetricSeries,
    /// Mean seconds per request, 3 decimal places; includes a synthetic
    /// trailing "average" series across all groups
    pub latency: MetricSeries,
}
