//! Usage aggregation for dashboards
//!
//! Folds batches of per-day usage rows into index-aligned time series
//! suitable for charting: one series per group (channel, model, ...)
//! over a contiguous, zero-filled list of calendar-day buckets.

pub mod aggregator;
pub mod types;

pub use aggregator::{average_series, date_buckets, UsageAggregator};
pub use types::{DailyUsageReport, MetricSeries, TimeSeries, UsageSummary};
