//! Date-bucketed usage aggregation

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{DailyUsageReport, MetricSeries, TimeSeries, UsageSummary};
use crate::config::BillingConfig;
use crate::core::quota::{QuotaFormatter, ROUNDING};

/// Decimal places for cost and latency chart values
const CHART_SCALE: u32 = 3;

/// Contiguous calendar-day buckets spanning `[start, end]` inclusive.
/// Equal endpoints yield one bucket; an inverted range yields none.
pub fn date_buckets(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Synthetic mean series across a set of index-aligned series. Zero
/// entries are skipped rather than counted as real zero samples, so
/// days where some groups had no traffic do not deflate the mean.
pub fn average_series(series: &[TimeSeries], len: usize) -> TimeSeries {
    let mut points = Vec::with_capacity(len);
    for index in 0..len {
        let mut sum = Decimal::ZERO;
        let mut count = 0u32;
        for s in series {
            let value = s.points.get(index).copied().unwrap_or(Decimal::ZERO);
            if !value.is_zero() {
                sum += value;
                count += 1;
            }
        }
        let mean = if count > 0 {
            (sum / Decimal::from(count)).round_dp_with_strategy(CHART_SCALE, ROUNDING)
        } else {
            Decimal::ZERO
        };
        points.push(mean);
    }
    TimeSeries {
        name: "average".to_string(),
        points,
    }
}

// Raw per-group accumulators, index-aligned with the day buckets
#[derive(Clone)]
struct GroupAccum {
    quota: Vec<i64>,
    tokens: Vec<i64>,
    requests: Vec<i64>,
    time_ms: Vec<i64>,
}

impl GroupAccum {
    fn new(len: usize) -> Self {
        Self {
            quota: vec![0; len],
            tokens: vec![0; len],
            requests: vec![0; len],
            time_ms: vec![0; len],
        }
    }
}

/// Folds per-day usage rows into chartable time series
#[derive(Debug, Clone, Default)]
pub struct UsageAggregator {
    formatter: QuotaFormatter,
}

impl UsageAggregator {
    /// Create an aggregator with the session's quota conversion factor
    pub fn new(config: &BillingConfig) -> Self {
        Self {
            formatter: QuotaFormatter::new(config),
        }
    }

    /// Aggregate usage rows into per-group, per-day series over
    /// `[start, end]`. Rows outside the range or without a date are
    /// skipped; days without rows stay zero so chart x-axes remain
    /// evenly spaced. `group_key` picks the series a row belongs to
    /// (channel name, model name, ...).
    pub fn aggregate_by_date<F>(
        &self,
        records: &[UsageSummary],
        start: NaiveDate,
        end: NaiveDate,
        group_key: F,
    ) -> DailyUsageReport
    where
        F: Fn(&UsageSummary) -> String,
    {
        let dates = date_buckets(start, end);
        let index_of: BTreeMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut groups: BTreeMap<String, GroupAccum> = BTreeMap::new();
        for record in records {
            let Some(index) = record.date.and_then(|d| index_of.get(&d).copied()) else {
                continue;
            };
            let accum = groups
                .entry(group_key(record))
                .or_insert_with(|| GroupAccum::new(dates.len()));
            accum.quota[index] += record.quota;
            accum.tokens[index] += record.tokens();
            accum.requests[index] += record.request_count;
            accum.time_ms[index] += record.request_time;
        }

        let mut costs = MetricSeries::default();
        let mut tokens = MetricSeries::default();
        let mut requests = MetricSeries::default();
        let mut latency = MetricSeries::default();

        let mut total_time_ms = 0i64;
        let mut total_requests = 0i64;

        for (name, accum) in &groups {
            let cost_points: Vec<Decimal> = accum
                .quota
                .iter()
                .map(|&q| {
                    self.formatter
                        .to_usd(q)
                        .round_dp_with_strategy(CHART_SCALE, ROUNDING)
                })
                .collect();
            costs.total += cost_points.iter().copied().sum::<Decimal>();
            costs.series.push(TimeSeries {
                name: name.clone(),
                points: cost_points,
            });

            let token_points: Vec<Decimal> =
                accum.tokens.iter().map(|&t| Decimal::from(t)).collect();
            tokens.total += token_points.iter().copied().sum::<Decimal>();
            tokens.series.push(TimeSeries {
                name: name.clone(),
                points: token_points,
            });

            let request_points: Vec<Decimal> =
                accum.requests.iter().map(|&r| Decimal::from(r)).collect();
            requests.total += request_points.iter().copied().sum::<Decimal>();
            requests.series.push(TimeSeries {
                name: name.clone(),
                points: request_points,
            });

            let latency_points: Vec<Decimal> = accum
                .time_ms
                .iter()
                .zip(&accum.requests)
                .map(|(&ms, &count)| mean_latency_seconds(ms, count))
                .collect();
            latency.series.push(TimeSeries {
                name: name.clone(),
                points: latency_points,
            });

            total_time_ms += accum.time_ms.iter().sum::<i64>();
            total_requests += accum.requests.iter().sum::<i64>();
        }

        // Overall mean latency across the whole range, then the
        // synthetic per-day average series for the chart
        latency.total = mean_latency_seconds(total_time_ms, total_requests);
        let avg = average_series(&latency.series, dates.len());
        latency.series.push(avg);

        DailyUsageReport {
            dates,
            costs,
            tokens,
            requests,
            latency,
        }
    }
}

/// Mean seconds per request, 3 decimal places; 0 when there are no
/// samples (excluded from upstream means, never counted as a real zero)
fn mean_latency_seconds(time_ms: i64, request_count: i64) -> Decimal {
    if request_count <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(time_ms) / dec!(1000) / Decimal::from(request_count))
        .round_dp_with_strategy(CHART_SCALE, ROUNDING)
}
