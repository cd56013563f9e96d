//! Forecast aggregation: collapse the provider's 3-hourly sample list
//! into at most five daily summaries.

use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;

use crate::model::{DailySummary, ForecastSample};

/// Maximum number of days a summary covers; matches the provider's
/// 5-day forecast window.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Group a time-ordered sample list into per-day summaries.
///
/// Samples are bucketed by their UTC calendar date (the provider
/// delivers UTC timestamps; truncating in local time would drift the
/// buckets depending on where the client runs). Buckets come out in
/// ascending date order, capped at [`MAX_FORECAST_DAYS`]. Each bucket
/// reports the minimum of its samples' `temp_min`, the maximum of
/// their `temp_max`, and the icon of the sample at the bucket's
/// midpoint index in provider order.
///
/// Samples with an unrepresentable timestamp or absent temperatures
/// are tolerated: temperatures simply don't contribute to the fold.
pub fn to_daily(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();

    for sample in samples {
        let Some(date) = utc_date(sample.dt) else {
            continue;
        };
        by_day.entry(date).or_default().push(sample);
    }

    by_day
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, bucket)| summarize(date, &bucket))
        .collect()
}

fn summarize(date: NaiveDate, bucket: &[&ForecastSample]) -> DailySummary {
    let min = bucket
        .iter()
        .filter_map(|s| s.main.temp_min)
        .fold(f64::INFINITY, f64::min);
    let max = bucket
        .iter()
        .filter_map(|s| s.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    // Bucket is non-empty by construction. Provider order within a day
    // is chronological, so the midpoint index lands mid-day.
    let icon = bucket[bucket.len() / 2]
        .weather
        .first()
        .and_then(|w| w.icon.clone());

    DailySummary { date, min, max, icon }
}

fn utc_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}
