//! Daily summaries from 3-hour forecast samples.
//!
//! Used when the one-call endpoint (which already ships daily data) is not
//! available and only the 3-hour `/forecast` list can be fetched.

use crate::model::{
    AggregatedForecast, DailySummary, IntervalSample, LocationMetadata, SECONDS_PER_DAY,
};

/// Label used for a day whose samples carry no condition at all.
pub const DEFAULT_CONDITION: &str = "Clear";

/// Stateless transformation from interval samples to an [`AggregatedForecast`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastAggregator;

impl ForecastAggregator {
    pub fn aggregate(
        samples: Vec<IntervalSample>,
        timezone_offset_seconds: i64,
        location: Option<LocationMetadata>,
    ) -> AggregatedForecast {
        let daily = group_by_day(&samples, timezone_offset_seconds)
            .into_iter()
            .map(|bucket| summarize(&bucket))
            .collect();

        AggregatedForecast {
            hourly: samples,
            daily,
            timezone_offset_seconds,
            location,
        }
    }
}

/// Index of the UTC calendar day containing `timestamp + offset`.
///
/// Two timestamps map to the same index exactly when their shifted instants
/// share a UTC date.
pub fn day_index(timestamp: i64, timezone_offset_seconds: i64) -> i64 {
    timestamp
        .saturating_add(timezone_offset_seconds)
        .div_euclid(SECONDS_PER_DAY)
}

/// Buckets keep the order in which each day was first encountered.
fn group_by_day(samples: &[IntervalSample], offset: i64) -> Vec<Vec<&IntervalSample>> {
    let mut keys: Vec<i64> = Vec::new();
    let mut buckets: Vec<Vec<&IntervalSample>> = Vec::new();

    for sample in samples {
        let key = day_index(sample.timestamp, offset);
        match keys.iter().position(|k| *k == key) {
            Some(i) => buckets[i].push(sample),
            None => {
                keys.push(key);
                buckets.push(vec![sample]);
            }
        }
    }

    buckets
}

fn summarize(bucket: &[&IntervalSample]) -> DailySummary {
    let reference_timestamp = bucket.first().map(|s| s.timestamp).unwrap_or_default();

    let (min, max) = bucket.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
        (lo.min(s.temperature), hi.max(s.temperature))
    });
    let (temperature_min, temperature_max) = if bucket.is_empty() { (0.0, 0.0) } else { (min, max) };

    let precipitation_probability = if bucket.is_empty() {
        0.0
    } else {
        bucket.iter().map(|s| s.precipitation_probability).sum::<f64>() / bucket.len() as f64
    };

    let dominant_condition = dominant_condition(bucket.iter().map(|s| s.condition_label.as_str()))
        .unwrap_or(DEFAULT_CONDITION)
        .to_string();

    let condition_id = bucket
        .iter()
        .find(|s| s.condition_label == dominant_condition)
        .and_then(|s| s.condition_id);

    DailySummary {
        reference_timestamp,
        temperature_min,
        temperature_max,
        precipitation_probability,
        dominant_condition,
        condition_id,
        sunrise: None,
        sunset: None,
    }
}

/// Most frequent non-empty label; on a tie the label seen first wins.
pub fn dominant_condition<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for label in labels.into_iter().filter(|l| !l.is_empty()) {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, n) in counts {
        // strictly greater keeps the earlier label on ties
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((label, n));
        }
    }

    best.map(|(label, _)| label)
}
