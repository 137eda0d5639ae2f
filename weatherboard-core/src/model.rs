use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Geographic position as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One 3-hour-resolution observation.
///
/// Optional wire fields are resolved when the sample is built: a missing
/// precipitation probability becomes `0.0` and a missing condition becomes an
/// empty label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSample {
    /// Seconds since the Unix epoch, UTC.
    pub timestamp: i64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// 0.0..=1.0
    pub precipitation_probability: f64,
    /// Short category such as "Rain" or "Clear". May be empty.
    pub condition_label: String,
    pub condition_id: Option<u32>,
    pub feels_like: Option<f64>,
}

impl IntervalSample {
    pub fn new(
        timestamp: i64,
        temperature: f64,
        precipitation_probability: Option<f64>,
        condition_label: Option<&str>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            precipitation_probability: precipitation_probability.unwrap_or(0.0),
            condition_label: condition_label.unwrap_or_default().to_string(),
            condition_id: None,
            feels_like: None,
        }
    }
}

/// Aggregate of all samples falling on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Timestamp of the first sample seen for this day.
    pub reference_timestamp: i64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub precipitation_probability: f64,
    pub dominant_condition: String,
    pub condition_id: Option<u32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl DailySummary {
    /// Calendar date of `reference_timestamp` shifted by `timezone_offset_seconds`.
    pub fn date(&self, timezone_offset_seconds: i64) -> Option<NaiveDate> {
        let local = self.reference_timestamp.saturating_add(timezone_offset_seconds);
        DateTime::from_timestamp(local, 0).map(|dt| dt.date_naive())
    }
}

/// Location details passed through from the forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMetadata {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub timezone_offset_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedForecast {
    /// Input samples, unmodified and in original order.
    pub hourly: Vec<IntervalSample>,
    /// One entry per distinct local day, in first-seen order.
    pub daily: Vec<DailySummary>,
    pub timezone_offset_seconds: i64,
    pub location: Option<LocationMetadata>,
}

/// Current conditions for the searched city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub observed_at: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: Option<u32>,
    pub wind_speed: f64,
    pub condition_label: String,
    pub condition_description: String,
    pub condition_id: Option<u32>,
    pub timezone_offset_seconds: i64,
}

/// Which endpoint produced the forecast part of a [`Dashboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    OneCall,
    ThreeHourAggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub current: CurrentConditions,
    pub forecast: AggregatedForecast,
    pub source: ForecastSource,
    /// Offset used for all local-time display.
    pub timezone_offset_seconds: i64,
}
