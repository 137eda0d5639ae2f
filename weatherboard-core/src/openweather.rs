use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{
        AggregatedForecast, Coordinates, CurrentConditions, DailySummary, IntervalSample,
        LocationMetadata,
    },
};

const CURRENT: &str = "weather";
const ONE_CALL: &str = "onecall";
const FORECAST: &str = "forecast";

/// HTTP client for the OpenWeather 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

/// Raw 3-hour samples plus the `city` block of a `/forecast` response.
#[derive(Debug, Clone)]
pub struct ThreeHourForecast {
    pub samples: Vec<IntervalSample>,
    pub location: Option<LocationMetadata>,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| WeatherError::Http { endpoint: "client", source })?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(api_key, config.base_url.as_str(), config.timeout())?)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions> {
        let parsed: OwCurrentResponse = self
            .get_json(CURRENT, vec![("q", city.to_string())], |status, body| {
                WeatherError::CityNotFound { city: city.to_string(), status, body }
            })
            .await?;

        Ok(parsed.into())
    }

    /// Hourly and daily forecast in a single call. Daily entries carry
    /// sunrise and sunset.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_one_call(&self, coordinates: Coordinates) -> Result<AggregatedForecast> {
        let mut query = coordinate_query(coordinates);
        query.push(("exclude", "minutely,alerts".to_string()));

        let parsed: OcResponse = self
            .get_json(ONE_CALL, query, |status, body| WeatherError::OneCallUnavailable {
                status,
                body,
            })
            .await?;

        Ok(parsed.into())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_three_hour(&self, coordinates: Coordinates) -> Result<ThreeHourForecast> {
        let parsed: OwForecastResponse = self
            .get_json(FORECAST, coordinate_query(coordinates), |status, body| {
                WeatherError::ForecastUnavailable { status, body }
            })
            .await?;

        Ok(ThreeHourForecast {
            samples: parsed.list.into_iter().map(IntervalSample::from).collect(),
            location: parsed.city.map(LocationMetadata::from),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        mut query: Vec<(&'static str, String)>,
        on_failure: impl FnOnce(u16, String) -> WeatherError,
    ) -> Result<T> {
        let url = format!("{}/{endpoint}", self.base_url);
        query.push(("units", "metric".to_string()));
        query.push(("appid", self.api_key.clone()));

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| WeatherError::Http { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Http { endpoint, source })?;
        debug!(endpoint, %status, bytes = body.len(), "OpenWeather response");

        if !status.is_success() {
            return Err(on_failure(status.as_u16(), truncate_body(&body)));
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

fn coordinate_query(c: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<u32>,
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

/// First entry of a `weather` array, which may be empty or missing.
fn primary(weather: &[OwWeather]) -> Option<&OwWeather> {
    weather.first()
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

impl From<OwCoord> for Coordinates {
    fn from(c: OwCoord) -> Self {
        Self { lat: c.lat, lon: c.lon }
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwCurrentMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
    sys: Option<OwSys>,
    timezone: Option<i64>,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(r: OwCurrentResponse) -> Self {
        let weather = primary(&r.weather);

        Self {
            condition_label: weather.map(|w| w.main.clone()).unwrap_or_default(),
            condition_description: weather.map(|w| w.description.clone()).unwrap_or_default(),
            condition_id: weather.and_then(|w| w.id),
            location_name: r.name,
            country: r.sys.and_then(|s| s.country),
            coordinates: r.coord.into(),
            observed_at: r.dt,
            temperature: r.main.temp,
            feels_like: r.main.feels_like,
            humidity_pct: r.main.humidity,
            pressure_hpa: r.main.pressure,
            visibility_m: r.visibility,
            wind_speed: r.wind.speed,
            timezone_offset_seconds: r.timezone.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    feels_like: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    pop: Option<f64>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwForecastEntry> for IntervalSample {
    fn from(e: OwForecastEntry) -> Self {
        let weather = primary(&e.weather);
        let mut sample =
            IntervalSample::new(e.dt, e.main.temp, e.pop, weather.map(|w| w.main.as_str()));
        sample.condition_id = weather.and_then(|w| w.id);
        sample.feels_like = e.main.feels_like;
        sample
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
    coord: Option<OwCoord>,
    timezone: Option<i64>,
}

impl From<OwCity> for LocationMetadata {
    fn from(c: OwCity) -> Self {
        Self {
            name: c.name,
            country: c.country,
            coordinates: c.coord.map(Coordinates::from),
            timezone_offset_seconds: c.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    city: Option<OwCity>,
}

#[derive(Debug, Deserialize)]
struct OcHourly {
    dt: i64,
    temp: f64,
    feels_like: Option<f64>,
    pop: Option<f64>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OcHourly> for IntervalSample {
    fn from(h: OcHourly) -> Self {
        let weather = primary(&h.weather);
        let mut sample = IntervalSample::new(h.dt, h.temp, h.pop, weather.map(|w| w.main.as_str()));
        sample.condition_id = weather.and_then(|w| w.id);
        sample.feels_like = h.feels_like;
        sample
    }
}

#[derive(Debug, Deserialize)]
struct OcTemp {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OcDaily {
    dt: i64,
    temp: OcTemp,
    pop: Option<f64>,
    #[serde(default)]
    weather: Vec<OwWeather>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl From<OcDaily> for DailySummary {
    fn from(d: OcDaily) -> Self {
        let weather = primary(&d.weather);
        Self {
            reference_timestamp: d.dt,
            temperature_min: d.temp.min,
            temperature_max: d.temp.max,
            precipitation_probability: d.pop.unwrap_or(0.0),
            dominant_condition: weather
                .map(|w| w.main.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| crate::aggregate::DEFAULT_CONDITION.to_string()),
            condition_id: weather.and_then(|w| w.id),
            sunrise: d.sunrise,
            sunset: d.sunset,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    timezone_offset: Option<i64>,
    #[serde(default)]
    hourly: Vec<OcHourly>,
    #[serde(default)]
    daily: Vec<OcDaily>,
}

impl From<OcResponse> for AggregatedForecast {
    fn from(r: OcResponse) -> Self {
        Self {
            hourly: r.hourly.into_iter().map(IntervalSample::from).collect(),
            daily: r.daily.into_iter().map(DailySummary::from).collect(),
            timezone_offset_seconds: r.timezone_offset.unwrap_or(0),
            location: None,
        }
    }
}
