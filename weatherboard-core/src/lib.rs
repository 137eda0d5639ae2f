//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - Forecast aggregation from 3-hour samples into daily summaries
//! - The OpenWeather client and dashboard fetch orchestration
//! - Configuration & credentials handling
//! - Display helpers (icons, map link, local-time formatting)
//!
//! It is used by `weatherboard-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod openweather;
pub mod present;

pub use aggregate::ForecastAggregator;
pub use config::Config;
pub use dashboard::load_dashboard;
pub use error::WeatherError;
pub use model::{
    AggregatedForecast, Coordinates, CurrentConditions, DailySummary, Dashboard, ForecastSource,
    IntervalSample, LocationMetadata,
};
pub use openweather::OpenWeatherClient;
