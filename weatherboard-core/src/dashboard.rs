use tracing::{info, warn};

use crate::{
    aggregate::ForecastAggregator,
    error::{Result, WeatherError},
    model::{Dashboard, ForecastSource},
    openweather::OpenWeatherClient,
};

/// Fetch everything the dashboard shows for `city`.
///
/// Current conditions are required. The forecast comes from the one-call
/// endpoint when it answers, otherwise from the 3-hour forecast folded into
/// daily summaries. Calls are made one after another.
pub async fn load_dashboard(client: &OpenWeatherClient, city: &str) -> Result<Dashboard> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::EmptyCity);
    }

    let current = client.fetch_current(city).await?;

    let (forecast, source) = match client.fetch_one_call(current.coordinates).await {
        Ok(forecast) => (forecast, ForecastSource::OneCall),
        Err(err) => {
            warn!(error = %err, "one-call unavailable, falling back to 3-hour forecast");

            let three_hour = client.fetch_three_hour(current.coordinates).await?;
            let city_offset = three_hour
                .location
                .as_ref()
                .and_then(|l| l.timezone_offset_seconds)
                .unwrap_or(0);
            let offset = first_nonzero(&[city_offset, current.timezone_offset_seconds]);

            let forecast =
                ForecastAggregator::aggregate(three_hour.samples, offset, three_hour.location);
            (forecast, ForecastSource::ThreeHourAggregate)
        }
    };

    let timezone_offset_seconds =
        first_nonzero(&[forecast.timezone_offset_seconds, current.timezone_offset_seconds]);

    info!(
        city = %current.location_name,
        ?source,
        days = forecast.daily.len(),
        hours = forecast.hourly.len(),
        "dashboard loaded"
    );

    Ok(Dashboard { current, forecast, source, timezone_offset_seconds })
}

/// A zero offset is indistinguishable from "not reported" in provider data.
fn first_nonzero(offsets: &[i64]) -> i64 {
    offsets.iter().copied().find(|o| *o != 0).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_nonzero_prefers_earlier() {
        assert_eq!(first_nonzero(&[0, 3600]), 3600);
        assert_eq!(first_nonzero(&[-7200, 3600]), -7200);
        assert_eq!(first_nonzero(&[0, 0]), 0);
    }

    #[tokio::test]
    async fn blank_city_is_rejected_without_network() {
        let client = OpenWeatherClient::new(
            "KEY".into(),
            "http://127.0.0.1:9",
            Duration::from_millis(50),
        )
        .expect("client");

        let err = load_dashboard(&client, "   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::EmptyCity));
    }
}
