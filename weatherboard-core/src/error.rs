use thiserror::Error;

/// Failures while fetching data for the dashboard.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please provide a city name")]
    EmptyCity,

    #[error("City not found: {city} ({status}: {body})")]
    CityNotFound { city: String, status: u16, body: String },

    #[error("One-call forecast unavailable ({status}: {body})")]
    OneCallUnavailable { status: u16, body: String },

    #[error("Forecast not available ({status}: {body})")]
    ForecastUnavailable { status: u16, body: String },

    #[error("Request to {endpoint} failed")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse {endpoint} response")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_cause() {
        assert_eq!(WeatherError::EmptyCity.to_string(), "Please provide a city name");

        let err = WeatherError::CityNotFound {
            city: "Atlantis".into(),
            status: 404,
            body: "city not found".into(),
        };
        assert!(err.to_string().contains("Atlantis"));
        assert!(err.to_string().contains("404"));

        let err = WeatherError::ForecastUnavailable { status: 500, body: String::new() };
        assert!(err.to_string().starts_with("Forecast not available"));
    }
}
