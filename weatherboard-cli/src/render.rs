//! Plain-text layout of a [`Dashboard`].

use std::fmt::Write;

use weatherboard_core::{
    Dashboard, ForecastSource,
    present::{
        DAILY_ROWS, HOURLY_COLUMNS, POPULAR_CITIES, RainOverlay, current_icon, format_day,
        format_hour, format_optional_time, format_percent, format_time, icon_for, map_embed_url,
        rain_overlay,
    },
};

pub fn dashboard(d: &Dashboard) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_dashboard(&mut out, d);
    out
}

fn write_dashboard(out: &mut String, d: &Dashboard) -> std::fmt::Result {
    let cur = &d.current;
    let tz = d.timezone_offset_seconds;

    let place = match &cur.country {
        Some(country) => format!("{}, {country}", cur.location_name),
        None => cur.location_name.clone(),
    };
    writeln!(out, "{place}  ({})", format_time(cur.observed_at, tz))?;
    writeln!(
        out,
        "{} {:.0}°C  {}  (feels like {:.0}°C)",
        current_icon(cur),
        cur.temperature,
        cur.condition_description,
        cur.feels_like
    )?;
    match rain_overlay(cur) {
        RainOverlay::Thunder => writeln!(out, "⚡ thunderstorm in the area")?,
        RainOverlay::Rain => writeln!(out, "☔ rain in the area")?,
        RainOverlay::None => {}
    }

    let rain_today = d.forecast.daily.first().map(|day| format_percent(day.precipitation_probability));
    writeln!(
        out,
        "Rain {}  Wind {:.0} km/h  Humidity {}%",
        rain_today.as_deref().unwrap_or("—"),
        cur.wind_speed,
        cur.humidity_pct
    )?;
    let visibility = cur
        .visibility_m
        .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
        .unwrap_or_else(|| "—".to_string());
    writeln!(out, "Visibility {visibility}  Pressure {} hPa", cur.pressure_hpa)?;
    writeln!(out, "Map: {}", map_embed_url(cur.coordinates))?;

    writeln!(out)?;
    let heading = match d.source {
        ForecastSource::OneCall => "Daily",
        ForecastSource::ThreeHourAggregate => "Daily (from 3-hour forecast)",
    };
    writeln!(out, "{heading}")?;
    if d.forecast.daily.is_empty() {
        writeln!(out, "  No forecast")?;
    }
    for day in d.forecast.daily.iter().take(DAILY_ROWS) {
        writeln!(
            out,
            "  {:<7} {} {:<12} {:>4.0}° / {:>4.0}°  {:>4} rain  sun {}-{}",
            format_day(day.reference_timestamp, tz),
            icon_for(day.condition_id),
            day.dominant_condition,
            day.temperature_max,
            day.temperature_min,
            format_percent(day.precipitation_probability),
            format_optional_time(day.sunrise, tz),
            format_optional_time(day.sunset, tz),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Hourly")?;
    if d.forecast.hourly.is_empty() {
        writeln!(out, "  Hourly data not available")?;
    } else {
        let hours = &d.forecast.hourly[..d.forecast.hourly.len().min(HOURLY_COLUMNS)];
        let times: Vec<String> = hours.iter().map(|h| format!("{:>6}", format_hour(h.timestamp, tz))).collect();
        let temps: Vec<String> = hours.iter().map(|h| format!("{:>5.0}°", h.temperature)).collect();
        writeln!(out, "  {}", times.join(""))?;
        writeln!(out, "  {}", temps.join(""))?;
    }

    writeln!(out)?;
    writeln!(out, "Popular cities: {}", POPULAR_CITIES.join(", "))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherboard_core::{
        Coordinates, CurrentConditions, ForecastAggregator, IntervalSample,
    };

    fn sample_dashboard(source: ForecastSource) -> Dashboard {
        let samples = vec![
            IntervalSample::new(0, 20.0, Some(0.1), Some("Clear")),
            IntervalSample::new(10_800, 22.0, Some(0.2), Some("Clear")),
            IntervalSample::new(86_400, 18.0, Some(0.5), Some("Rain")),
        ];

        Dashboard {
            current: CurrentConditions {
                location_name: "Hyderabad".into(),
                country: Some("IN".into()),
                coordinates: Coordinates { lat: 17.38, lon: 78.48 },
                observed_at: 0,
                temperature: 27.4,
                feels_like: 28.1,
                humidity_pct: 62,
                pressure_hpa: 1012,
                visibility_m: Some(6000),
                wind_speed: 3.6,
                condition_label: "Rain".into(),
                condition_description: "light rain".into(),
                condition_id: Some(500),
                timezone_offset_seconds: 0,
            },
            forecast: ForecastAggregator::aggregate(samples, 0, None),
            source,
            timezone_offset_seconds: 0,
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = dashboard(&sample_dashboard(ForecastSource::ThreeHourAggregate));

        assert!(text.starts_with("Hyderabad, IN  (00:00:00)"));
        assert!(text.contains("27°C  light rain"));
        assert!(text.contains("☔ rain in the area"));
        assert!(text.contains("Rain 15%"));
        assert!(text.contains("Visibility 6.0 km"));
        assert!(text.contains("openstreetmap.org"));
        assert!(text.contains("Daily (from 3-hour forecast)"));
        assert!(text.contains("Thu 1"));
        assert!(text.contains("Fri 2"));
        assert!(text.contains("sun —-—"));
        assert!(text.contains("03:00"));
        assert!(text.contains("Popular cities: Delhi, Mumbai, Hyderabad, Bangalore, Kolkata"));
    }

    #[test]
    fn empty_forecast_has_placeholders() {
        let mut d = sample_dashboard(ForecastSource::OneCall);
        d.forecast = ForecastAggregator::aggregate(Vec::new(), 0, None);

        let text = dashboard(&d);
        assert!(text.contains("Rain —"));
        assert!(text.contains("No forecast"));
        assert!(text.contains("Hourly data not available"));
    }
}
