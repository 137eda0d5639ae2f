//! Display helpers shared by front ends.

use chrono::DateTime;

use crate::model::{Coordinates, CurrentConditions};

pub const POPULAR_CITIES: [&str; 5] = ["Delhi", "Mumbai", "Hyderabad", "Bangalore", "Kolkata"];

pub const DAILY_ROWS: usize = 7;
pub const HOURLY_COLUMNS: usize = 12;

/// Glyph for an OpenWeather condition code.
pub fn icon_for(condition_id: Option<u32>) -> &'static str {
    let Some(id) = condition_id else {
        return "🌥";
    };

    match id {
        200..=599 => "🌧",
        600..=699 => "❄️",
        700..=799 => "🌫",
        800 => "☀️",
        801.. => "⛅",
        _ => "🌥",
    }
}

/// Icon for current conditions; a reading without a code counts as clear sky.
pub fn current_icon(current: &CurrentConditions) -> &'static str {
    icon_for(Some(current.condition_id.unwrap_or(800)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainOverlay {
    None,
    Rain,
    Thunder,
}

pub fn rain_overlay(current: &CurrentConditions) -> RainOverlay {
    let label = current.condition_label.to_lowercase();
    let id = current.condition_id.unwrap_or(0);

    let thunder = label.contains("thunder") || (200..300).contains(&id);
    let rain = thunder
        || label.contains("rain")
        || label.contains("drizzle")
        || (200..600).contains(&id);

    match (rain, thunder) {
        (_, true) => RainOverlay::Thunder,
        (true, false) => RainOverlay::Rain,
        _ => RainOverlay::None,
    }
}

/// OpenStreetMap embed centred on `c` with a one-degree box.
pub fn map_embed_url(c: Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.3}%2C{:.3}%2C{:.3}%2C{:.3}&layer=mapnik&marker={}%2C{}",
        c.lon - 0.5,
        c.lat - 0.5,
        c.lon + 0.5,
        c.lat + 0.5,
        c.lat,
        c.lon,
    )
}

fn local(ts: i64, offset: i64, fmt: &str) -> String {
    DateTime::from_timestamp(ts.saturating_add(offset), 0)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// `Sat 18`
pub fn format_day(ts: i64, offset: i64) -> String {
    local(ts, offset, "%a %-d")
}

/// `14:00`
pub fn format_hour(ts: i64, offset: i64) -> String {
    local(ts, offset, "%H:00")
}

pub fn format_time(ts: i64, offset: i64) -> String {
    local(ts, offset, "%H:%M:%S")
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.0}%", probability * 100.0)
}

/// Placeholder for values a forecast source doesn't provide.
pub fn format_optional_time(ts: Option<i64>, offset: i64) -> String {
    ts.map(|t| local(t, offset, "%H:%M")).unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(label: &str, id: Option<u32>) -> CurrentConditions {
        CurrentConditions {
            location_name: "Delhi".into(),
            country: Some("IN".into()),
            coordinates: Coordinates { lat: 28.6, lon: 77.2 },
            observed_at: 0,
            temperature: 30.0,
            feels_like: 33.0,
            humidity_pct: 40,
            pressure_hpa: 1008,
            visibility_m: Some(10_000),
            wind_speed: 3.0,
            condition_label: label.into(),
            condition_description: String::new(),
            condition_id: id,
            timezone_offset_seconds: 19_800,
        }
    }

    #[test]
    fn icons_by_code_range() {
        assert_eq!(icon_for(Some(211)), "🌧");
        assert_eq!(icon_for(Some(500)), "🌧");
        assert_eq!(icon_for(Some(601)), "❄️");
        assert_eq!(icon_for(Some(741)), "🌫");
        assert_eq!(icon_for(Some(800)), "☀️");
        assert_eq!(icon_for(Some(804)), "⛅");
        assert_eq!(icon_for(Some(100)), "🌥");
        assert_eq!(icon_for(None), "🌥");
    }

    #[test]
    fn current_without_code_is_clear() {
        assert_eq!(current_icon(&current("", None)), "☀️");
    }

    #[test]
    fn overlay_from_label_or_code() {
        assert_eq!(rain_overlay(&current("Clear", Some(800))), RainOverlay::None);
        assert_eq!(rain_overlay(&current("Drizzle", None)), RainOverlay::Rain);
        assert_eq!(rain_overlay(&current("Unknown", Some(520))), RainOverlay::Rain);
        assert_eq!(rain_overlay(&current("Thunderstorm", None)), RainOverlay::Thunder);
        assert_eq!(rain_overlay(&current("", Some(230))), RainOverlay::Thunder);
    }

    #[test]
    fn map_url_has_bbox_and_marker() {
        let url = map_embed_url(Coordinates { lat: 17.385, lon: 78.4867 });
        assert!(url.contains("bbox=77.987%2C16.885%2C78.987%2C17.885"));
        assert!(url.ends_with("marker=17.385%2C78.4867"));
    }

    #[test]
    fn formatting_applies_offset() {
        // 2023-11-14T22:13:20Z
        let ts = 1_700_000_000;
        assert_eq!(format_hour(ts, 0), "22:00");
        assert_eq!(format_day(ts, 0), "Tue 14");
        assert_eq!(format_day(ts, 19_800), "Wed 15");
        assert_eq!(format_time(ts, 19_800), "03:43:20");
    }

    #[test]
    fn percent_and_missing_values() {
        assert_eq!(format_percent(0.15), "15%");
        assert_eq!(format_optional_time(None, 0), "—");
        assert_eq!(format_optional_time(Some(0), 3600), "01:00");
    }
}
