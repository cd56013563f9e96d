//! Terminal rendering of the session state. Read-only collaborator:
//! nothing here mutates the session, and every provider field is
//! optional, so absent data renders as a placeholder instead of
//! panicking.

use chrono::DateTime;
use skycast_core::Session;
use skycast_core::model::{CurrentConditions, DailySummary, UnitSystem};

const PLACEHOLDER: &str = "-";

pub fn dashboard(session: &Session) {
    println!();

    if let Some(advisory) = &session.advisory {
        println!("  ! {advisory}");
        println!();
    }

    if session.loading {
        println!("  Loading...");
        return;
    }

    match &session.current {
        Some(current) => render_current(current, session.units),
        None => {
            println!("  No weather data to show.");
            return;
        }
    }

    if let Some(daily) = &session.daily {
        render_forecast(daily, session.units);
    }

    println!();
}

fn render_current(current: &CurrentConditions, units: UnitSystem) {
    let name = current.name.as_deref().unwrap_or("Unknown location");
    let country = current
        .sys
        .as_ref()
        .and_then(|s| s.country.as_deref())
        .unwrap_or(PLACEHOLDER);

    println!("  {} {name}, {country}", theme_glyph(current));
    println!();

    let description = current
        .condition()
        .and_then(|c| c.description.as_deref())
        .unwrap_or(PLACEHOLDER);
    println!(
        "  {}  {description}",
        format_temp(current.main.temp, units)
    );
    println!(
        "  feels like {}",
        format_temp(current.main.feels_like, units)
    );
    println!();

    println!(
        "  humidity {}   wind {}   pressure {}",
        format_count(current.main.humidity, "%"),
        format_wind(current.wind.as_ref().and_then(|w| w.speed), units),
        format_count(current.main.pressure, " hPa"),
    );
    println!(
        "  clouds {}   visibility {}",
        format_count(current.clouds.as_ref().and_then(|c| c.all), "%"),
        format_count(current.visibility, " m"),
    );

    let sys = current.sys.as_ref();
    println!(
        "  sunrise {}   sunset {}",
        format_time(sys.and_then(|s| s.sunrise)),
        format_time(sys.and_then(|s| s.sunset)),
    );
}

fn render_forecast(daily: &[DailySummary], units: UnitSystem) {
    if daily.is_empty() {
        return;
    }

    println!();
    println!("  {}-day forecast:", daily.len());

    for day in daily {
        println!(
            "    {}  {}  {} / {}  {}",
            day.date.format("%a"),
            day.date,
            format_finite(day.max, units),
            format_finite(day.min, units),
            day.icon.as_deref().unwrap_or(""),
        );
    }
}

/// Weather-themed marker for the header, ported from the original
/// dashboard's background theme selection.
fn theme_glyph(current: &CurrentConditions) -> &'static str {
    let main = current
        .condition()
        .and_then(|c| c.main.as_deref())
        .unwrap_or("")
        .to_lowercase();

    if main.contains("rain") || main.contains("drizzle") || main.contains("thunder") {
        "🌧"
    } else if main.contains("snow") || main.contains("sleet") {
        "❄"
    } else if main.contains("cloud") {
        "☁"
    } else {
        "☀"
    }
}

fn format_temp(temp: Option<f64>, units: UnitSystem) -> String {
    match temp {
        Some(t) => format!("{:.0}°{}", t, units.temp_label()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Like [`format_temp`] but for aggregated values, where an all-absent
/// bucket leaves a non-finite fold result.
fn format_finite(temp: f64, units: UnitSystem) -> String {
    if temp.is_finite() {
        format!("{:.0}°{}", temp, units.temp_label())
    } else {
        PLACEHOLDER.to_string()
    }
}

fn format_wind(speed: Option<f64>, units: UnitSystem) -> String {
    match speed {
        Some(s) => format!("{:.0} {}", s, units.wind_label()),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_count<T: std::fmt::Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v}{suffix}"),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_time(ts: Option<i64>) -> String {
    ts.and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| format!("{} UTC", dt.format("%H:%M")))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::model::ConditionInfo;

    fn with_condition(main: &str) -> CurrentConditions {
        CurrentConditions {
            weather: vec![ConditionInfo {
                main: Some(main.to_string()),
                description: None,
                icon: None,
            }],
            ..CurrentConditions::default()
        }
    }

    #[test]
    fn theme_matches_condition_groups() {
        assert_eq!(theme_glyph(&with_condition("Rain")), "🌧");
        assert_eq!(theme_glyph(&with_condition("Drizzle")), "🌧");
        assert_eq!(theme_glyph(&with_condition("Thunderstorm")), "🌧");
        assert_eq!(theme_glyph(&with_condition("Snow")), "❄");
        assert_eq!(theme_glyph(&with_condition("Clouds")), "☁");
        assert_eq!(theme_glyph(&with_condition("Clear")), "☀");
    }

    #[test]
    fn missing_condition_defaults_to_sunny() {
        assert_eq!(theme_glyph(&CurrentConditions::default()), "☀");
    }

    #[test]
    fn absent_values_render_placeholders() {
        assert_eq!(format_temp(None, UnitSystem::Metric), PLACEHOLDER);
        assert_eq!(format_wind(None, UnitSystem::Imperial), PLACEHOLDER);
        assert_eq!(format_time(None), PLACEHOLDER);
        assert_eq!(format_finite(f64::INFINITY, UnitSystem::Metric), PLACEHOLDER);
    }

    #[test]
    fn present_values_render_with_unit_labels() {
        assert_eq!(format_temp(Some(11.4), UnitSystem::Metric), "11°C");
        assert_eq!(format_temp(Some(52.6), UnitSystem::Imperial), "53°F");
        assert_eq!(format_wind(Some(4.6), UnitSystem::Metric), "5 m/s");
        assert_eq!(format_count(Some(76u32), "%"), "76%");
    }
}
