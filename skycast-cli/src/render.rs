//! Text rendering of the dashboard: current-conditions card, hourly
//! strip, 5-day list and the map link.

use chrono::{NaiveDate, NaiveDateTime};
use skycast_core::{ForecastSample, HourlySample, WeatherSnapshot};

pub fn current_card(snapshot: &WeatherSnapshot) {
    println!();
    println!(
        "{}, {}  —  {}",
        snapshot.city, snapshot.country, snapshot.condition.description
    );
    println!(
        "  {:.0}°C  (feels like {:.0}°C)",
        snapshot.temperature_c, snapshot.feels_like_c
    );
    println!(
        "  humidity {}%   pressure {} hPa   wind {:.1} m/s @ {}°   visibility {}",
        snapshot.humidity_pct,
        snapshot.pressure_hpa,
        snapshot.wind_speed_mps,
        snapshot.wind_direction_deg,
        visibility_km(snapshot.visibility_m),
    );
    println!(
        "  observed at {}",
        snapshot.observed_at.format("%H:%M local time")
    );
}

pub fn hourly_strip(hourly: &[HourlySample], hours: usize) {
    let Some(first) = hourly.first() else {
        return;
    };
    let today = first.timestamp.date();
    let shown = hours.min(hourly.len());

    println!();
    println!("Next {shown} hours");
    for (index, hour) in hourly.iter().take(shown).enumerate() {
        println!(
            "  {:>9}  {} {:>5.1}°C  feels {:>5.1}°  💧 {:>3}%  🌬 {:>4.1} m/s  {}",
            time_label(hour.timestamp, index, today),
            glyph(&hour.condition.icon, hour.is_daytime),
            hour.temperature_c,
            hour.feels_like_c,
            hour.humidity_pct,
            hour.wind_speed_mps,
            hour.condition.description,
        );
    }
}

pub fn daily_list(days: &[&ForecastSample], today: NaiveDate) {
    if days.is_empty() {
        return;
    }

    println!();
    println!("{}-day forecast", days.len());
    for day in days {
        let label = if day.timestamp.date() == today {
            "Today".to_string()
        } else {
            day.timestamp.format("%a %d %b").to_string()
        };
        println!(
            "  {label:<10}  {:>5.1}°C  ↑ {:.0}°  ↓ {:.0}°  💧 {:>3}%  🌬 {:>4.1} m/s  {}",
            day.temperature_c,
            day.temp_max_c,
            day.temp_min_c,
            day.humidity_pct,
            day.wind_speed_mps,
            day.condition.description,
        );
    }
}

pub fn map_link(snapshot: &WeatherSnapshot) {
    println!();
    println!(
        "Map: https://www.openstreetmap.org/?mlat={:.4}&mlon={:.4}#map=10/{:.4}/{:.4}",
        snapshot.latitude, snapshot.longitude, snapshot.latitude, snapshot.longitude
    );
}

fn visibility_km(visibility_m: Option<i64>) -> String {
    match visibility_m {
        Some(m) => format!("{:.1} km", m as f64 / 1000.0),
        None => "N/A".to_string(),
    }
}

/// "Now" for the leading hour, "HH:MM" for the rest of today, weekday
/// prefix once the strip crosses midnight.
fn time_label(ts: NaiveDateTime, index: usize, today: NaiveDate) -> String {
    if index == 0 && ts.date() == today {
        return "Now".to_string();
    }
    if ts.date() == today {
        ts.format("%H:%M").to_string()
    } else {
        ts.format("%a %H:%M").to_string()
    }
}

/// Rough glyph for an OpenWeatherMap icon code ("01d", "10n", ...).
fn glyph(icon: &str, is_daytime: bool) -> &'static str {
    match icon.get(..2) {
        Some("01") => {
            if is_daytime {
                "☀"
            } else {
                "☾"
            }
        }
        Some("02") | Some("03") => "⛅",
        Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}
