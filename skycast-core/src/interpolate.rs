//! Hourly interpolation engine.
//!
//! The upstream forecast arrives in 3-hour steps. This module expands it
//! into a contiguous 24-sample hourly series aligned to the current
//! wall-clock hour: linear blends for numeric fields, nearest-sample
//! choice for the categorical condition, and a clone of the nearest
//! series endpoint for target hours outside the series.
//!
//! The transform is pure and synchronous. `now` is an explicit parameter
//! so callers (and tests) control the clock.

use chrono::{Duration, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::model::{ForecastSample, ForecastSeries, HourlySample};

/// Number of hourly samples produced per run.
pub const HOURLY_WINDOW: usize = 24;

/// Local hours treated as daytime.
const DAYTIME_HOURS: std::ops::Range<u32> = 6..18;

/// Precondition violations. The series is the caller's responsibility;
/// a bad one fails fast here rather than producing a partially-correct
/// result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpolateError {
    #[error("forecast series is empty")]
    EmptySeries,
    #[error("forecast series timestamps are not strictly ascending at index {index}")]
    UnsortedSeries { index: usize },
}

/// Expand `series` into exactly [`HOURLY_WINDOW`] hourly samples,
/// starting at `now` truncated to the hour and stepping one hour each.
///
/// `series.samples` must be non-empty and strictly ascending by
/// timestamp; violations return an error before any output is built.
pub fn interpolate_hourly(
    series: &ForecastSeries,
    now: NaiveDateTime,
) -> Result<Vec<HourlySample>, InterpolateError> {
    let samples = &series.samples;
    if samples.is_empty() {
        return Err(InterpolateError::EmptySeries);
    }
    if let Some(i) = samples
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        return Err(InterpolateError::UnsortedSeries { index: i + 1 });
    }

    let start = truncate_to_hour(now);
    let mut hourly = Vec::with_capacity(HOURLY_WINDOW);

    for i in 0..HOURLY_WINDOW {
        let t = start + Duration::hours(i as i64);
        hourly.push(sample_at(samples, t));
    }

    Ok(hourly)
}

/// Produce the hourly sample for one target hour `t`.
///
/// Resolution order: exact hour match, bracketing blend, then clone of
/// the nearest endpoint when `t` falls outside the series. A
/// single-sample series always takes one of the last two paths.
fn sample_at(samples: &[ForecastSample], t: NaiveDateTime) -> HourlySample {
    if let Some(exact) = samples
        .iter()
        .find(|s| truncate_to_hour(s.timestamp) == t)
    {
        return clone_at(exact, t);
    }

    if let Some((before, after)) = bracket(samples, t) {
        return blend(before, after, t);
    }

    if t < samples[0].timestamp {
        clone_at(&samples[0], t)
    } else {
        clone_at(&samples[samples.len() - 1], t)
    }
}

/// First adjacent pair with `before.timestamp <= t < after.timestamp`.
fn bracket(
    samples: &[ForecastSample],
    t: NaiveDateTime,
) -> Option<(&ForecastSample, &ForecastSample)> {
    samples
        .windows(2)
        .find(|pair| pair[0].timestamp <= t && t < pair[1].timestamp)
        .map(|pair| (&pair[0], &pair[1]))
}

fn blend(before: &ForecastSample, after: &ForecastSample, t: NaiveDateTime) -> HourlySample {
    let span = (after.timestamp - before.timestamp).num_seconds() as f64;
    let offset = (t - before.timestamp).num_seconds() as f64;
    let factor = (offset / span).clamp(0.0, 1.0);

    let lerp = |a: f64, b: f64| a + (b - a) * factor;
    let lerp1 = |a: f64, b: f64| round1(lerp(a, b));
    let lerp_int = |a: i64, b: i64| lerp(a as f64, b as f64).round() as i64;

    // Nearest sample wins for the categorical condition; an exact
    // halfway point goes to `after`.
    let condition = if factor < 0.5 {
        before.condition.clone()
    } else {
        after.condition.clone()
    };

    HourlySample {
        timestamp: t,
        temperature_c: lerp1(before.temperature_c, after.temperature_c),
        feels_like_c: lerp1(before.feels_like_c, after.feels_like_c),
        temp_min_c: lerp1(before.temp_min_c, after.temp_min_c),
        temp_max_c: lerp1(before.temp_max_c, after.temp_max_c),
        pressure_hpa: lerp_int(before.pressure_hpa, after.pressure_hpa),
        humidity_pct: lerp_int(before.humidity_pct, after.humidity_pct),
        sea_level_hpa: before
            .sea_level_hpa
            .zip(after.sea_level_hpa)
            .map(|(a, b)| lerp_int(a, b)),
        ground_level_hpa: before
            .ground_level_hpa
            .zip(after.ground_level_hpa)
            .map(|(a, b)| lerp_int(a, b)),
        condition,
        cloud_cover_pct: lerp_int(before.cloud_cover_pct, after.cloud_cover_pct),
        wind_speed_mps: lerp1(before.wind_speed_mps, after.wind_speed_mps),
        wind_direction_deg: lerp_int(before.wind_direction_deg, after.wind_direction_deg),
        wind_gust_mps: before
            .wind_gust_mps
            .zip(after.wind_gust_mps)
            .map(|(a, b)| round1(lerp(a, b))),
        // Unlike the gust and sea/ground pressure, visibility falls back
        // to whichever single side is present.
        visibility_m: match (before.visibility_m, after.visibility_m) {
            (Some(a), Some(b)) => Some(lerp_int(a, b)),
            (a, b) => a.or(b),
        },
        precipitation_probability: round2(lerp(
            before.precipitation_probability,
            after.precipitation_probability,
        )),
        is_daytime: is_daytime(t),
    }
}

/// Copy a sample's fields verbatim, rewriting only the timestamp and
/// deriving the daytime flag. Used for exact hour matches and for target
/// hours outside the series.
fn clone_at(sample: &ForecastSample, t: NaiveDateTime) -> HourlySample {
    HourlySample {
        timestamp: t,
        temperature_c: sample.temperature_c,
        feels_like_c: sample.feels_like_c,
        temp_min_c: sample.temp_min_c,
        temp_max_c: sample.temp_max_c,
        pressure_hpa: sample.pressure_hpa,
        humidity_pct: sample.humidity_pct,
        sea_level_hpa: sample.sea_level_hpa,
        ground_level_hpa: sample.ground_level_hpa,
        condition: sample.condition.clone(),
        cloud_cover_pct: sample.cloud_cover_pct,
        wind_speed_mps: sample.wind_speed_mps,
        wind_direction_deg: sample.wind_direction_deg,
        wind_gust_mps: sample.wind_gust_mps,
        visibility_m: sample.visibility_m,
        precipitation_probability: sample.precipitation_probability,
        is_daytime: is_daytime(t),
    }
}

fn truncate_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_hms_opt(ts.hour(), 0, 0).unwrap_or(ts)
}

fn is_daytime(t: NaiveDateTime) -> bool {
    DAYTIME_HOURS.contains(&t.hour())
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn condition(description: &str) -> Condition {
        Condition {
            code: 800,
            description: description.to_string(),
            icon: "01d".to_string(),
        }
    }

    fn sample(ts: NaiveDateTime, temp: f64) -> ForecastSample {
        ForecastSample {
            timestamp: ts,
            temperature_c: temp,
            feels_like_c: temp - 1.0,
            temp_min_c: temp - 2.0,
            temp_max_c: temp + 2.0,
            pressure_hpa: 1013,
            humidity_pct: 60,
            sea_level_hpa: Some(1013),
            ground_level_hpa: Some(1005),
            condition: condition("clear sky"),
            cloud_cover_pct: 10,
            wind_speed_mps: 3.0,
            wind_direction_deg: 180,
            wind_gust_mps: Some(5.0),
            visibility_m: Some(10000),
            precipitation_probability: 0.1,
        }
    }

    fn series(samples: Vec<ForecastSample>) -> ForecastSeries {
        ForecastSeries {
            city: "London".to_string(),
            country: "GB".to_string(),
            utc_offset_secs: 0,
            samples,
        }
    }

    #[test]
    fn produces_24_hourly_samples_from_truncated_now() {
        let s = series(vec![sample(at(1, 12, 0), 20.0), sample(at(2, 12, 0), 26.0)]);
        let hourly = interpolate_hourly(&s, at(1, 13, 37)).unwrap();

        assert_eq!(hourly.len(), HOURLY_WINDOW);
        assert_eq!(hourly[0].timestamp, at(1, 13, 0));
        for pair in hourly.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn exact_hour_match_reproduces_sample_fields() {
        let mut exact = sample(at(1, 15, 0), 26.0);
        exact.humidity_pct = 87;
        exact.wind_gust_mps = Some(9.3);
        let s = series(vec![sample(at(1, 12, 0), 20.0), exact.clone()]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        let out = &hourly[2];

        assert_eq!(out.timestamp, at(1, 15, 0));
        assert_eq!(out.temperature_c, 26.0);
        assert_eq!(out.humidity_pct, 87);
        assert_eq!(out.wind_gust_mps, Some(9.3));
        assert_eq!(out.condition, exact.condition);
    }

    #[test]
    fn exact_match_rewrites_non_hour_aligned_timestamp() {
        // A sample at 15:20 counts as an exact match for 15:00 and its
        // output timestamp is the target hour, not the raw timestamp.
        let s = series(vec![sample(at(1, 12, 0), 20.0), sample(at(1, 15, 20), 26.0)]);
        let hourly = interpolate_hourly(&s, at(1, 15, 0)).unwrap();

        assert_eq!(hourly[0].timestamp, at(1, 15, 0));
        assert_eq!(hourly[0].temperature_c, 26.0);
    }

    #[test]
    fn one_third_factor_blends_temperature() {
        let s = series(vec![sample(at(1, 12, 0), 20.0), sample(at(1, 15, 0), 26.0)]);
        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();

        assert_eq!(hourly[0].timestamp, at(1, 13, 0));
        assert_eq!(hourly[0].temperature_c, 22.0);
    }

    #[test]
    fn blended_values_stay_between_brackets() {
        let s = series(vec![sample(at(1, 12, 0), 20.0), sample(at(1, 15, 0), 26.0)]);
        let hourly = interpolate_hourly(&s, at(1, 12, 0)).unwrap();

        for hour in hourly.iter().take(4) {
            assert!(hour.temperature_c >= 20.0 && hour.temperature_c <= 26.0);
            assert!(hour.wind_speed_mps >= 3.0 && hour.wind_speed_mps <= 3.0);
        }
    }

    #[test]
    fn temperature_moves_monotonically_between_brackets() {
        let s = series(vec![sample(at(1, 6, 0), 10.0), sample(at(1, 12, 0), 22.0)]);
        let hourly = interpolate_hourly(&s, at(1, 6, 0)).unwrap();

        let covered: Vec<f64> = hourly.iter().take(7).map(|h| h.temperature_c).collect();
        for pair in covered.windows(2) {
            assert!(pair[1] >= pair[0], "expected rise, got {pair:?}");
        }
        assert_eq!(covered[0], 10.0);
        assert_eq!(covered[6], 22.0);
    }

    #[test]
    fn condition_tie_breaks_toward_after() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.condition = condition("Clear");
        let mut after = sample(at(1, 14, 0), 22.0);
        after.condition = condition("Rain");
        let s = series(vec![before, after]);

        // 13:00 sits exactly halfway between the brackets.
        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].condition.description, "Rain");
    }

    #[test]
    fn condition_before_halfway_uses_before() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.condition = condition("Clear");
        let mut after = sample(at(1, 15, 0), 22.0);
        after.condition = condition("Rain");
        let s = series(vec![before, after]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].condition.description, "Clear");
    }

    #[test]
    fn single_sample_series_clones_into_every_hour() {
        let s = series(vec![sample(at(1, 9, 0), 20.0)]);
        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();

        assert_eq!(hourly.len(), HOURLY_WINDOW);
        for hour in &hourly {
            assert_eq!(hour.temperature_c, 20.0);
            assert_eq!(hour.visibility_m, Some(10000));
        }
    }

    #[test]
    fn hours_before_first_sample_clone_the_first() {
        let s = series(vec![sample(at(2, 6, 0), 14.0), sample(at(2, 9, 0), 20.0)]);
        let hourly = interpolate_hourly(&s, at(1, 22, 0)).unwrap();

        // 22:00 through 05:00 precede the series entirely.
        assert_eq!(hourly[0].timestamp, at(1, 22, 0));
        assert_eq!(hourly[0].temperature_c, 14.0);
        assert_eq!(hourly[3].temperature_c, 14.0);
    }

    #[test]
    fn hours_after_last_sample_clone_the_last() {
        let s = series(vec![sample(at(1, 6, 0), 14.0), sample(at(1, 9, 0), 20.0)]);
        let hourly = interpolate_hourly(&s, at(1, 8, 0)).unwrap();

        // Everything past 09:00 follows the series entirely.
        assert_eq!(hourly[5].timestamp, at(1, 13, 0));
        assert_eq!(hourly[5].temperature_c, 20.0);
        assert_eq!(hourly[23].temperature_c, 20.0);
    }

    #[test]
    fn visibility_falls_back_to_present_side() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.visibility_m = Some(8000);
        let mut after = sample(at(1, 15, 0), 26.0);
        after.visibility_m = None;
        let s = series(vec![before, after]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].visibility_m, Some(8000));
    }

    #[test]
    fn gust_and_pressure_variants_require_both_sides() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.wind_gust_mps = Some(7.0);
        before.sea_level_hpa = Some(1010);
        let mut after = sample(at(1, 15, 0), 26.0);
        after.wind_gust_mps = None;
        after.sea_level_hpa = None;
        let s = series(vec![before, after]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].wind_gust_mps, None);
        assert_eq!(hourly[0].sea_level_hpa, None);
    }

    #[test]
    fn gust_blends_when_both_present() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.wind_gust_mps = Some(4.0);
        let mut after = sample(at(1, 14, 0), 22.0);
        after.wind_gust_mps = Some(8.0);
        let s = series(vec![before, after]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].wind_gust_mps, Some(6.0));
    }

    #[test]
    fn precipitation_probability_rounds_to_two_decimals() {
        let mut before = sample(at(1, 12, 0), 20.0);
        before.precipitation_probability = 0.0;
        let mut after = sample(at(1, 15, 0), 26.0);
        after.precipitation_probability = 1.0;
        let s = series(vec![before, after]);

        let hourly = interpolate_hourly(&s, at(1, 13, 0)).unwrap();
        assert_eq!(hourly[0].precipitation_probability, 0.33);
    }

    #[test]
    fn daytime_flag_follows_local_hour_window() {
        let s = series(vec![sample(at(1, 3, 0), 20.0)]);
        let hourly = interpolate_hourly(&s, at(1, 3, 0)).unwrap();

        // 03:00..05:00 night, 06:00..17:00 day, 18:00 onward night.
        assert!(!hourly[0].is_daytime);
        assert!(!hourly[2].is_daytime);
        assert!(hourly[3].is_daytime);
        assert!(hourly[14].is_daytime);
        assert!(!hourly[15].is_daytime);
    }

    #[test]
    fn empty_series_is_rejected() {
        let s = series(vec![]);
        assert_eq!(
            interpolate_hourly(&s, at(1, 13, 0)),
            Err(InterpolateError::EmptySeries)
        );
    }

    #[test]
    fn non_ascending_series_is_rejected() {
        let s = series(vec![sample(at(1, 15, 0), 20.0), sample(at(1, 12, 0), 26.0)]);
        assert_eq!(
            interpolate_hourly(&s, at(1, 13, 0)),
            Err(InterpolateError::UnsortedSeries { index: 1 })
        );

        let dup = series(vec![sample(at(1, 12, 0), 20.0), sample(at(1, 12, 0), 26.0)]);
        assert_eq!(
            interpolate_hourly(&dup, at(1, 13, 0)),
            Err(InterpolateError::UnsortedSeries { index: 1 })
        );
    }

    #[test]
    fn input_series_is_untouched() {
        let original = series(vec![sample(at(1, 12, 0), 20.0), sample(at(1, 15, 0), 26.0)]);
        let copy = original.clone();

        interpolate_hourly(&original, at(1, 13, 0)).unwrap();
        assert_eq!(original, copy);
    }
}
