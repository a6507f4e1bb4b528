use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition as reported upstream: an opaque (code, description,
/// icon) tuple. Never interpolated numerically; the hourly engine picks
/// the nearest sample's condition wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub code: i64,
    pub description: String,
    pub icon: String,
}

/// Current conditions for one location, as shown on the dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: Condition,
    pub humidity_pct: i64,
    pub pressure_hpa: i64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: i64,
    pub visibility_m: Option<i64>,
    /// Observation time in the location's local wall clock.
    pub observed_at: NaiveDateTime,
}

/// One 3-hour forecast slot.
///
/// Timestamps are wall-clock in the forecast location's own timezone and
/// must be strictly ascending across a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub pressure_hpa: i64,
    pub humidity_pct: i64,
    pub sea_level_hpa: Option<i64>,
    pub ground_level_hpa: Option<i64>,
    pub condition: Condition,
    pub cloud_cover_pct: i64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: i64,
    pub wind_gust_mps: Option<f64>,
    pub visibility_m: Option<i64>,
    /// Probability of precipitation in [0, 1].
    pub precipitation_probability: f64,
}

/// Ordered 3-hour forecast series for one location, ascending by
/// timestamp, plus the location metadata the rendering layer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: String,
    pub country: String,
    /// UTC offset of the location, in seconds.
    pub utc_offset_secs: i64,
    pub samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    /// Current wall-clock time at the forecast location.
    pub fn local_now(&self) -> NaiveDateTime {
        (Utc::now() + Duration::seconds(self.utc_offset_secs)).naive_utc()
    }
}

/// One interpolated hour, same shape as [`ForecastSample`] plus the
/// derived daytime flag. Produced fresh by the hourly engine; never
/// aliases the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub pressure_hpa: i64,
    pub humidity_pct: i64,
    pub sea_level_hpa: Option<i64>,
    pub ground_level_hpa: Option<i64>,
    pub condition: Condition,
    pub cloud_cover_pct: i64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: i64,
    pub wind_gust_mps: Option<f64>,
    pub visibility_m: Option<i64>,
    pub precipitation_probability: f64,
    /// True for local hours in [6, 18), derived from the sample hour
    /// alone.
    pub is_daytime: bool,
}
