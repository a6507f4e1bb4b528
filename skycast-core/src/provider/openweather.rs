//! OpenWeatherMap client: current conditions (`/weather`) and the
//! 3-hour 5-day forecast (`/forecast`), both mapped into the domain
//! types. One request per call, fixed timeout, no retries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{WeatherError, WeatherProvider, status_error};
use crate::model::{Condition, ForecastSample, ForecastSeries, WeatherSnapshot};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, http }
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<String, WeatherError> {
        let url = format!("{BASE_URL}/{endpoint}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(WeatherError::Connect)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::Connect)?;

        if !status.is_success() {
            return Err(status_error(status));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let body = self.get("weather", city).await?;
        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(WeatherError::Decode)?;

        Ok(snapshot_from_current(parsed))
    }

    async fn forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        let body = self.get("forecast", city).await?;
        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(WeatherError::Decode)?;

        Ok(series_from_forecast(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i64,
    humidity: i64,
    sea_level: Option<i64>,
    grnd_level: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: i64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: i64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<i64>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    clouds: OwClouds,
    wind: OwWind,
    visibility: Option<i64>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn condition_from(weather: &[OwWeather]) -> Condition {
    weather
        .first()
        .map(|w| Condition {
            code: w.id,
            description: w.description.clone(),
            icon: w.icon.clone(),
        })
        .unwrap_or_else(|| Condition {
            code: 0,
            description: "Unknown".to_string(),
            icon: "01d".to_string(),
        })
}

/// Shift a unix instant into the location's wall clock.
fn local_time(unix: i64, utc_offset_secs: i64) -> NaiveDateTime {
    DateTime::<Utc>::from_timestamp(unix + utc_offset_secs, 0)
        .unwrap_or_else(Utc::now)
        .naive_utc()
}

fn snapshot_from_current(parsed: OwCurrentResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        city: parsed.name,
        country: parsed.sys.country.unwrap_or_default(),
        latitude: parsed.coord.lat,
        longitude: parsed.coord.lon,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        condition: condition_from(&parsed.weather),
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        wind_speed_mps: parsed.wind.speed,
        wind_direction_deg: parsed.wind.deg,
        visibility_m: parsed.visibility,
        observed_at: local_time(parsed.dt, parsed.timezone),
    }
}

fn series_from_forecast(parsed: OwForecastResponse) -> ForecastSeries {
    let offset = parsed.city.timezone;
    let samples = parsed
        .list
        .into_iter()
        .map(|entry| sample_from_entry(entry, offset))
        .collect();

    ForecastSeries {
        city: parsed.city.name,
        country: parsed.city.country,
        utc_offset_secs: offset,
        samples,
    }
}

fn sample_from_entry(entry: OwForecastEntry, utc_offset_secs: i64) -> ForecastSample {
    ForecastSample {
        timestamp: local_time(entry.dt, utc_offset_secs),
        temperature_c: entry.main.temp,
        feels_like_c: entry.main.feels_like,
        temp_min_c: entry.main.temp_min,
        temp_max_c: entry.main.temp_max,
        pressure_hpa: entry.main.pressure,
        humidity_pct: entry.main.humidity,
        sea_level_hpa: entry.main.sea_level,
        ground_level_hpa: entry.main.grnd_level,
        condition: condition_from(&entry.weather),
        cloud_cover_pct: entry.clouds.all,
        wind_speed_mps: entry.wind.speed,
        wind_direction_deg: entry.wind.deg,
        wind_gust_mps: entry.wind.gust,
        visibility_m: entry.visibility,
        precipitation_probability: entry.pop.unwrap_or(0.0),
    }
}
