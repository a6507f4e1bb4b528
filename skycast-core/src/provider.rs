use crate::{
    config::Config,
    model::{ForecastSeries, WeatherSnapshot},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Errors surfaced by a weather provider. Each variant carries the
/// user-facing message the dashboard shows for it.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "API key is not configured.\n\
         Hint: run `skycast configure` or set the SKYCAST_API_KEY environment variable."
    )]
    MissingApiKey,

    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidApiKey,

    #[error("City not found. Please try a different city name.")]
    CityNotFound,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Weather service error: {status}")]
    Service { status: u16 },

    #[error("Unable to connect to the weather service. Please check your internet connection.")]
    Connect(#[source] reqwest::Error),

    #[error("Failed to decode the weather service response")]
    Decode(#[source] serde_json::Error),
}

/// Map a non-success HTTP status to its taxonomy variant.
pub(crate) fn status_error(status: StatusCode) -> WeatherError {
    match status {
        StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
        StatusCode::NOT_FOUND => WeatherError::CityNotFound,
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited,
        other => WeatherError::Service {
            status: other.as_u16(),
        },
    }
}

/// Source of current conditions and the 3-hour forecast for a city.
///
/// The core treats the upstream API as a black box behind this trait;
/// the interpolator and summary only ever see the mapped domain types.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
    async fn forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError>;
}

/// Construct the provider from config, resolving the API key from the
/// environment or the stored config file.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.resolve_api_key().ok_or(WeatherError::MissingApiKey)?;
    Ok(Box::new(openweather::OpenWeatherProvider::new(api_key)))
}
