//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider and its error taxonomy
//! - Shared domain models (snapshots, forecast series, hourly samples)
//! - The hourly interpolation engine and the 5-day overview
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod interpolate;
pub mod model;
pub mod provider;
pub mod summary;

pub use config::{API_KEY_ENV, Config};
pub use interpolate::{HOURLY_WINDOW, InterpolateError, interpolate_hourly};
pub use model::{
    Condition, ForecastSample, ForecastSeries, HourlySample, WeatherSnapshot,
};
pub use provider::{WeatherError, WeatherProvider, provider_from_config};
pub use summary::daily_overview;
