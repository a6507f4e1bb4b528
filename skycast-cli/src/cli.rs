use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skycast_core::{Config, daily_overview, interpolate_hourly, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current conditions, the hourly strip and the 5-day list for a city.
    Show {
        /// City name, e.g. "London" or "London,GB".
        city: String,

        /// How many of the 24 interpolated hours to print.
        #[arg(long, default_value_t = 12)]
        hours: usize,

        /// Skip the map link line.
        #[arg(long)]
        no_map: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, hours, no_map } => show(&city, hours, no_map).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: &str, hours: usize, no_map: bool) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let (snapshot, forecast) =
        tokio::try_join!(provider.current(city), provider.forecast(city))?;

    // Interpolate against the city's wall clock, not the user's.
    let hourly = interpolate_hourly(&forecast, forecast.local_now())
        .context("Forecast series was unusable")?;
    let daily = daily_overview(&forecast);

    render::current_card(&snapshot);
    render::hourly_strip(&hourly, hours);
    if let Some(first) = hourly.first() {
        render::daily_list(&daily, first.timestamp.date());
    }

    if !no_map {
        render::map_link(&snapshot);
    }

    Ok(())
}
