use anyhow::{Context, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use inquire::Text;

use skycast_core::{
    Config, Controller, Coordinates, LastCityStore, LocationSource, OpenWeatherClient, Trigger,
    ViewState, WeatherError, locate,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and optional default city.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "Paris". Omit together with --coords to replay
        /// the last searched city.
        city: Option<String>,

        /// Explicit coordinates as "LAT,LON", e.g. "48.86,2.35".
        #[arg(long, conflicts_with = "city")]
        coords: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city, coords }) => {
                let trigger = match (city, coords) {
                    (_, Some(raw)) => Trigger::Located(resolve_coords(&raw).await?),
                    (Some(city), None) => Trigger::Search(city),
                    (None, None) => startup_trigger()?,
                };
                show(trigger).await
            }
            // Bare invocation behaves like the original page's auto-load.
            None => show(startup_trigger()?).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }
    config.api_key = Some(api_key.to_string());

    let default_city = Text::new("Default city (blank to keep the built-in default):")
        .prompt()
        .context("Failed to read default city")?;
    let default_city = default_city.trim();
    if !default_city.is_empty() {
        config.default_city = Some(default_city.to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn startup_trigger() -> anyhow::Result<Trigger> {
    let config = Config::load()?;
    let city = LastCityStore::open()
        .and_then(|store| store.load())
        .unwrap_or_else(|| config.default_city().to_string());
    Ok(Trigger::Startup(city))
}

async fn show(trigger: Trigger) -> anyhow::Result<()> {
    let config = Config::load()?;
    // Credential check happens before any request is issued.
    let api_key = config.require_api_key()?;

    let client = OpenWeatherClient::with_endpoint(api_key.to_string(), config.endpoint().to_string());
    let mut controller = Controller::new(client, LastCityStore::open());

    tracing::debug!(?trigger, "starting request cycle");
    let state = controller.handle(trigger).await;

    match state {
        ViewState::Error { message } => bail!("{message}"),
        state => {
            println!("{}", render::render(&state, config.icon_base_url()));
            Ok(())
        }
    }
}

/// The `--coords` flag acts as the geolocation result; it still goes
/// through the bounded-wait seam so OS-backed sources slot in unchanged.
async fn resolve_coords(raw: &str) -> anyhow::Result<Coordinates> {
    let source = FlagSource(parse_coords(raw)?);
    Ok(locate(&source).await?)
}

struct FlagSource(Coordinates);

#[async_trait]
impl LocationSource for FlagSource {
    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        Ok(self.0)
    }
}

fn parse_coords(raw: &str) -> anyhow::Result<Coordinates> {
    let (lat, lon) = raw
        .split_once(',')
        .with_context(|| format!("Expected coordinates as LAT,LON, got: {raw}"))?;

    let lat: f64 = lat.trim().parse().with_context(|| format!("Invalid latitude: {lat}"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("Invalid longitude: {lon}"))?;

    if !(-90.0..=90.0).contains(&lat) {
        bail!("Latitude out of range: {lat}");
    }
    if !(-180.0..=180.0).contains(&lon) {
        bail!("Longitude out of range: {lon}");
    }

    Ok(Coordinates { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coords_accepts_lat_lon_pair() {
        let c = parse_coords("48.86, 2.35").expect("valid pair");
        assert_eq!(c.lat, 48.86);
        assert_eq!(c.lon, 2.35);
    }

    #[test]
    fn parse_coords_rejects_missing_comma() {
        assert!(parse_coords("48.86 2.35").is_err());
    }

    #[test]
    fn parse_coords_rejects_out_of_range() {
        assert!(parse_coords("91,0").is_err());
        assert!(parse_coords("0,181").is_err());
    }
}
