//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Shared domain models (weather samples, daily forecasts, view state)
//! - The OpenWeatherMap client (current conditions + 5-day forecast)
//! - The daily reducer collapsing 3-hour forecast entries to one per day
//! - The view-state controller sequencing one request cycle
//! - Configuration & last-city persistence
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod controller;
pub mod daily;
pub mod error;
pub mod location;
pub mod model;
pub mod store;

pub use client::{OpenWeatherClient, WeatherApi, icon_url};
pub use config::{Config, DEFAULT_CITY};
pub use controller::{Controller, Trigger, ViewState};
pub use daily::reduce_to_daily;
pub use error::WeatherError;
pub use location::{LocationSource, locate};
pub use model::{Coordinates, DailyForecast, Query, WeatherSample};
pub use store::LastCityStore;
