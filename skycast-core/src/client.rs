//! OpenWeatherMap HTTP client: current conditions and the 5-day / 3-hour
//! forecast. Two separate calls by design — the forecast endpoint wants
//! coordinates, which only the current-conditions response resolves for a
//! free-text city query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{Coordinates, Query, WeatherSample};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn/";

/// Seam between the view-state controller and the network. The controller
/// only cares about these two operations, so tests can script them.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn fetch_current(&self, query: &Query) -> Result<WeatherSample, WeatherError>;
    async fn fetch_forecast(&self, coords: Coordinates)
    -> Result<Vec<WeatherSample>, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    /// Point the client at a different base URL, e.g. a mock server in tests.
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http: Client::new(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Remote(remote_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn fetch_current(&self, query: &Query) -> Result<WeatherSample, WeatherError> {
        let url = format!("{}/weather", self.endpoint);

        let parsed: OwCurrentResponse = match query {
            Query::City(city) => {
                self.get_json(
                    &url,
                    &[
                        ("q", city.as_str()),
                        ("appid", self.api_key.as_str()),
                        ("units", "metric"),
                    ],
                )
                .await?
            }
            Query::Coords(c) => {
                self.get_json(
                    &url,
                    &[
                        ("lat", c.lat.to_string().as_str()),
                        ("lon", c.lon.to_string().as_str()),
                        ("appid", self.api_key.as_str()),
                        ("units", "metric"),
                    ],
                )
                .await?
            }
        };

        let condition = parsed.weather.into_iter().next().unwrap_or_default();

        Ok(WeatherSample {
            observation_time: unix_to_utc(parsed.dt),
            condition_id: condition.id,
            condition: condition.description,
            icon: condition.icon,
            temperature_c: parsed.main.temp,
            temp_min_c: None,
            temp_max_c: None,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            location_name: Some(parsed.name),
            country: Some(parsed.sys.country),
            coords: Some(Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            }),
        })
    }

    async fn fetch_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<WeatherSample>, WeatherError> {
        let url = format!("{}/forecast", self.endpoint);

        let parsed: OwForecastResponse = self
            .get_json(
                &url,
                &[
                    ("lat", coords.lat.to_string().as_str()),
                    ("lon", coords.lon.to_string().as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = entry.weather.into_iter().next().unwrap_or_default();
                WeatherSample {
                    observation_time: unix_to_utc(entry.dt),
                    condition_id: condition.id,
                    condition: condition.description,
                    icon: condition.icon,
                    temperature_c: entry.main.temp,
                    temp_min_c: Some(entry.main.temp_min),
                    temp_max_c: Some(entry.main.temp_max),
                    humidity_pct: entry.main.humidity,
                    wind_speed_mps: entry.wind.speed,
                    location_name: None,
                    country: None,
                    coords: None,
                }
            })
            .collect())
    }
}

/// Build the icon image URL for a condition icon code, e.g. `10d` →
/// `https://openweathermap.org/img/wn/10d@2x.png`.
pub fn icon_url(icon_base_url: &str, icon: &str) -> String {
    format!("{icon_base_url}{icon}@2x.png")
}

/// Upstream errors carry their detail in a top-level `message` field; show
/// that text verbatim when present.
fn remote_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct OwError {
        message: String,
    }

    match serde_json::from_str::<OwError>(body) {
        Ok(err) => err.message,
        Err(_) => format!("Weather service error: {}", truncate_body(body)),
    }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwCondition {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
