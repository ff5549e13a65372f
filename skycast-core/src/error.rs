use thiserror::Error;

/// Errors surfaced by skycast-core.
///
/// `Remote` carries the upstream service's own `message` text so it can be
/// shown to the user verbatim; `Network` wraps transport failures and is
/// rendered generically.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No API key configured. Run `skycast configure` first.")]
    Config,

    #[error("Please enter a city name.")]
    EmptyInput,

    #[error("{0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Geolocation failed: {0}")]
    Geolocation(String),
}
