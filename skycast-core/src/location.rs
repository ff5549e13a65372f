//! Geolocation seam. Where the coordinates come from (OS service, GPS, a
//! command-line flag) is the caller's business; this module only fixes the
//! contract: a bounded wait, and failures that are distinguishable from
//! network errors.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::WeatherError;
use crate::model::Coordinates;

/// How long to wait for a position before giving up.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, WeatherError>;
}

/// Ask `source` for a position, failing with `WeatherError::Geolocation`
/// once [`LOCATION_TIMEOUT`] elapses.
pub async fn locate(source: &dyn LocationSource) -> Result<Coordinates, WeatherError> {
    match tokio::time::timeout(LOCATION_TIMEOUT, source.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(WeatherError::Geolocation(format!(
            "timed out after {}s",
            LOCATION_TIMEOUT.as_secs()
        ))),
    }
}
