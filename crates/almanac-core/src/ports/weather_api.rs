//! Upstream geocoding and weather service port.

use async_trait::async_trait;

use crate::domain::{CurrentConditions, GeocodedPlace};

/// Geocoding + current weather provider (OpenWeatherMap in production).
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve a place name to its best match, if any.
    async fn geocode(&self, city: &str) -> Result<Option<GeocodedPlace>, WeatherApiError>;

    /// Fetch the current conditions at the given coordinates.
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherApiError>;
}

/// Upstream call failures.
#[derive(Debug, thiserror::Error)]
pub enum WeatherApiError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}
