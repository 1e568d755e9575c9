use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use almanac_core::domain::{CurrentConditions, GeocodedPlace};
use almanac_core::ports::{WeatherApi, WeatherApiError};

use super::config::{OpenWeatherConfig, expand};

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    #[serde(default)]
    local_names: Option<HashMap<String, String>>,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

/// HTTP client for the OpenWeatherMap geocoding and current weather endpoints.
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherApiError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn geocode(&self, city: &str) -> Result<Option<GeocodedPlace>, WeatherApiError> {
        let url = expand(
            &self.config.geo_coordinates_url,
            &[("CITY", city), ("API_KEY", &self.config.api_key)],
        );
        tracing::debug!(city = %city, "Calling geocoding endpoint");

        let results: Vec<GeocodingResult> = self.get_json(&url).await?;

        Ok(results.into_iter().next().map(|result| GeocodedPlace {
            name: result.name,
            local_names: result.local_names.unwrap_or_default(),
            latitude: result.lat,
            longitude: result.lon,
            country: result.country,
        }))
    }

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherApiError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let url = expand(
            &self.config.current_weather_url,
            &[
                ("LATITUDE", &latitude),
                ("LONGITUDE", &longitude),
                ("API_KEY", &self.config.api_key),
                ("LANGUAGE_CODE", &self.config.language),
            ],
        );
        tracing::debug!(lat = %latitude, lon = %longitude, "Calling current weather endpoint");

        let body: CurrentWeatherResponse = self.get_json(&url).await?;

        let description = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| WeatherApiError::Decode("missing weather[0]".to_string()))?;

        Ok(CurrentConditions { description })
    }
}
