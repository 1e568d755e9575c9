//! City name to coordinates, through the geocoding cache.

use std::sync::Arc;

use crate::domain::Geo;
use crate::error::DomainError;
use crate::ports::{GeoRepository, WeatherApi};

/// Resolves city names to cached coordinates, calling the upstream geocoding
/// service on a cache miss.
pub struct GeoResolver {
    geos: Arc<dyn GeoRepository>,
    api: Arc<dyn WeatherApi>,
    language: String,
}

impl GeoResolver {
    /// `language` selects which localized name a new place is cached under.
    pub fn new(
        geos: Arc<dyn GeoRepository>,
        api: Arc<dyn WeatherApi>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            geos,
            api,
            language: language.into(),
        }
    }

    /// Return the coordinates for `city`, or `None` when the place is unknown
    /// upstream or the geocoding call failed.
    pub async fn resolve(&self, city: &str) -> Result<Option<Geo>, DomainError> {
        if let Some(geo) = self.geos.find_by_name(city).await? {
            tracing::debug!(city = %city, geo_id = geo.id, "Geocoding cache hit");
            return Ok(Some(geo));
        }

        let place = match self.api.geocode(city).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                tracing::info!(city = %city, "City unknown to geocoding service");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Geocoding request failed");
                return Ok(None);
            }
        };

        let new_geo = place.into_new_geo(&self.language);

        // The requested spelling may differ from the name the place is cached under.
        if new_geo.name != city {
            if let Some(geo) = self.geos.find_by_name(&new_geo.name).await? {
                tracing::debug!(
                    city = %city,
                    name = %geo.name,
                    geo_id = geo.id,
                    "Geocoding cache hit under normalized name"
                );
                return Ok(Some(geo));
            }
        }

        let geo = self.geos.create(new_geo).await?;
        tracing::info!(
            city = %city,
            name = %geo.name,
            geo_id = geo.id,
            "Cached new geocoding result"
        );
        Ok(Some(geo))
    }
}
