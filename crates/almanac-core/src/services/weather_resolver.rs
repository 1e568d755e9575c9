//! Current weather for a place, through the readings cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::GeoResolver;
use crate::domain::{Geo, NewWeather, Weather, WeatherReport, WeatherSource};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, WeatherApi, WeatherRepository};

/// Serves weather reports from cached readings while they are fresh, and from
/// the upstream service otherwise.
pub struct WeatherResolver {
    geo: GeoResolver,
    readings: Arc<dyn WeatherRepository>,
    api: Arc<dyn WeatherApi>,
    cache_duration: Duration,
}

impl WeatherResolver {
    pub fn new(
        geo: GeoResolver,
        readings: Arc<dyn WeatherRepository>,
        api: Arc<dyn WeatherApi>,
        cache_duration: Duration,
    ) -> Self {
        Self {
            geo,
            readings,
            api,
            cache_duration,
        }
    }

    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    /// Weather for `city`, or `None` when the city cannot be geocoded.
    pub async fn for_city(&self, city: &str) -> Result<Option<WeatherReport>, DomainError> {
        match self.geo.resolve(city).await? {
            Some(geo) => self.for_geo(&geo).await.map(Some),
            None => Ok(None),
        }
    }

    /// Weather for an already geocoded place.
    pub async fn for_geo(&self, geo: &Geo) -> Result<WeatherReport, DomainError> {
        let cached = self.readings.latest_for_geo(geo.id).await?;

        match cached {
            None => {
                let reading = self.fetch(geo).await?;
                Ok(WeatherReport::new(geo, &reading, WeatherSource::Api))
            }
            Some(stale) if stale.is_stale(Utc::now(), self.cache_duration) => {
                tracing::debug!(geo_id = geo.id, reading_id = stale.id, "Cached reading is stale");
                let reading = self.fetch(geo).await?;
                match self.readings.delete(stale.id).await {
                    // Already removed by a concurrent purge.
                    Ok(()) | Err(RepoError::NotFound) => {}
                    // The scheduled purge picks the row up later.
                    Err(e) => tracing::warn!(
                        geo_id = geo.id,
                        reading_id = stale.id,
                        error = %e,
                        "Failed to evict stale weather reading"
                    ),
                }
                Ok(WeatherReport::new(geo, &reading, WeatherSource::Api))
            }
            Some(reading) => {
                tracing::debug!(geo_id = geo.id, reading_id = reading.id, "Weather cache hit");
                Ok(WeatherReport::new(geo, &reading, WeatherSource::Cache))
            }
        }
    }

    /// Delete every reading older than the cache duration.
    pub async fn purge_stale(&self) -> Result<u64, DomainError> {
        let max_age = chrono::Duration::from_std(self.cache_duration)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let removed = self.readings.delete_older_than(Utc::now() - max_age).await?;

        if removed > 0 {
            tracing::info!(removed, "Purged stale weather readings");
        }
        Ok(removed)
    }

    async fn fetch(&self, geo: &Geo) -> Result<Weather, DomainError> {
        let conditions = self
            .api
            .current_weather(geo.latitude, geo.longitude)
            .await
            .map_err(|e| {
                tracing::warn!(geo_id = geo.id, error = %e, "Weather request failed");
                DomainError::Upstream(e.to_string())
            })?;

        let reading = self
            .readings
            .create(NewWeather {
                geo_id: geo.id,
                date: Utc::now(),
                description: conditions.description,
            })
            .await?;

        tracing::info!(geo_id = geo.id, reading_id = reading.id, "Cached new weather reading");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;

    use super::*;
    use crate::domain::{CurrentConditions, GeocodedPlace, NewGeo};
    use crate::ports::{GeoRepository, WeatherApiError};

    struct NoGeos;

    #[async_trait]
    impl BaseRepository<Geo, i32> for NoGeos {
        async fn find_by_id(&self, _id: i32) -> Result<Option<Geo>, RepoError> {
            Ok(None)
        }

        async fn save(&self, geo: Geo) -> Result<Geo, RepoError> {
            Ok(geo)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl GeoRepository for NoGeos {
        async fn find_by_name(&self, _name: &str) -> Result<Option<Geo>, RepoError> {
            Ok(None)
        }

        async fn create(&self, _geo: NewGeo) -> Result<Geo, RepoError> {
            Err(RepoError::Query("read-only".to_string()))
        }
    }

    /// Readings store whose deletes fail with a query error.
    struct StuckReadings(Mutex<Vec<Weather>>);

    #[async_trait]
    impl BaseRepository<Weather, i32> for StuckReadings {
        async fn find_by_id(&self, id: i32) -> Result<Option<Weather>, RepoError> {
            Ok(self.0.lock().unwrap().iter().find(|w| w.id == id).cloned())
        }

        async fn save(&self, reading: Weather) -> Result<Weather, RepoError> {
            Ok(reading)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Err(RepoError::Query("connection reset".to_string()))
        }
    }

    #[async_trait]
    impl WeatherRepository for StuckReadings {
        async fn latest_for_geo(&self, geo_id: i32) -> Result<Option<Weather>, RepoError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.geo_id == geo_id)
                .max_by_key(|w| w.date)
                .cloned())
        }

        async fn create(&self, reading: NewWeather) -> Result<Weather, RepoError> {
            let mut rows = self.0.lock().unwrap();
            let reading = Weather {
                id: rows.len() as i32 + 1,
                geo_id: reading.geo_id,
                date: reading.date,
                description: reading.description,
            };
            rows.push(reading.clone());
            Ok(reading)
        }

        async fn delete_older_than(&self, _cutoff: DateTime<Utc>) -> Result<u64, RepoError> {
            Ok(0)
        }
    }

    struct Drizzle;

    #[async_trait]
    impl WeatherApi for Drizzle {
        async fn geocode(&self, _city: &str) -> Result<Option<GeocodedPlace>, WeatherApiError> {
            Ok(None)
        }

        async fn current_weather(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<CurrentConditions, WeatherApiError> {
            Ok(CurrentConditions {
                description: "bruine légère".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_failed_eviction_still_serves_fresh_reading() {
        let geo = Geo {
            id: 4,
            name: "Brest".to_string(),
            latitude: 48.39,
            longitude: -4.49,
            country_code: "FR".to_string(),
        };
        let old = Weather {
            id: 1,
            geo_id: geo.id,
            date: Utc::now() - chrono::Duration::hours(5),
            description: "averses".to_string(),
        };
        let readings = Arc::new(StuckReadings(Mutex::new(vec![old])));
        let api: Arc<dyn WeatherApi> = Arc::new(Drizzle);
        let resolver = WeatherResolver::new(
            GeoResolver::new(Arc::new(NoGeos), api.clone(), "fr"),
            readings.clone(),
            api,
            Duration::from_secs(3_600),
        );

        let report = resolver.for_geo(&geo).await.unwrap();

        assert_eq!(report.from, WeatherSource::Api);
        assert_eq!(report.weather, "bruine légère");
        // The new reading is cached and wins over the leftover row.
        let latest = readings.latest_for_geo(geo.id).await.unwrap().unwrap();
        assert_eq!(latest.description, "bruine légère");
        assert_eq!(readings.0.lock().unwrap().len(), 2);
    }
}
