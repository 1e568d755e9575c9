use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use almanac_core::domain::{NewWeather, Weather};
use almanac_core::error::RepoError;
use almanac_core::ports::{BaseRepository, WeatherRepository};

use super::Table;

/// In-memory weather readings cache.
pub struct InMemoryWeatherRepository {
    store: RwLock<Table<Weather>>,
}

impl InMemoryWeatherRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Table::new()),
        }
    }

    /// Number of cached readings.
    pub async fn count(&self) -> usize {
        self.store.read().await.rows.len()
    }
}

impl Default for InMemoryWeatherRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Weather, i32> for InMemoryWeatherRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Weather>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn save(&self, reading: Weather) -> Result<Weather, RepoError> {
        let mut store = self.store.write().await;
        let row = store.rows.get_mut(&reading.id).ok_or(RepoError::NotFound)?;
        *row = reading.clone();
        Ok(reading)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl WeatherRepository for InMemoryWeatherRepository {
    async fn latest_for_geo(&self, geo_id: i32) -> Result<Option<Weather>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|w| w.geo_id == geo_id)
            .max_by_key(|w| w.date)
            .cloned())
    }

    async fn create(&self, reading: NewWeather) -> Result<Weather, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.insert_with(|id| Weather {
            id,
            geo_id: reading.geo_id,
            date: reading.date,
            description: reading.description,
        }))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let before = store.rows.len();
        store.rows.retain(|_, w| w.date >= cutoff);
        Ok((before - store.rows.len()) as u64)
    }
}
