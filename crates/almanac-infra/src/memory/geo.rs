use async_trait::async_trait;
use tokio::sync::RwLock;

use almanac_core::domain::{Geo, NewGeo};
use almanac_core::error::RepoError;
use almanac_core::ports::{BaseRepository, GeoRepository};

use super::Table;

/// In-memory geocoding cache.
pub struct InMemoryGeoRepository {
    store: RwLock<Table<Geo>>,
}

impl InMemoryGeoRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Table::new()),
        }
    }

    /// Number of cached places.
    pub async fn count(&self) -> usize {
        self.store.read().await.rows.len()
    }
}

impl Default for InMemoryGeoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Geo, i32> for InMemoryGeoRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Geo>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn save(&self, geo: Geo) -> Result<Geo, RepoError> {
        let mut store = self.store.write().await;
        let row = store.rows.get_mut(&geo.id).ok_or(RepoError::NotFound)?;
        *row = geo.clone();
        Ok(geo)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl GeoRepository for InMemoryGeoRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Geo>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.values().find(|g| g.name == name).cloned())
    }

    async fn create(&self, new_geo: NewGeo) -> Result<Geo, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.insert_with(|id| Geo {
            id,
            name: new_geo.name,
            latitude: new_geo.latitude,
            longitude: new_geo.longitude,
            country_code: new_geo.country_code,
        }))
    }
}
