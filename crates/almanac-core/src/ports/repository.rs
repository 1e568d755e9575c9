use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Advice, Geo, Month, MonthlyAdvice, NewGeo, NewUser, NewWeather, User, Weather,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their login.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user; a taken login is a constraint violation.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Month lookups. Months are seeded once and never modified.
#[async_trait]
pub trait MonthRepository: Send + Sync {
    async fn find_by_num(&self, num: u32) -> Result<Option<Month>, RepoError>;

    async fn list_all(&self) -> Result<Vec<Month>, RepoError>;
}

/// Advice repository. Advice owns its month associations, so it does not go
/// through [`BaseRepository`].
#[async_trait]
pub trait AdviceRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Advice>, RepoError>;

    /// All advice tagged with month `num`, ordered by id.
    async fn list_by_month(&self, num: u32) -> Result<Vec<MonthlyAdvice>, RepoError>;

    /// Create one advice per month in `months`, each tagged with that single
    /// month. All rows are written or none are.
    async fn create(&self, detail: &str, months: &[u32]) -> Result<Vec<Advice>, RepoError>;

    /// Replace the month set of advice `id`, and its detail when given.
    /// An empty `months` clears the set. Returns `None` when the advice does
    /// not exist.
    async fn update(
        &self,
        id: i32,
        months: &[u32],
        detail: Option<&str>,
    ) -> Result<Option<Advice>, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Geocoding cache.
#[async_trait]
pub trait GeoRepository: BaseRepository<Geo, i32> {
    /// Exact-match lookup on the cached place name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Geo>, RepoError>;

    async fn create(&self, geo: NewGeo) -> Result<Geo, RepoError>;
}

/// Weather readings cache.
#[async_trait]
pub trait WeatherRepository: BaseRepository<Weather, i32> {
    /// Most recent reading for a geocoded place.
    async fn latest_for_geo(&self, geo_id: i32) -> Result<Option<Weather>, RepoError>;

    async fn create(&self, reading: NewWeather) -> Result<Weather, RepoError>;

    /// Delete every reading fetched before `cutoff`, returning how many were removed.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError>;
}
