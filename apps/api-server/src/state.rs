//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use almanac_core::ports::{
    AdviceRepository, GeoRepository, MonthRepository, UserRepository, WeatherApi,
    WeatherRepository,
};
use almanac_core::services::{GeoResolver, WeatherResolver};
use almanac_infra::{
    InMemoryAdviceRepository, InMemoryGeoRepository, InMemoryMonthRepository,
    InMemoryUserRepository, InMemoryWeatherRepository,
};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use almanac_infra::database::{
    DatabaseConnections, PostgresAdviceRepository, PostgresGeoRepository,
    PostgresMonthRepository, PostgresUserRepository, PostgresWeatherRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub advices: Arc<dyn AdviceRepository>,
    pub months: Arc<dyn MonthRepository>,
    pub users: Arc<dyn UserRepository>,
    pub weather: Arc<WeatherResolver>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

struct Repositories {
    advices: Arc<dyn AdviceRepository>,
    months: Arc<dyn MonthRepository>,
    users: Arc<dyn UserRepository>,
    geos: Arc<dyn GeoRepository>,
    readings: Arc<dyn WeatherRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            advices: Arc::new(InMemoryAdviceRepository::new()),
            months: Arc::new(InMemoryMonthRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            geos: Arc::new(InMemoryGeoRepository::new()),
            readings: Arc::new(InMemoryWeatherRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            advices: Arc::new(PostgresAdviceRepository::new(db.main.clone())),
            months: Arc::new(PostgresMonthRepository::new(db.main.clone())),
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
            geos: Arc::new(PostgresGeoRepository::new(db.main.clone())),
            readings: Arc::new(PostgresWeatherRepository::new(db.main.clone())),
        }
    }
}

impl AppState {
    /// Build the application state, on Postgres when it is reachable.
    pub async fn new(config: &AppConfig, api: Arc<dyn WeatherApi>) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repos) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let repos = Repositories::postgres(&connections);
                    (Some(Arc::new(connections)), repos)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, Repositories::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        #[allow(unused_mut)]
        let mut state = Self::assemble(
            repos,
            api,
            &config.weather.language,
            config.cache_duration,
        );

        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        tracing::info!(
            cache_duration_secs = config.cache_duration.as_secs(),
            "Application state initialized"
        );
        state
    }

    /// State backed by in-memory repositories.
    #[cfg(test)]
    pub fn in_memory(api: Arc<dyn WeatherApi>, cache_duration: Duration) -> Self {
        Self::assemble(Repositories::in_memory(), api, "fr", cache_duration)
    }

    fn assemble(
        repos: Repositories,
        api: Arc<dyn WeatherApi>,
        language: &str,
        cache_duration: Duration,
    ) -> Self {
        let geo = GeoResolver::new(repos.geos, api.clone(), language);
        let weather = WeatherResolver::new(geo, repos.readings, api, cache_duration);

        Self {
            advices: repos.advices,
            months: repos.months,
            users: repos.users,
            weather: Arc::new(weather),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
