//! # Almanac Infrastructure
//!
//! Concrete implementations of the ports defined in `almanac-core`.
//! This crate contains database, upstream weather service, and auth integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory repositories only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Rate limiting via governor

pub mod database;
pub mod memory;
pub mod openweather;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use memory::{
    InMemoryAdviceRepository, InMemoryGeoRepository, InMemoryMonthRepository,
    InMemoryUserRepository, InMemoryWeatherRepository,
};
pub use openweather::{OpenWeatherClient, OpenWeatherConfig};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
