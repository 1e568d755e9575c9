//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod repository;
mod weather_api;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    AdviceRepository, BaseRepository, GeoRepository, MonthRepository, UserRepository,
    WeatherRepository,
};
pub use weather_api::{WeatherApi, WeatherApiError};
