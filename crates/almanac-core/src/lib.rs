//! # Almanac Core
//!
//! The domain layer of the Almanac API: monthly advice, user accounts, and the
//! geocode/weather cache-or-fetch resolution.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
