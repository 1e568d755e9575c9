//! OpenWeatherMap geocoding + current weather client.

mod client;
mod config;

pub use client::OpenWeatherClient;
pub use config::OpenWeatherConfig;
