//! Application services composing the ports.

mod geo_resolver;
mod weather_resolver;

pub use geo_resolver::GeoResolver;
pub use weather_resolver::WeatherResolver;
