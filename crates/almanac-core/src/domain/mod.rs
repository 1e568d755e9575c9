//! Domain entities - the core business objects.

mod advice;
mod geo;
mod month;
mod user;
mod weather;

pub use advice::{Advice, MAX_DETAIL_LEN, MonthlyAdvice};
pub use geo::{GeocodedPlace, Geo, NewGeo};
pub use month::{MONTH_NAMES, Month, parse_month_list, validate_month};
pub use user::{DEFAULT_ROLE, NewUser, User};
pub use weather::{
    CurrentConditions, DEFAULT_CACHE_DURATION, NewWeather, REPORT_DATE_FORMAT, Weather,
    WeatherReport, WeatherSource,
};
