use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Geo;

/// How long a cached reading is served before the upstream API is called again.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(14_400);

/// Format of the `date` field of a [`WeatherReport`].
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A cached weather reading for a geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub id: i32,
    pub geo_id: i32,
    /// When the reading was fetched from upstream.
    pub date: DateTime<Utc>,
    pub description: String,
}

impl Weather {
    /// A reading is stale once its age strictly exceeds `max_age`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let age = now.signed_duration_since(self.date);
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => age > max_age,
            Err(_) => false,
        }
    }
}

/// A reading that has not been cached yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeather {
    pub geo_id: i32,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// Current conditions as returned by the upstream weather service.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub description: String,
}

/// Where a weather report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    #[serde(rename = "API")]
    Api,
    #[serde(rename = "cache")]
    Cache,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::Api => "API",
            WeatherSource::Cache => "cache",
        }
    }
}

/// Weather for a city, ready to be returned to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub weather: String,
    pub date: String,
    pub from: WeatherSource,
}

impl WeatherReport {
    pub fn new(geo: &Geo, reading: &Weather, from: WeatherSource) -> Self {
        Self {
            city: geo.name.clone(),
            weather: reading.description.clone(),
            date: reading.date.format(REPORT_DATE_FORMAT).to_string(),
            from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(date: DateTime<Utc>) -> Weather {
        Weather {
            id: 1,
            geo_id: 1,
            date,
            description: "ciel dégagé".to_string(),
        }
    }

    #[test]
    fn test_is_stale_boundary() {
        let now = Utc::now();
        let max_age = Duration::from_secs(60);

        assert!(!reading(now).is_stale(now, max_age));
        assert!(!reading(now - chrono::Duration::seconds(60)).is_stale(now, max_age));
        assert!(reading(now - chrono::Duration::seconds(61)).is_stale(now, max_age));
    }

    #[test]
    fn test_report_formats_date() {
        let geo = Geo {
            id: 1,
            name: "Paris".to_string(),
            latitude: 48.85,
            longitude: 2.35,
            country_code: "FR".to_string(),
        };
        let date = Utc.with_ymd_and_hms(2025, 2, 11, 9, 5, 3).unwrap();

        let report = WeatherReport::new(&geo, &reading(date), WeatherSource::Cache);

        assert_eq!(report.city, "Paris");
        assert_eq!(report.weather, "ciel dégagé");
        assert_eq!(report.date, "11/02/2025 09:05:03");
        assert_eq!(report.from, WeatherSource::Cache);
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&WeatherSource::Api).unwrap(),
            "\"API\""
        );
        assert_eq!(
            serde_json::to_string(&WeatherSource::Cache).unwrap(),
            "\"cache\""
        );
    }
}
