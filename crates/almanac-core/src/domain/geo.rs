use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cached geocoding result for a place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

/// A geocoding result that has not been cached yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGeo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

/// A place as returned by the upstream geocoding service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    /// Localized names keyed by language code (`"fr"`, `"en"`, ...).
    pub local_names: HashMap<String, String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
}

impl GeocodedPlace {
    /// Name to cache the place under: the localized name for `language` when
    /// the upstream result carries a non-empty one, the default name otherwise.
    pub fn preferred_name(&self, language: &str) -> &str {
        self.local_names
            .get(language)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.name.as_str())
    }

    pub fn into_new_geo(self, language: &str) -> NewGeo {
        let name = self.preferred_name(language).to_string();
        NewGeo {
            name,
            latitude: self.latitude,
            longitude: self.longitude,
            country_code: self.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(local_names: &[(&str, &str)]) -> GeocodedPlace {
        GeocodedPlace {
            name: "Athens".to_string(),
            local_names: local_names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            latitude: 37.98,
            longitude: 23.72,
            country: "GR".to_string(),
        }
    }

    #[test]
    fn test_preferred_name_uses_localized_name() {
        let place = place(&[("fr", "Athènes"), ("el", "Αθήνα")]);
        assert_eq!(place.preferred_name("fr"), "Athènes");
        assert_eq!(place.preferred_name("el"), "Αθήνα");
    }

    #[test]
    fn test_preferred_name_falls_back_to_default() {
        assert_eq!(place(&[]).preferred_name("fr"), "Athens");
        assert_eq!(place(&[("fr", "")]).preferred_name("fr"), "Athens");
    }

    #[test]
    fn test_into_new_geo_keeps_coordinates() {
        let geo = place(&[("fr", "Athènes")]).into_new_geo("fr");
        assert_eq!(geo.name, "Athènes");
        assert_eq!(geo.country_code, "GR");
        assert_eq!(geo.latitude, 37.98);
        assert_eq!(geo.longitude, 23.72);
    }
}
