use std::time::Duration;

const DEFAULT_GEO_COORDINATES_URL: &str =
    "https://api.openweathermap.org/geo/1.0/direct?q={CITY}&limit=1&appid={API_KEY}";
const DEFAULT_CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather?lat={LATITUDE}&lon={LONGITUDE}&appid={API_KEY}&lang={LANGUAGE_CODE}";

/// OpenWeatherMap client configuration.
///
/// Both endpoints are URL templates. `{CITY}`, `{API_KEY}`, `{LATITUDE}`,
/// `{LONGITUDE}` and `{LANGUAGE_CODE}` are replaced with percent-encoded values.
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub geo_coordinates_url: String,
    pub current_weather_url: String,
    /// Language of weather descriptions and of the preferred place names.
    pub language: String,
    pub timeout: Duration,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geo_coordinates_url: DEFAULT_GEO_COORDINATES_URL.to_string(),
            current_weather_url: DEFAULT_CURRENT_WEATHER_URL.to_string(),
            language: "fr".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl OpenWeatherConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = std::env::var("OPENWEATHERMAP_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("OPENWEATHERMAP_API_KEY not set. Upstream weather calls will fail.");
        }

        Self {
            api_key,
            geo_coordinates_url: std::env::var("GEO_COORDINATES_URL")
                .unwrap_or(defaults.geo_coordinates_url),
            current_weather_url: std::env::var("CURRENT_WEATHER_URL")
                .unwrap_or(defaults.current_weather_url),
            language: std::env::var("WEATHER_LANGUAGE")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.language),
            timeout: std::env::var("WEATHER_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Fill the `{NAME}` placeholders of `template`, percent-encoding each value.
pub(crate) fn expand(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |url, (name, value)| {
            url.replace(&format!("{{{name}}}"), &urlencoding::encode(value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_encodes_values() {
        let url = expand(
            "http://geo/direct?q={CITY}&appid={API_KEY}",
            &[("CITY", "São Paulo"), ("API_KEY", "k&y")],
        );
        assert_eq!(url, "http://geo/direct?q=S%C3%A3o%20Paulo&appid=k%26y");
    }

    #[test]
    fn test_expand_leaves_unknown_placeholders() {
        assert_eq!(expand("{A}/{B}", &[("A", "x")]), "x/{B}");
    }
}
