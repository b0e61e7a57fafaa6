//! Site configuration from a key lookup.
//!
//! The same `SITEFX_*` keys are read from environment variables natively
//! ([`SiteConfig::from_env`]) and from `data-*` attributes on `<body>` in the
//! browser. Blank values count as unset.

use crate::error::ConfigError;
use crate::season::Hemisphere;
use crate::theme::DEFAULT_THEME_KEY;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_GEO_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_GEO_MAX_AGE_MS: u32 = 600_000;
pub const DEFAULT_HOT_THRESHOLD_C: f64 = 30.0;

/// Bounds on the one-shot geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoOptions {
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self { timeout_ms: DEFAULT_GEO_TIMEOUT_MS, maximum_age_ms: DEFAULT_GEO_MAX_AGE_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    /// Weather mode is disabled when no key is set.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_WEATHER_BASE_URL.to_owned() }
    }
}

/// Ids for the third-party contact backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub weather: WeatherConfig,
    pub geolocation: GeoOptions,
    pub hot_threshold_c: f64,
    pub default_hemisphere: Hemisphere,
    pub theme_key: String,
    /// The contact form is inert when unset.
    pub contact: Option<ContactConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            geolocation: GeoOptions::default(),
            hot_threshold_c: DEFAULT_HOT_THRESHOLD_C,
            default_hemisphere: Hemisphere::North,
            theme_key: DEFAULT_THEME_KEY.to_owned(),
            contact: None,
        }
    }
}

impl SiteConfig {
    /// Build config from environment variables.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Optional keys (defaults in parentheses):
    /// - `SITEFX_WEATHER_API_KEY` (unset: weather mode off)
    /// - `SITEFX_WEATHER_BASE_URL` (OpenWeatherMap current weather)
    /// - `SITEFX_GEO_TIMEOUT_MS` (5000), `SITEFX_GEO_MAX_AGE_MS` (600000)
    /// - `SITEFX_HOT_THRESHOLD_C` (30)
    /// - `SITEFX_DEFAULT_HEMISPHERE` (`north`)
    /// - `SITEFX_THEME_KEY` (`preferred-theme`)
    /// - `SITEFX_CONTACT_ENDPOINT` (EmailJS send endpoint)
    /// - `SITEFX_CONTACT_SERVICE_ID`, `SITEFX_CONTACT_TEMPLATE_ID`,
    ///   `SITEFX_CONTACT_PUBLIC_KEY` (all three, or none)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a number or hemisphere does not parse, or
    /// when the contact ids are only partly set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let weather = WeatherConfig {
            api_key: get("SITEFX_WEATHER_API_KEY"),
            base_url: get("SITEFX_WEATHER_BASE_URL")
                .map_or(defaults.weather.base_url, |url| url.trim_end_matches('/').to_owned()),
        };

        let geolocation = GeoOptions {
            timeout_ms: parse_or("SITEFX_GEO_TIMEOUT_MS", get("SITEFX_GEO_TIMEOUT_MS"), DEFAULT_GEO_TIMEOUT_MS)?,
            maximum_age_ms: parse_or("SITEFX_GEO_MAX_AGE_MS", get("SITEFX_GEO_MAX_AGE_MS"), DEFAULT_GEO_MAX_AGE_MS)?,
        };

        let hot_threshold_c =
            parse_or("SITEFX_HOT_THRESHOLD_C", get("SITEFX_HOT_THRESHOLD_C"), DEFAULT_HOT_THRESHOLD_C)?;

        let default_hemisphere = match get("SITEFX_DEFAULT_HEMISPHERE") {
            Some(raw) => raw.parse::<Hemisphere>().map_err(|_| ConfigError::Invalid {
                key: "SITEFX_DEFAULT_HEMISPHERE".into(),
                message: format!("expected 'north' or 'south', got '{raw}'"),
            })?,
            None => defaults.default_hemisphere,
        };

        let contact = contact_config(
            get("SITEFX_CONTACT_ENDPOINT"),
            get("SITEFX_CONTACT_SERVICE_ID"),
            get("SITEFX_CONTACT_TEMPLATE_ID"),
            get("SITEFX_CONTACT_PUBLIC_KEY"),
        )?;

        Ok(Self {
            weather,
            geolocation,
            hot_threshold_c,
            default_hemisphere,
            theme_key: get("SITEFX_THEME_KEY").unwrap_or(defaults.theme_key),
            contact,
        })
    }
}

/// The `<body>` attribute carrying `key` in the browser:
/// `SITEFX_WEATHER_API_KEY` is read from `data-weather-api-key`.
#[must_use]
pub fn data_attribute(key: &str) -> String {
    let name = key.strip_prefix("SITEFX_").unwrap_or(key);
    format!("data-{}", name.to_ascii_lowercase().replace('_', "-"))
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid { key: key.to_owned(), message: format!("'{raw}': {e}") }),
        None => Ok(default),
    }
}

fn contact_config(
    endpoint: Option<String>,
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
) -> Result<Option<ContactConfig>, ConfigError> {
    match (service_id, template_id, public_key) {
        (None, None, None) => Ok(None),
        (Some(service_id), Some(template_id), Some(public_key)) => Ok(Some(ContactConfig {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_CONTACT_ENDPOINT.to_owned()),
            service_id,
            template_id,
            public_key,
        })),
        (None, _, _) => Err(ConfigError::IncompleteContact("SITEFX_CONTACT_SERVICE_ID")),
        (_, None, _) => Err(ConfigError::IncompleteContact("SITEFX_CONTACT_TEMPLATE_ID")),
        (_, _, None) => Err(ConfigError::IncompleteContact("SITEFX_CONTACT_PUBLIC_KEY")),
    }
}
