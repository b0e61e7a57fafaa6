//! Current-weather lookup and the weather-to-effect mapping.
//!
//! Thin HTTP wrapper over an OpenWeatherMap-style "current weather" endpoint.
//! Parsing is a pure function for testability. There is no request timeout:
//! the lookup relies on the transport's own behaviour, and any failure is
//! turned into the seasonal fallback by the caller.

use particles::EffectKind;
use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::locate::Coordinates;

#[cfg(test)]
#[path = "weather_test.rs"]
mod weather_test;

/// Condition code assumed when the response omits one ("clear sky").
pub const CLEAR_CONDITION: u32 = 800;

/// Temperature assumed when the response omits one, in °C.
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;

/// Class set on `<body>` for the hot visual state.
pub const HOT_CLASS: &str = "hot";

const UNITS: &str = "metric";

// =============================================================================
// SELECTION
// =============================================================================

/// What the overlay should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// Run a particle effect (`none` means no particles).
    Effect(EffectKind),
    /// Too hot for particles: switch the page to its hot visual state.
    Hot,
}

impl Selection {
    /// The particle kind to run; [`Selection::Hot`] runs none.
    #[must_use]
    pub fn kind(self) -> EffectKind {
        match self {
            Selection::Effect(kind) => kind,
            Selection::Hot => EffectKind::None,
        }
    }
}

/// Current conditions as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conditions {
    pub code: u32,
    pub temperature_c: f64,
}

impl Conditions {
    /// Condition group: the code's hundreds digit (2 thunder, 3 drizzle,
    /// 5 rain, 6 snow, 7 atmosphere, 8 clear/clouds).
    #[must_use]
    pub fn group(&self) -> u32 {
        self.code / 100
    }
}

/// Map conditions to a selection.
///
/// Precipitation wins over temperature. Groups without an effect (fog,
/// clouds, clear) select no particles unless it is hot.
#[must_use]
pub fn weather_selection(conditions: &Conditions, hot_threshold_c: f64) -> Selection {
    match conditions.group() {
        2 | 3 | 5 => Selection::Effect(EffectKind::Rain),
        6 => Selection::Effect(EffectKind::Snow),
        _ if conditions.temperature_c >= hot_threshold_c => Selection::Hot,
        _ => Selection::Effect(EffectKind::None),
    }
}

// =============================================================================
// SOURCE
// =============================================================================

/// Anything that can report current conditions at a position.
#[async_trait::async_trait(?Send)]
pub trait WeatherSource {
    /// Fetch current conditions at `at`.
    ///
    /// # Errors
    ///
    /// Returns a [`WeatherError`] on transport failure, a non-success status,
    /// or an unparseable body.
    async fn current(&self, at: Coordinates) -> Result<Conditions, WeatherError>;
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Build a client for `config`, or `None` when no API key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::HttpClientBuild`] if the HTTP client fails to
    /// build.
    pub fn from_config(config: &WeatherConfig) -> Result<Option<Self>, WeatherError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        Self::new(config.base_url.clone(), api_key).map(Some)
    }

    /// # Errors
    ///
    /// Returns [`WeatherError::HttpClientBuild`] if the HTTP client fails to
    /// build.
    pub fn new(base_url: String, api_key: String) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| WeatherError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, api_key })
    }
}

#[async_trait::async_trait(?Send)]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, at: Coordinates) -> Result<Conditions, WeatherError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", UNITS.to_owned()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(WeatherError::Status { status });
        }

        parse_conditions(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    weather: Vec<ApiCondition>,
    main: Option<ApiMain>,
}

#[derive(Deserialize)]
struct ApiCondition {
    id: Option<u32>,
}

#[derive(Deserialize)]
struct ApiMain {
    temp: Option<f64>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a current-weather body. Missing fields take the clear/25 °C
/// defaults; a body that is not a JSON object of the expected shape fails.
///
/// # Errors
///
/// Returns [`WeatherError::Parse`] if the body does not deserialize.
pub fn parse_conditions(json: &str) -> Result<Conditions, WeatherError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let code = api
        .weather
        .first()
        .and_then(|c| c.id)
        .unwrap_or(CLEAR_CONDITION);
    let temperature_c = api
        .main
        .and_then(|m| m.temp)
        .unwrap_or(DEFAULT_TEMPERATURE_C);

    Ok(Conditions { code, temperature_c })
}
