//! Location → weather → selection, with a single seasonal fallback branch.
//!
//! [`resolve`] never fails: every lookup error is logged at `warn` and
//! replaced by the seasonal pick. [`select_and_apply`] hands the result to an
//! [`EffectTarget`] exactly once.

use particles::host::FrameHost;
use particles::surface::Surface;
use particles::{FxController, FxError};
use serde::Serialize;
use time::Date;

use crate::config::SiteConfig;
use crate::locate::{Coordinates, Locator};
use crate::season::{Hemisphere, seasonal_effect};
use crate::weather::{Selection, WeatherSource, weather_selection};

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

/// Why the seasonal pick was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Geolocation was denied, unavailable, or timed out.
    NoLocation,
    /// No weather source is configured.
    WeatherDisabled,
    /// The weather lookup failed.
    WeatherFailed,
}

/// Which path produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "reason", rename_all = "snake_case")]
pub enum Source {
    Weather,
    Seasonal(Fallback),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    pub selection: Selection,
    pub source: Source,
    /// Position used, when one was obtained.
    pub coordinates: Option<Coordinates>,
}

impl Resolution {
    fn seasonal(today: Date, hemisphere: Hemisphere, why: Fallback, coordinates: Option<Coordinates>) -> Self {
        Self {
            selection: Selection::Effect(seasonal_effect(today.month(), hemisphere)),
            source: Source::Seasonal(why),
            coordinates,
        }
    }
}

/// Pick the selection for `today`.
///
/// With a position and a weather source, the live conditions decide. With a
/// position but no source, the season in the visitor's hemisphere decides.
/// Without a position, or when the lookup fails, the season in the
/// configured default hemisphere decides.
pub async fn resolve(
    today: Date,
    config: &SiteConfig,
    locator: &dyn Locator,
    weather: Option<&dyn WeatherSource>,
) -> Resolution {
    let coordinates = match locator.locate(&config.geolocation).await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed; using seasonal effect");
            return Resolution::seasonal(today, config.default_hemisphere, Fallback::NoLocation, None);
        }
    };

    let Some(weather) = weather else {
        let hemisphere = Hemisphere::from_latitude(coordinates.latitude);
        tracing::debug!(%hemisphere, "weather disabled; using seasonal effect");
        return Resolution::seasonal(today, hemisphere, Fallback::WeatherDisabled, Some(coordinates));
    };

    match weather.current(coordinates).await {
        Ok(conditions) => {
            let selection = weather_selection(&conditions, config.hot_threshold_c);
            tracing::debug!(code = conditions.code, temperature_c = conditions.temperature_c, ?selection, "weather selection");
            Resolution { selection, source: Source::Weather, coordinates: Some(coordinates) }
        }
        Err(e) => {
            tracing::warn!(error = %e, "weather lookup failed; using seasonal effect");
            Resolution::seasonal(today, config.default_hemisphere, Fallback::WeatherFailed, Some(coordinates))
        }
    }
}

/// Something that can show a [`Selection`].
pub trait EffectTarget {
    /// # Errors
    ///
    /// Returns an [`FxError`] if the effect could not be started or stopped.
    fn apply(&mut self, selection: Selection) -> Result<(), FxError>;
}

impl<S: Surface, H: FrameHost> EffectTarget for FxController<S, H> {
    fn apply(&mut self, selection: Selection) -> Result<(), FxError> {
        match selection {
            Selection::Effect(kind) => self.start(kind),
            Selection::Hot => self.stop(),
        }
    }
}

/// Resolve and apply once.
///
/// # Errors
///
/// Returns the target's [`FxError`]; resolution itself cannot fail.
pub async fn select_and_apply(
    today: Date,
    config: &SiteConfig,
    locator: &dyn Locator,
    weather: Option<&dyn WeatherSource>,
    target: &mut dyn EffectTarget,
) -> Result<Resolution, FxError> {
    let resolution = resolve(today, config, locator, weather).await;
    tracing::info!(selection = ?resolution.selection, source = ?resolution.source, "effect selected");
    target.apply(resolution.selection)?;
    Ok(resolution)
}
