//! Visitor location seam.

use serde::Serialize;

use crate::config::GeoOptions;
use crate::error::LocateError;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One-shot position lookup.
///
/// Implementations must honour `options.timeout_ms` and report a
/// [`LocateError::Timeout`] rather than wait indefinitely.
#[async_trait::async_trait(?Send)]
pub trait Locator {
    /// Resolve the visitor's current position.
    ///
    /// # Errors
    ///
    /// Returns a [`LocateError`] when permission is denied, no fix is
    /// available, or the wait times out.
    async fn locate(&self, options: &GeoOptions) -> Result<Coordinates, LocateError>;
}

/// A locator with a predetermined answer, for the CLI and tests.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    result: Result<Coordinates, LocateError>,
}

impl FixedLocator {
    #[must_use]
    pub fn at(coordinates: Coordinates) -> Self {
        Self { result: Ok(coordinates) }
    }

    #[must_use]
    pub fn failing(error: LocateError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait::async_trait(?Send)]
impl Locator for FixedLocator {
    async fn locate(&self, _options: &GeoOptions) -> Result<Coordinates, LocateError> {
        self.result.clone()
    }
}
