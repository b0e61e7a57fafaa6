//! The drawing-surface seam and a headless recorder.
//!
//! Coordinates passed to a [`Surface`] are CSS pixels. Implementations map
//! them to device pixels using the [`Viewport`] they were last resized to.

use crate::error::FxError;

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

/// Size of the drawing area in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

fn finite_size(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl Viewport {
    /// Negative or non-finite sizes collapse to zero; a non-positive or
    /// non-finite `dpr` falls back to 1.
    #[must_use]
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width: finite_size(width),
            height: finite_size(height),
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// Backing-store width in device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn device_width(&self) -> u32 {
        (self.width * self.dpr).round() as u32
    }

    /// Backing-store height in device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn device_height(&self) -> u32 {
        (self.height * self.dpr).round() as u32
    }
}

/// An RGBA colour. Channels are 0-255, alpha is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Paint {
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba(...)` form accepted by the canvas fill and stroke styles.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// A resizable 2D painting target.
pub trait Surface {
    /// Fit the backing store to `viewport` and scale drawing by its dpr.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the underlying context rejects the
    /// new transform.
    fn resize(&mut self, viewport: Viewport) -> Result<(), FxError>;

    /// Erase everything drawn so far.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the clear cannot be issued.
    fn clear(&mut self) -> Result<(), FxError>;

    /// Show or hide the surface without touching its contents.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the visibility style cannot be set.
    fn set_visible(&mut self, visible: bool) -> Result<(), FxError>;

    /// Stroke a straight line.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the draw call fails.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: Paint) -> Result<(), FxError>;

    /// Fill a circle.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the draw call fails.
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError>;

    /// Fill an ellipse rotated by `rotation` radians about its centre.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the draw call fails.
    fn fill_ellipse(
        &mut self,
        center: (f64, f64),
        radii: (f64, f64),
        rotation: f64,
        paint: Paint,
    ) -> Result<(), FxError>;

    /// Fill a circle with a radial gradient from `paint` at the centre to
    /// fully transparent at the rim.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the gradient or draw call fails.
    fn fill_radial(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError>;
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line { from: (f64, f64), to: (f64, f64), width: f64, paint: Paint },
    Circle { center: (f64, f64), radius: f64, paint: Paint },
    Ellipse { center: (f64, f64), radii: (f64, f64), rotation: f64, paint: Paint },
    Radial { center: (f64, f64), radius: f64, paint: Paint },
}

impl DrawCall {
    /// Short primitive name, used for summaries.
    #[must_use]
    pub fn primitive(&self) -> &'static str {
        match self {
            DrawCall::Line { .. } => "line",
            DrawCall::Circle { .. } => "circle",
            DrawCall::Ellipse { .. } => "ellipse",
            DrawCall::Radial { .. } => "radial",
        }
    }

    #[must_use]
    pub fn paint(&self) -> Paint {
        match self {
            DrawCall::Line { paint, .. }
            | DrawCall::Circle { paint, .. }
            | DrawCall::Ellipse { paint, .. }
            | DrawCall::Radial { paint, .. } => *paint,
        }
    }
}

/// Headless surface that records the calls made since the last clear.
///
/// Used by the CLI simulator and by tests.
#[derive(Debug, Default)]
pub struct Recorder {
    viewport: Viewport,
    visible: bool,
    calls: Vec<DrawCall>,
    clears: usize,
    total_calls: usize,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls issued since the last clear.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// True when nothing has been drawn since the last clear.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.calls.is_empty()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of clears issued over the recorder's lifetime.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Number of draw calls issued over the recorder's lifetime.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.total_calls
    }

    fn push(&mut self, call: DrawCall) {
        self.total_calls += 1;
        self.calls.push(call);
    }
}

impl Surface for Recorder {
    fn resize(&mut self, viewport: Viewport) -> Result<(), FxError> {
        self.viewport = viewport;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), FxError> {
        self.calls.clear();
        self.clears += 1;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), FxError> {
        self.visible = visible;
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: Paint) -> Result<(), FxError> {
        self.push(DrawCall::Line { from, to, width, paint });
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError> {
        self.push(DrawCall::Circle { center, radius, paint });
        Ok(())
    }

    fn fill_ellipse(
        &mut self,
        center: (f64, f64),
        radii: (f64, f64),
        rotation: f64,
        paint: Paint,
    ) -> Result<(), FxError> {
        self.push(DrawCall::Ellipse { center, radii, rotation, paint });
        Ok(())
    }

    fn fill_radial(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError> {
        self.push(DrawCall::Radial { center, radius, paint });
        Ok(())
    }
}
