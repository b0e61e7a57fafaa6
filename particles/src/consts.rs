//! Shared numeric constants for the particles crate.

// ── Motion ──────────────────────────────────────────────────────

/// How far past a viewport edge (CSS pixels) a particle may travel before it
/// wraps to the opposite side.
pub const WRAP_MARGIN: f64 = 50.0;

/// Horizontal sway applied to leaves per tick, scaled by `sin(angle)`.
pub const LEAF_SWAY: f64 = 0.6;

// ── Rendering ───────────────────────────────────────────────────

/// Stroke width for rain streaks, in CSS pixels.
pub const RAIN_LINE_WIDTH: f64 = 1.0;

/// Leaf ellipse minor axis as a fraction of its radius.
pub const LEAF_ASPECT: f64 = 0.5;

/// Full turn, used for circle and ellipse arcs.
pub const TAU: f64 = std::f64::consts::TAU;
