//! Rendering: draws particles onto a [`Surface`].
//!
//! This module only reads particle state. Every primitive uses a
//! semi-transparent white or near-white paint so the overlay reads on any
//! page background.

use crate::consts::{LEAF_ASPECT, RAIN_LINE_WIDTH};
use crate::error::FxError;
use crate::particle::{Particle, Shape};
use crate::surface::{Paint, Surface};

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

pub const RAIN_PAINT: Paint = Paint::rgba(255, 255, 255, 0.35);
pub const SNOW_PAINT: Paint = Paint::rgba(255, 255, 255, 0.8);
pub const LEAF_PAINT: Paint = Paint::rgba(255, 250, 240, 0.55);
pub const SUN_PAINT: Paint = Paint::rgba(255, 255, 240, 1.0);
pub const MIST_PAINT: Paint = Paint::rgba(255, 255, 255, 1.0);

/// Draw every particle in order.
///
/// # Errors
///
/// Stops at and returns the first failing draw call.
pub fn draw_all<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle]) -> Result<(), FxError> {
    for p in particles {
        draw(surface, p)?;
    }
    Ok(())
}

/// Draw one particle.
///
/// # Errors
///
/// Returns the surface's error if the draw call fails.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, p: &Particle) -> Result<(), FxError> {
    match p.shape {
        Shape::Rain { length } => draw_rain(surface, p, length),
        Shape::Snow { radius } => surface.fill_circle((p.x, p.y), radius, SNOW_PAINT),
        Shape::Leaf { radius, angle, .. } => {
            surface.fill_ellipse((p.x, p.y), (radius, radius * LEAF_ASPECT), angle, LEAF_PAINT)
        }
        Shape::Sun { radius, opacity } => surface.fill_circle((p.x, p.y), radius, SUN_PAINT.with_alpha(opacity)),
        Shape::Mist { radius, opacity } => surface.fill_radial((p.x, p.y), radius, MIST_PAINT.with_alpha(opacity)),
    }
}

/// Rain is a streak trailing along its own velocity.
fn draw_rain<S: Surface + ?Sized>(surface: &mut S, p: &Particle, length: f64) -> Result<(), FxError> {
    let slant = if p.vy.abs() > f64::EPSILON { p.vx / p.vy } else { 0.0 };
    let to = (p.x + slant * length, p.y + length);
    surface.stroke_line((p.x, p.y), to, RAIN_LINE_WIDTH, RAIN_PAINT)
}
