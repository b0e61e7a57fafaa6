//! One simulation tick for one particle.
//!
//! Particles never leave the viewport extended by [`WRAP_MARGIN`]: one that
//! crosses the margin is moved just outside the opposite edge at a fresh
//! random coordinate along that edge, so the set size stays constant.

use rand::Rng;

use crate::consts::{LEAF_SWAY, WRAP_MARGIN};
use crate::particle::{Particle, Shape};
use crate::surface::Viewport;

#[cfg(test)]
#[path = "step_test.rs"]
mod step_test;

/// Advance `p` by one tick inside `viewport`.
pub fn step<R: Rng>(p: &mut Particle, viewport: Viewport, rng: &mut R) {
    p.x += p.vx;
    p.y += p.vy;

    if let Shape::Leaf { angle, spin, .. } = &mut p.shape {
        *angle += *spin;
        p.x += angle.sin() * LEAF_SWAY;
    }

    wrap(p, viewport, rng);
}

/// Re-enter `p` from the opposite side if it has drifted past the margin.
pub fn wrap<R: Rng>(p: &mut Particle, viewport: Viewport, rng: &mut R) {
    let right = viewport.width + WRAP_MARGIN;
    let bottom = viewport.height + WRAP_MARGIN;

    if p.x < -WRAP_MARGIN {
        p.x = right;
        p.y = rng.random_range(0.0..=viewport.height);
    } else if p.x > right {
        p.x = -WRAP_MARGIN;
        p.y = rng.random_range(0.0..=viewport.height);
    }

    if p.y < -WRAP_MARGIN {
        p.y = bottom;
        p.x = rng.random_range(0.0..=viewport.width);
    } else if p.y > bottom {
        p.y = -WRAP_MARGIN;
        p.x = rng.random_range(0.0..=viewport.width);
    }
}

/// True when `p` is inside the viewport extended by the wrap margin.
#[must_use]
pub fn in_bounds(p: &Particle, viewport: Viewport) -> bool {
    (-WRAP_MARGIN..=viewport.width + WRAP_MARGIN).contains(&p.x)
        && (-WRAP_MARGIN..=viewport.height + WRAP_MARGIN).contains(&p.y)
}
