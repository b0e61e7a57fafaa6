//! Particle state and per-kind random spawning.

use rand::Rng;

use crate::consts::TAU;
use crate::kind::EffectKind;
use crate::surface::Viewport;

#[cfg(test)]
#[path = "particle_test.rs"]
mod particle_test;

/// Kind-specific attributes. The variant never changes after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A falling streak `length` pixels long.
    Rain { length: f64 },
    /// A flake.
    Snow { radius: f64 },
    /// A tumbling leaf; `angle` accumulates `spin` every tick.
    Leaf { radius: f64, angle: f64, spin: f64 },
    /// A faint sparkle drifting upward.
    Sun { radius: f64, opacity: f64 },
    /// A large soft blob.
    Mist { radius: f64, opacity: f64 },
}

/// One particle: position and per-tick velocity in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub shape: Shape,
}

impl Particle {
    /// Spawn a particle of `kind` at a uniform random position in `viewport`.
    ///
    /// Returns `None` for [`EffectKind::None`], which has no particles.
    pub fn spawn<R: Rng>(kind: EffectKind, viewport: Viewport, rng: &mut R) -> Option<Self> {
        let x = rng.random_range(0.0..=viewport.width);
        let y = rng.random_range(0.0..=viewport.height);

        let (vx, vy, shape) = match kind {
            EffectKind::Rain => (
                rng.random_range(-2.0..-0.5),
                rng.random_range(10.0..20.0),
                Shape::Rain { length: rng.random_range(12.0..24.0) },
            ),
            EffectKind::Snow => (
                rng.random_range(-0.5..0.5),
                rng.random_range(0.8..2.8),
                Shape::Snow { radius: rng.random_range(1.0..4.0) },
            ),
            EffectKind::Leaves => (
                rng.random_range(-0.6..0.6),
                rng.random_range(0.6..1.6),
                Shape::Leaf {
                    radius: rng.random_range(5.0..10.0),
                    angle: rng.random_range(0.0..TAU),
                    spin: rng.random_range(-0.04..0.04),
                },
            ),
            EffectKind::Sun => (
                rng.random_range(-0.2..0.2),
                rng.random_range(-0.3..-0.05),
                Shape::Sun { radius: rng.random_range(20.0..60.0), opacity: rng.random_range(0.03..0.1) },
            ),
            EffectKind::Mist => (
                rng.random_range(-0.4..0.4),
                rng.random_range(-0.05..0.05),
                Shape::Mist { radius: rng.random_range(80.0..180.0), opacity: rng.random_range(0.04..0.12) },
            ),
            EffectKind::None => return None,
        };

        Some(Self { x, y, vx, vy, shape })
    }

    /// The effect kind this particle belongs to.
    #[must_use]
    pub fn kind(&self) -> EffectKind {
        match self.shape {
            Shape::Rain { .. } => EffectKind::Rain,
            Shape::Snow { .. } => EffectKind::Snow,
            Shape::Leaf { .. } => EffectKind::Leaves,
            Shape::Sun { .. } => EffectKind::Sun,
            Shape::Mist { .. } => EffectKind::Mist,
        }
    }
}

/// Spawn the full particle set for a session of `kind`.
pub fn spawn_set<R: Rng>(kind: EffectKind, viewport: Viewport, rng: &mut R) -> Vec<Particle> {
    (0..kind.particle_count())
        .filter_map(|_| Particle::spawn(kind, viewport, rng))
        .collect()
}
