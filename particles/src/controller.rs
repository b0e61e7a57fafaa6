use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::FxError;
use crate::host::{FrameHandle, FrameHost, ListenerHandle};
use crate::kind::EffectKind;
use crate::particle::{Particle, spawn_set};
use crate::render;
use crate::step::step;
use crate::surface::{Surface, Viewport};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxState {
    Idle,
    Running(EffectKind),
}

/// One active effect: its particles plus the handles it holds on the host.
#[derive(Debug)]
struct Session {
    kind: EffectKind,
    particles: Vec<Particle>,
    frame: Option<FrameHandle>,
    listener: ListenerHandle,
    ticks: u64,
}

/// Owns the single active effect session.
///
/// Holds the injected surface and host; nothing outside this value refers to
/// the session's frame or listener handles. All methods are synchronous and
/// meant to run on the page's single thread.
pub struct FxController<S, H> {
    surface: S,
    host: H,
    rng: SmallRng,
    viewport: Viewport,
    session: Option<Session>,
}

impl<S: Surface, H: FrameHost> FxController<S, H> {
    /// Create an idle controller. `seed` drives all particle randomness.
    #[must_use]
    pub fn new(surface: S, host: H, seed: u64) -> Self {
        let viewport = host.viewport();
        Self { surface, host, rng: SmallRng::seed_from_u64(seed), viewport, session: None }
    }

    // --- Lifecycle ---

    /// Replace whatever is running with a fresh session of `kind`.
    ///
    /// [`EffectKind::None`] tears down and stays idle.
    ///
    /// # Errors
    ///
    /// Returns the first surface or host failure. The previous session is
    /// always torn down first; a failure after that leaves the controller
    /// idle with no frame or listener held.
    pub fn start(&mut self, kind: EffectKind) -> Result<(), FxError> {
        self.stop()?;
        if kind == EffectKind::None {
            return Ok(());
        }

        self.viewport = self.host.viewport();
        self.surface.resize(self.viewport)?;
        self.surface.set_visible(true)?;

        let particles = spawn_set(kind, self.viewport, &mut self.rng);
        let frame = match self.host.request_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.surface.set_visible(false)?;
                return Err(e);
            }
        };
        let listener = match self.host.add_resize_listener() {
            Ok(listener) => listener,
            Err(e) => {
                self.host.cancel_frame(frame);
                self.surface.set_visible(false)?;
                return Err(e);
            }
        };

        tracing::debug!(%kind, particles = particles.len(), "effect session started");
        self.session = Some(Session { kind, particles, frame: Some(frame), listener, ticks: 0 });
        Ok(())
    }

    /// Cancel the loop, detach the resize listener, clear and hide the
    /// surface. Safe to call when idle.
    ///
    /// # Errors
    ///
    /// Returns a surface failure from clearing or hiding. Host handles are
    /// released before the surface is touched.
    pub fn stop(&mut self) -> Result<(), FxError> {
        if let Some(session) = self.session.take() {
            if let Some(frame) = session.frame {
                self.host.cancel_frame(frame);
            }
            self.host.remove_resize_listener(session.listener);
            tracing::debug!(kind = %session.kind, ticks = session.ticks, "effect session stopped");
        }
        self.surface.clear()?;
        self.surface.set_visible(false)
    }

    // --- Host callbacks ---

    /// One display refresh: step, redraw, schedule the next frame.
    ///
    /// # Errors
    ///
    /// Returns a surface or scheduling failure. The session is torn down
    /// before returning, so the controller is idle with no frame or listener
    /// held.
    pub fn on_frame(&mut self) -> Result<(), FxError> {
        let result = self.advance();
        if result.is_err() {
            if let Err(e) = self.stop() {
                tracing::warn!(error = %e, "surface cleanup failed after a broken frame");
            }
        }
        result
    }

    fn advance(&mut self) -> Result<(), FxError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.frame = None;

        for p in &mut session.particles {
            step(p, self.viewport, &mut self.rng);
        }
        self.surface.clear()?;
        render::draw_all(&mut self.surface, &session.particles)?;
        session.ticks += 1;

        session.frame = Some(self.host.request_frame()?);
        Ok(())
    }

    /// Re-fit the surface to the host's viewport. Particles are untouched.
    ///
    /// # Errors
    ///
    /// Returns the surface's resize failure.
    pub fn on_resize(&mut self) -> Result<(), FxError> {
        if self.session.is_none() {
            return Ok(());
        }
        self.viewport = self.host.viewport();
        tracing::trace!(width = self.viewport.width, height = self.viewport.height, "effect surface resized");
        self.surface.resize(self.viewport)
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> FxState {
        self.session.as_ref().map_or(FxState::Idle, |s| FxState::Running(s.kind))
    }

    /// Kind of the running session, or [`EffectKind::None`] when idle.
    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.session.as_ref().map_or(EffectKind::None, |s| s.kind)
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.session.as_ref().map_or(&[], |s| s.particles.as_slice())
    }

    /// Frames rendered by the running session.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.ticks)
    }

    /// Viewport the particles are currently simulated in.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
