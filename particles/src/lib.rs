//! Decorative weather particle engine for the site's canvas overlay.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! the simulation is written against two small seams so it can be driven
//! natively as well: a [`surface::Surface`] to draw on and a
//! [`host::FrameHost`] that schedules frames and resize notifications. The
//! browser implementations of both live in [`web`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`kind`] | The closed set of effect kinds |
//! | [`particle`] | Particle state and per-kind random spawning |
//! | [`step`] | One simulation tick for one particle, including edge wrap |
//! | [`render`] | Draws one particle onto a surface |
//! | [`controller`] | Owns the active session; start/stop/frame/resize |
//! | [`surface`] | Drawing-surface trait, paints, and the headless [`surface::Recorder`] |
//! | [`host`] | Frame/listener scheduling trait and the headless [`host::ManualHost`] |
//! | [`web`] | Canvas 2D surface and `requestAnimationFrame` host |
//! | [`consts`] | Shared numeric constants (wrap margin, sway) |

pub mod consts;
pub mod controller;
pub mod error;
pub mod host;
pub mod kind;
pub mod particle;
pub mod render;
pub mod step;
pub mod surface;
pub mod web;

pub use controller::{FxController, FxState};
pub use error::FxError;
pub use kind::EffectKind;
