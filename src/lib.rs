//! Site script for the marketing pages: theme, navigation, contact form,
//! scroll reveal, footer year, and the weather-driven particle overlay.
//!
//! Everything outside [`web`] is browser-independent and unit tested; the
//! particle engine itself lives in the `particles` crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`season`] | Month + hemisphere → seasonal effect |
//! | [`weather`] | Condition code + temperature → selection; weather HTTP client |
//! | [`locate`] | Geolocation seam |
//! | [`pipeline`] | Locate → weather → selection with seasonal fallback; apply once |
//! | [`config`] | `SITEFX_*` configuration |
//! | [`theme`] | Light/dark preference and toggle |
//! | [`nav`] | Menu open/close |
//! | [`reveal`] | Scroll-reveal bookkeeping |
//! | [`footer`] | Copyright year |
//! | [`contact`] | Contact form validation, submit flow, and sender |
//! | [`error`] | Error enums |
//! | `web` | Browser bindings and the wasm entry point (feature `web`) |

pub mod config;
pub mod contact;
pub mod error;
pub mod footer;
pub mod locate;
pub mod nav;
pub mod pipeline;
pub mod reveal;
pub mod season;
pub mod theme;
pub mod weather;

#[cfg(feature = "web")]
pub mod web;

pub use config::SiteConfig;
pub use pipeline::{Resolution, Source, resolve, select_and_apply};
pub use weather::Selection;
