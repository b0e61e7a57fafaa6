/// Errors raised by the drawing surface or the frame host.
///
/// Browser failures arrive as `JsValue`s and are flattened to strings at the
/// boundary so the rest of the crate stays target-independent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FxError {
    /// A drawing call on the surface failed.
    #[error("surface call failed: {0}")]
    Surface(String),

    /// The host could not schedule an animation frame.
    #[error("frame scheduling failed: {0}")]
    Schedule(String),

    /// The host could not register a resize listener.
    #[error("listener registration failed: {0}")]
    Listener(String),
}
