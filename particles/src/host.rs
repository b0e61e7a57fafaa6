//! Frame scheduling and resize-listener seam.
//!
//! In the browser this is `requestAnimationFrame` plus a window `resize`
//! listener (see [`crate::web::BrowserHost`]). [`ManualHost`] is the headless
//! stand-in: frames only "fire" when the caller pops them.

use std::collections::BTreeSet;

use crate::error::FxError;
use crate::surface::Viewport;

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

/// Opaque id of a scheduled animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub i32);

/// Opaque id of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerHandle(pub u32);

/// Everything the controller needs from its environment besides a surface.
pub trait FrameHost {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Schedule one call to the controller's frame callback.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Schedule`] if the frame cannot be scheduled.
    fn request_frame(&mut self) -> Result<FrameHandle, FxError>;

    /// Cancel a frame scheduled by [`FrameHost::request_frame`].
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start delivering resize notifications to the controller.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Listener`] if the listener cannot be attached.
    fn add_resize_listener(&mut self) -> Result<ListenerHandle, FxError>;

    /// Detach a listener registered by [`FrameHost::add_resize_listener`].
    fn remove_resize_listener(&mut self, handle: ListenerHandle);
}

/// Headless host driven explicitly by the caller.
#[derive(Debug)]
pub struct ManualHost {
    viewport: Viewport,
    next_id: u32,
    pending: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerHandle>,
    fail_listeners: bool,
    fail_frames: bool,
}

impl ManualHost {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            next_id: 1,
            pending: BTreeSet::new(),
            listeners: BTreeSet::new(),
            fail_listeners: false,
            fail_frames: false,
        }
    }

    /// Simulate a window resize. The controller still has to be told via
    /// `on_resize`, as the browser listener would.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Make subsequent listener registrations fail.
    pub fn fail_listeners(&mut self, fail: bool) {
        self.fail_listeners = fail;
    }

    /// Make subsequent frame requests fail.
    pub fn fail_frames(&mut self, fail: bool) {
        self.fail_frames = fail;
    }

    /// Pop the oldest pending frame, as if the display had refreshed.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending.pop_first()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl FrameHost for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Result<FrameHandle, FxError> {
        if self.fail_frames {
            return Err(FxError::Schedule("frame scheduling disabled".into()));
        }
        let handle = FrameHandle(i32::try_from(self.next_id()).map_err(|e| FxError::Schedule(e.to_string()))?);
        self.pending.insert(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }

    fn add_resize_listener(&mut self) -> Result<ListenerHandle, FxError> {
        if self.fail_listeners {
            return Err(FxError::Listener("listener registration disabled".into()));
        }
        let handle = ListenerHandle(self.next_id());
        self.listeners.insert(handle);
        Ok(handle)
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        self.listeners.remove(&handle);
    }
}
