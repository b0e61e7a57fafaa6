//! Responsive navigation menu state.
//!
//! The menu is a CSS checkbox hack: `#nav-toggle` checked means open.
//! Following any `.nav-links a` closes it.

pub const TOGGLE_ID: &str = "nav-toggle";
pub const LINK_SELECTOR: &str = ".nav-links a";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub fn from_checked(checked: bool) -> Self {
        Self { open: checked }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Close on link follow. Returns whether the toggle must be unchecked.
    pub fn follow_link(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}
