//! Scroll-reveal bookkeeping.
//!
//! Elements marked `[data-animate]` are watched until they first intersect
//! the viewport, then gain the `visible` class and are dropped from the
//! watch set. The browser binding feeds intersection entries in and
//! unobserves whatever [`RevealTracker::on_entries`] returns.

pub const ANIMATE_SELECTOR: &str = "[data-animate]";
pub const VISIBLE_CLASS: &str = "visible";

/// Fraction of an element that must be on screen to reveal it.
pub const REVEAL_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    watching: Vec<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self { watching: Vec::new() }
    }
}

impl<K: PartialEq> RevealTracker<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `key`; already-watched keys are ignored.
    pub fn observe(&mut self, key: K) {
        if !self.watching.contains(&key) {
            self.watching.push(key);
        }
    }

    /// Apply one batch of `(key, is_intersecting)` entries.
    ///
    /// Returns the keys to reveal and unobserve, each at most once over the
    /// tracker's lifetime. Entries for unwatched keys are ignored.
    pub fn on_entries<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut revealed = Vec::new();
        for (key, intersecting) in entries {
            if !intersecting {
                continue;
            }
            if let Some(pos) = self.watching.iter().position(|k| *k == key) {
                revealed.push(self.watching.swap_remove(pos));
            }
        }
        revealed
    }

    #[must_use]
    pub fn watching(&self) -> usize {
        self.watching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersecting_entry_is_revealed_once() {
        let mut tracker = RevealTracker::new();
        tracker.observe("hero");
        tracker.observe("about");

        assert_eq!(tracker.on_entries([("hero", true), ("about", false)]), vec!["hero"]);
        assert_eq!(tracker.watching(), 1);

        assert!(tracker.on_entries([("hero", true)]).is_empty());
        assert_eq!(tracker.on_entries([("about", true)]), vec!["about"]);
        assert_eq!(tracker.watching(), 0);
    }

    #[test]
    fn duplicate_entries_in_one_batch_reveal_once() {
        let mut tracker = RevealTracker::new();
        tracker.observe(1);
        assert_eq!(tracker.on_entries([(1, true), (1, true)]), vec![1]);
    }

    #[test]
    fn observe_ignores_duplicates() {
        let mut tracker = RevealTracker::new();
        tracker.observe('a');
        tracker.observe('a');
        assert_eq!(tracker.watching(), 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut tracker: RevealTracker<u8> = RevealTracker::new();
        assert!(tracker.on_entries([(9, true)]).is_empty());
    }
}
