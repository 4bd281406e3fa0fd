//! Browser-environment capabilities behind injectable traits.
//!
//! The page model never probes for globals. Everything the browser would
//! provide — viewport observation, URL fragment updates, conversion tracking —
//! is a capability passed into the composition root. Production code injects
//! the no-op fallbacks during static generation; tests inject deterministic
//! recording fakes; the emitted site's script is the real-browser counterpart.

use std::cell::Cell;

/// Identifies one active viewport observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchHandle(pub u64);

/// What an observer reports about an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
}

/// Result of starting an observation.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub handle: WatchHandle,
    /// Whether the anchor is already within the margin at observe time.
    /// Real observers fire an initial callback; this models it synchronously.
    pub intersecting_now: bool,
}

/// Capability for watching an anchor element's proximity to the viewport.
pub trait ViewportWatcher {
    /// Begin observing `anchor` with `margin_px` of slack around the viewport.
    fn observe(&self, anchor: &str, margin_px: u32) -> Observation;

    /// Stop delivering entries for the handle.
    fn release(&self, handle: WatchHandle);
}

/// Fallback watcher for environments without viewport observation — reports
/// every anchor as immediately visible, so nothing stays deferred. This is
/// also what static generation uses: emitted pages carry full content.
#[derive(Default)]
pub struct EagerWatcher {
    next: Cell<u64>,
}

impl EagerWatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewportWatcher for EagerWatcher {
    fn observe(&self, _anchor: &str, _margin_px: u32) -> Observation {
        let handle = WatchHandle(self.next.get());
        self.next.set(handle.0 + 1);
        Observation {
            handle,
            intersecting_now: true,
        }
    }

    fn release(&self, _handle: WatchHandle) {}
}

/// Capability for reflecting state into the URL fragment.
///
/// The single operation is a history *replacement* — the carousel never pushes
/// entries, so back/forward navigation is unaffected.
pub trait FragmentSync {
    fn replace(&self, fragment: &str);
}

/// Fragment sink for non-browser environments.
pub struct NoopFragmentSync;

impl FragmentSync for NoopFragmentSync {
    fn replace(&self, _fragment: &str) {}
}

/// Capability for reporting a submitted lead to an external tracker.
pub trait ConversionTracker {
    fn lead_submitted(&self);
}

/// Tracker fallback when no tracking function is available.
pub struct NoopTracker;

impl ConversionTracker for NoopTracker {
    fn lead_submitted(&self) {}
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Recording watcher that lets tests control when intersections occur.
    ///
    /// `observe` never reports an immediate intersection; tests feed entries
    /// through the section under test and then assert on `released`.
    #[derive(Default)]
    pub struct FakeWatcher {
        next: Cell<u64>,
        pub observed: RefCell<Vec<(String, u32)>>,
        pub released: RefCell<Vec<WatchHandle>>,
    }

    impl FakeWatcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn active_count(&self) -> usize {
            self.observed.borrow().len() - self.released.borrow().len()
        }
    }

    impl ViewportWatcher for FakeWatcher {
        fn observe(&self, anchor: &str, margin_px: u32) -> Observation {
            let handle = WatchHandle(self.next.get());
            self.next.set(handle.0 + 1);
            self.observed.borrow_mut().push((anchor.to_string(), margin_px));
            Observation {
                handle,
                intersecting_now: false,
            }
        }

        fn release(&self, handle: WatchHandle) {
            self.released.borrow_mut().push(handle);
        }
    }

    /// Records every fragment replacement.
    #[derive(Default)]
    pub struct FakeFragmentSync {
        pub replacements: RefCell<Vec<String>>,
    }

    impl FakeFragmentSync {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last(&self) -> Option<String> {
            self.replacements.borrow().last().cloned()
        }
    }

    impl FragmentSync for FakeFragmentSync {
        fn replace(&self, fragment: &str) {
            self.replacements.borrow_mut().push(fragment.to_string());
        }
    }

    /// Counts conversion events.
    #[derive(Default)]
    pub struct FakeTracker {
        pub fired: Cell<u32>,
    }

    impl FakeTracker {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ConversionTracker for FakeTracker {
        fn lead_submitted(&self) {
            self.fired.set(self.fired.get() + 1);
        }
    }

    #[test]
    fn eager_watcher_reports_immediate_intersection() {
        let watcher = EagerWatcher::new();
        let obs = watcher.observe("details", 200);
        assert!(obs.intersecting_now);
        // Handles are distinct per observation
        let obs2 = watcher.observe("bottom-bar", 200);
        assert_ne!(obs.handle, obs2.handle);
    }

    #[test]
    fn fake_watcher_records_and_defers() {
        let watcher = FakeWatcher::new();
        let obs = watcher.observe("details", 200);
        assert!(!obs.intersecting_now);
        assert_eq!(watcher.observed.borrow()[0], ("details".to_string(), 200));
        watcher.release(obs.handle);
        assert_eq!(watcher.active_count(), 0);
    }
}
