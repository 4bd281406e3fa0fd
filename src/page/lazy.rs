//! Viewport-driven lazy section loader.
//!
//! Defers a content subtree until its anchor element approaches the viewport.
//! The state machine is deliberately one-way:
//!
//! ```text
//! Unobserved --mount--> Observing --first intersecting entry--> Visible
//! ```
//!
//! `Visible` is terminal for the section's lifetime — content never unmounts
//! once shown, and the observation handle is released the moment it has done
//! its job. Unmounting while still `Observing` also releases the handle, so
//! no callback dangles past teardown.

use super::capability::{IntersectionEntry, ViewportWatcher, WatchHandle};

/// Slack around the viewport within which a section counts as "near", px.
pub const LAZY_MARGIN_PX: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Unobserved,
    Observing,
    Visible,
}

/// One deferred content section.
#[derive(Debug)]
pub struct LazySection {
    anchor: String,
    margin_px: u32,
    state: SectionState,
    handle: Option<WatchHandle>,
}

impl LazySection {
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            margin_px: LAZY_MARGIN_PX,
            state: SectionState::Unobserved,
            handle: None,
        }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn margin_px(&self) -> u32 {
        self.margin_px
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Content is rendered only once the section has intersected.
    pub fn is_visible(&self) -> bool {
        self.state == SectionState::Visible
    }

    /// Start observing the anchor. A watcher that reports the anchor already
    /// within the margin (the eager fallback) reveals immediately.
    pub fn mount(&mut self, watcher: &dyn ViewportWatcher) {
        if self.state != SectionState::Unobserved {
            return;
        }
        let observation = watcher.observe(&self.anchor, self.margin_px);
        self.state = SectionState::Observing;
        self.handle = Some(observation.handle);
        if observation.intersecting_now {
            self.reveal(watcher);
        }
    }

    /// Deliver an observer entry. Only the first intersecting entry while
    /// `Observing` has any effect; later entries (including non-intersecting
    /// ones after reveal) are ignored.
    pub fn on_intersection(&mut self, entry: IntersectionEntry, watcher: &dyn ViewportWatcher) {
        if self.state == SectionState::Observing && entry.is_intersecting {
            self.reveal(watcher);
        }
    }

    /// Teardown: release the handle if the section never became visible.
    pub fn unmount(&mut self, watcher: &dyn ViewportWatcher) {
        if let Some(handle) = self.handle.take() {
            watcher.release(handle);
        }
        if self.state == SectionState::Observing {
            self.state = SectionState::Unobserved;
        }
    }

    fn reveal(&mut self, watcher: &dyn ViewportWatcher) {
        self.state = SectionState::Visible;
        if let Some(handle) = self.handle.take() {
            watcher.release(handle);
        }
    }
}
