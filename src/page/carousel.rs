//! Carousel autoplay, navigation, and URL fragment sync.
//!
//! The carousel cycles through an ordered slide sequence on a timer until the
//! visitor takes over: any manual navigation (arrows, indicator dots,
//! keyboard) pauses autoplay for good. Slide ids double as URL fragment
//! anchors, so deep links land on a specific slide — but the fragment is only
//! written back for visitors who arrived via one (or later edit it), keeping
//! the URL clean for everyone else.
//!
//! All mutators take the [`FragmentSync`] capability; while sync is enabled,
//! every index change issues a history *replacement* so back/forward is
//! unaffected. The autoplay timer, keyboard listener, and fragment listener
//! are independent callback sources — ordering between them is not guaranteed
//! and doesn't need to be, the last write to the index wins.

use super::capability::FragmentSync;

/// Keyboard navigation keys the carousel responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

/// What an autoplay tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// False when autoplay is paused.
    pub advanced: bool,
    /// True when the advance wrapped from the last slide back to the first,
    /// completing a full loop.
    pub completed_loop: bool,
}

/// Carousel state machine over an ordered, non-empty slide id sequence.
#[derive(Debug)]
pub struct Carousel {
    ids: Vec<String>,
    current: usize,
    paused: bool,
    hash_sync: bool,
}

impl Carousel {
    /// Build from slide ids and the URL fragment present at load, if any.
    ///
    /// A fragment matching a known id selects that slide and enables hash
    /// sync. Anything else — including a fragment that matches nothing —
    /// starts at index 0 with sync disabled.
    pub fn mount(ids: Vec<String>, initial_fragment: Option<&str>) -> Self {
        assert!(!ids.is_empty(), "carousel requires at least one slide");
        let initial = initial_fragment.and_then(|f| ids.iter().position(|id| id == f));
        Self {
            current: initial.unwrap_or(0),
            hash_sync: initial.is_some(),
            ids,
            paused: false,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> &str {
        &self.ids[self.current]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn hash_sync_enabled(&self) -> bool {
        self.hash_sync
    }

    /// Autoplay timer fired. No-op while paused.
    pub fn tick(&mut self, sync: &dyn FragmentSync) -> TickOutcome {
        if self.paused {
            return TickOutcome::default();
        }
        let completed_loop = self.current == self.ids.len() - 1;
        self.set_current((self.current + 1) % self.ids.len(), sync);
        TickOutcome {
            advanced: true,
            completed_loop,
        }
    }

    /// Next-arrow pressed. Pauses autoplay permanently.
    pub fn next(&mut self, sync: &dyn FragmentSync) {
        self.paused = true;
        self.set_current((self.current + 1) % self.ids.len(), sync);
    }

    /// Previous-arrow pressed. Pauses autoplay permanently.
    pub fn prev(&mut self, sync: &dyn FragmentSync) {
        self.paused = true;
        self.set_current((self.current + self.ids.len() - 1) % self.ids.len(), sync);
    }

    /// Indicator dot pressed. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, sync: &dyn FragmentSync) {
        if index >= self.ids.len() {
            return;
        }
        self.paused = true;
        self.set_current(index, sync);
    }

    /// Keyboard navigation.
    pub fn key(&mut self, key: ArrowKey, sync: &dyn FragmentSync) {
        match key {
            ArrowKey::Left => self.prev(sync),
            ArrowKey::Right => self.next(sync),
        }
    }

    /// External fragment change (back/forward navigation, manual edit).
    ///
    /// A known slide id force-pauses autoplay, moves the carousel, and enables
    /// hash sync from here on. Unrecognized fragments are ignored entirely.
    pub fn on_fragment_changed(&mut self, fragment: &str) {
        if let Some(index) = self.ids.iter().position(|id| id == fragment) {
            self.paused = true;
            self.current = index;
            self.hash_sync = true;
        }
    }

    /// Apply an index change and reflect it into the URL when syncing.
    fn set_current(&mut self, index: usize, sync: &dyn FragmentSync) {
        self.current = index;
        if self.hash_sync {
            sync.replace(&self.ids[self.current]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::capability::NoopFragmentSync;
    use crate::page::capability::tests::FakeFragmentSync;

    fn ids() -> Vec<String> {
        crate::test_helpers::slide_ids()
    }

    #[test]
    fn mounts_at_zero_without_fragment() {
        let carousel = Carousel::mount(ids(), None);
        assert_eq!(carousel.current(), 0);
        assert!(!carousel.is_paused());
        assert!(!carousel.hash_sync_enabled());
    }

    #[test]
    fn mounts_at_fragment_slide_with_sync_enabled() {
        let carousel = Carousel::mount(ids(), Some("kitchen"));
        assert_eq!(carousel.current(), 2);
        assert!(carousel.hash_sync_enabled());
    }

    #[test]
    fn unknown_fragment_defaults_to_zero_without_sync() {
        let carousel = Carousel::mount(ids(), Some("garage"));
        assert_eq!(carousel.current(), 0);
        assert!(!carousel.hash_sync_enabled());
    }

    #[test]
    fn n_ticks_complete_a_cycle() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        let n = carousel.len();
        for _ in 0..n {
            carousel.tick(&sync);
        }
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn tick_reports_loop_completion_on_wrap() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        let n = carousel.len();
        for i in 0..n {
            let outcome = carousel.tick(&sync);
            assert!(outcome.advanced);
            assert_eq!(outcome.completed_loop, i == n - 1);
        }
    }

    #[test]
    fn tick_is_inert_while_paused() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.next(&sync);
        let before = carousel.current();
        let outcome = carousel.tick(&sync);
        assert!(!outcome.advanced);
        assert_eq!(carousel.current(), before);
    }

    #[test]
    fn manual_navigation_pauses_permanently() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.next(&sync);
        assert!(carousel.is_paused());
        // Nothing un-pauses for the component's lifetime
        carousel.select(0, &sync);
        carousel.key(ArrowKey::Right, &sync);
        assert!(carousel.is_paused());
    }

    #[test]
    fn prev_wraps_backward() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.prev(&sync);
        assert_eq!(carousel.current(), carousel.len() - 1);
    }

    #[test]
    fn next_wraps_forward() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), Some("exterior"));
        carousel.next(&sync);
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn arrow_keys_navigate_both_directions() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.key(ArrowKey::Right, &sync);
        assert_eq!(carousel.current(), 1);
        carousel.key(ArrowKey::Left, &sync);
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.select(99, &sync);
        assert_eq!(carousel.current(), 0);
        assert!(!carousel.is_paused());
    }

    // =========================================================================
    // Fragment sync
    // =========================================================================

    #[test]
    fn no_fragment_writes_while_sync_disabled() {
        let sync = FakeFragmentSync::new();
        let mut carousel = Carousel::mount(ids(), None);
        carousel.tick(&sync);
        carousel.next(&sync);
        carousel.select(3, &sync);
        assert!(sync.replacements.borrow().is_empty());
    }

    #[test]
    fn every_index_change_replaces_fragment_while_syncing() {
        let sync = FakeFragmentSync::new();
        let mut carousel = Carousel::mount(ids(), Some("pool"));
        carousel.tick(&sync);
        carousel.next(&sync);
        carousel.prev(&sync);
        assert_eq!(
            *sync.replacements.borrow(),
            ["living-room", "kitchen", "living-room"]
        );
    }

    #[test]
    fn fragment_change_to_known_id_pauses_moves_and_enables_sync() {
        let sync = FakeFragmentSync::new();
        let mut carousel = Carousel::mount(ids(), None);
        carousel.on_fragment_changed("bedroom");
        assert_eq!(carousel.current(), 4);
        assert!(carousel.is_paused());
        assert!(carousel.hash_sync_enabled());

        // Later manual moves now sync
        carousel.next(&sync);
        assert_eq!(sync.last().as_deref(), Some("exterior"));
    }

    #[test]
    fn fragment_change_to_unknown_id_is_ignored() {
        let mut carousel = Carousel::mount(ids(), None);
        carousel.on_fragment_changed("garage");
        assert_eq!(carousel.current(), 0);
        assert!(!carousel.is_paused());
        assert!(!carousel.hash_sync_enabled());
    }

    #[test]
    fn timer_and_manual_interleavings_last_write_wins() {
        let sync = NoopFragmentSync;
        let mut carousel = Carousel::mount(ids(), None);
        carousel.tick(&sync); // 1
        carousel.select(4, &sync); // manual wins, pauses
        carousel.tick(&sync); // inert now
        assert_eq!(carousel.current(), 4);
    }

    #[test]
    #[should_panic(expected = "at least one slide")]
    fn empty_slide_list_panics_at_mount() {
        Carousel::mount(Vec::new(), None);
    }
}
