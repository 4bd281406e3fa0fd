//! Landing page composition.
//!
//! Wires the carousel, the two deferred sections (property details, bottom
//! bar), the scroll hint, and the inquiry form into one state value. The
//! composition root receives the immutable [`PropertyConfig`] and every
//! capability explicitly — nothing here touches ambient state.
//!
//! Rendering delegates to [`crate::render`]; this module owns only state and
//! transitions. The environment (browser script, or a test) feeds events in:
//! intersection entries, autoplay ticks, scroll positions, fragment changes.

use crate::config::{PropertyConfig, RentPeriod};
use crate::render;
use super::capability::{ConversionTracker, FragmentSync, IntersectionEntry, ViewportWatcher};
use super::carousel::Carousel;
use super::contact::{LeadForm, LeadTransport, SubmitOutcome};
use super::hint::ScrollHint;
use super::lazy::LazySection;
use maud::Markup;

/// The two deferred sections below the carousel, in observation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Details,
    BottomBar,
}

/// A transient notification surfaced after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl Notice {
    /// The toast for a settled submission attempt. Validation failures render
    /// inline at the fields instead and produce no notice.
    pub fn for_outcome(outcome: &SubmitOutcome) -> Option<Notice> {
        match outcome {
            SubmitOutcome::Sent => Some(Notice {
                kind: NoticeKind::Success,
                title: "Thank you for your interest!".to_string(),
                description: Some(
                    "We've received your details and will be in touch soon.".to_string(),
                ),
            }),
            SubmitOutcome::Failed(_) => Some(Notice {
                kind: NoticeKind::Error,
                title: "Something went wrong while submitting your request.".to_string(),
                description: None,
            }),
            SubmitOutcome::Rejected(_) | SubmitOutcome::AlreadyInFlight => None,
        }
    }
}

/// Full landing page state.
pub struct LandingPage {
    pub config: PropertyConfig,
    pub carousel: Carousel,
    pub hint: ScrollHint,
    pub details: LazySection,
    pub bottom_bar: LazySection,
    pub form: LeadForm,
    modal_open: bool,
    selected_period_id: String,
}

impl LandingPage {
    /// Compose the page and start observing the deferred sections.
    ///
    /// `fragment` is the URL fragment present at load, without the `#`.
    pub fn mount(
        config: PropertyConfig,
        fragment: Option<&str>,
        watcher: &dyn ViewportWatcher,
    ) -> Self {
        let carousel = Carousel::mount(
            config.slides.iter().map(|s| s.id.clone()).collect(),
            fragment,
        );
        let mut details = LazySection::new("property-details");
        let mut bottom_bar = LazySection::new("bottom-bar");
        details.mount(watcher);
        bottom_bar.mount(watcher);

        Self {
            carousel,
            hint: ScrollHint::new(config.timing.scroll_suppress_px),
            details,
            bottom_bar,
            form: LeadForm::new(),
            modal_open: false,
            selected_period_id: config.default_period_id.clone(),
            config,
        }
    }

    /// Deliver an observer entry for one of the deferred sections.
    pub fn on_intersection(
        &mut self,
        section: SectionId,
        entry: IntersectionEntry,
        watcher: &dyn ViewportWatcher,
    ) {
        match section {
            SectionId::Details => self.details.on_intersection(entry, watcher),
            SectionId::BottomBar => self.bottom_bar.on_intersection(entry, watcher),
        }
    }

    /// Autoplay timer fired; a completed loop re-arms the scroll hint.
    pub fn autoplay_tick(&mut self, sync: &dyn FragmentSync) {
        let outcome = self.carousel.tick(sync);
        if outcome.completed_loop {
            self.hint.on_loop_completed();
        }
    }

    /// The scroll-hint dwell timer elapsed.
    pub fn on_dwell_elapsed(&mut self) {
        self.hint.on_dwell_elapsed();
    }

    /// The visitor scrolled to `y`.
    pub fn on_scroll(&mut self, y: u32) {
        self.hint.on_scroll(y);
    }

    /// The URL fragment changed after load.
    pub fn on_fragment_changed(&mut self, fragment: &str) {
        self.carousel.on_fragment_changed(fragment);
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn open_inquiry(&mut self) {
        self.modal_open = true;
    }

    pub fn close_inquiry(&mut self) {
        self.modal_open = false;
    }

    /// Bottom-bar period selector changed. Unknown ids are ignored.
    pub fn select_period(&mut self, id: &str) {
        if self.config.period(id).is_some() {
            self.selected_period_id = id.to_string();
        }
    }

    /// The rent period currently shown in the bottom bar.
    pub fn selected_period(&self) -> &RentPeriod {
        self.config
            .period(&self.selected_period_id)
            .expect("selected period validated on construction")
    }

    /// One submission attempt. A delivered inquiry closes the modal; a failed
    /// one leaves it open for a manual retry.
    pub fn submit_inquiry(
        &mut self,
        transport: &dyn LeadTransport,
        tracker: &dyn ConversionTracker,
    ) -> SubmitOutcome {
        let outcome = self.form.submit(&self.config, transport, tracker);
        if outcome == SubmitOutcome::Sent {
            self.modal_open = false;
        }
        outcome
    }

    /// Teardown: release any observation handles still live.
    pub fn unmount(&mut self, watcher: &dyn ViewportWatcher) {
        self.details.unmount(watcher);
        self.bottom_bar.unmount(watcher);
    }

    /// Render the page in its current state.
    pub fn render(&self) -> Markup {
        render::render_landing(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::capability::tests::{FakeFragmentSync, FakeTracker, FakeWatcher};
    use crate::page::contact::tests::FakeTransport;

    fn entry(is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry { is_intersecting }
    }

    fn mount_with(watcher: &FakeWatcher) -> LandingPage {
        LandingPage::mount(PropertyConfig::default(), None, watcher)
    }

    #[test]
    fn mount_observes_details_then_bottom_bar() {
        let watcher = FakeWatcher::new();
        let _page = mount_with(&watcher);
        let observed = watcher.observed.borrow();
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].0, "property-details");
        assert_eq!(observed[1].0, "bottom-bar");
        assert_eq!(observed[0].1, 200);
    }

    #[test]
    fn sections_reveal_independently() {
        let watcher = FakeWatcher::new();
        let mut page = mount_with(&watcher);

        page.on_intersection(SectionId::Details, entry(true), &watcher);
        assert!(page.details.is_visible());
        assert!(!page.bottom_bar.is_visible());

        page.on_intersection(SectionId::BottomBar, entry(true), &watcher);
        assert!(page.bottom_bar.is_visible());
    }

    #[test]
    fn unmount_releases_all_pending_observations() {
        let watcher = FakeWatcher::new();
        let mut page = mount_with(&watcher);
        page.on_intersection(SectionId::Details, entry(true), &watcher);
        page.unmount(&watcher);
        assert_eq!(watcher.active_count(), 0);
    }

    #[test]
    fn completed_autoplay_loop_rearms_hint() {
        let watcher = FakeWatcher::new();
        let sync = FakeFragmentSync::new();
        let mut page = mount_with(&watcher);
        let n = page.config.slides.len();

        assert!(!page.hint.is_shown());
        for _ in 0..n {
            page.autoplay_tick(&sync);
        }
        assert!(page.hint.is_shown());
    }

    #[test]
    fn scroll_past_threshold_suppresses_hint_through_later_loops() {
        let watcher = FakeWatcher::new();
        let sync = FakeFragmentSync::new();
        let mut page = mount_with(&watcher);
        page.on_scroll(page.config.timing.scroll_suppress_px + 1);

        for _ in 0..page.config.slides.len() {
            page.autoplay_tick(&sync);
        }
        assert!(!page.hint.is_shown());
    }

    #[test]
    fn select_period_updates_bottom_bar() {
        let watcher = FakeWatcher::new();
        let mut page = mount_with(&watcher);
        assert_eq!(page.selected_period().id, "august");

        page.select_period("july");
        assert_eq!(page.selected_period().amount, 85_000);

        page.select_period("bogus");
        assert_eq!(page.selected_period().id, "july");
    }

    #[test]
    fn successful_submission_closes_modal() {
        let watcher = FakeWatcher::new();
        let mut page = mount_with(&watcher);
        page.open_inquiry();

        page.form.name = "Alexis Baldwin".to_string();
        page.form.email = "alexis@example.com".to_string();

        let outcome = page.submit_inquiry(&FakeTransport::new(), &FakeTracker::new());
        assert_eq!(outcome, SubmitOutcome::Sent);
        assert!(!page.is_modal_open());
    }

    #[test]
    fn failed_submission_leaves_modal_open() {
        let watcher = FakeWatcher::new();
        let mut page = mount_with(&watcher);
        page.open_inquiry();

        page.form.name = "Alexis Baldwin".to_string();
        page.form.email = "alexis@example.com".to_string();

        let outcome = page.submit_inquiry(&FakeTransport::failing(), &FakeTracker::new());
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(page.is_modal_open());
    }

    #[test]
    fn notices_map_outcomes() {
        let sent = Notice::for_outcome(&SubmitOutcome::Sent).unwrap();
        assert_eq!(sent.kind, NoticeKind::Success);

        let failed = Notice::for_outcome(&SubmitOutcome::Failed("boom".into())).unwrap();
        assert_eq!(failed.kind, NoticeKind::Error);

        assert_eq!(Notice::for_outcome(&SubmitOutcome::Rejected(Vec::new())), None);
    }
}
