//! Scroll-hint affordance.
//!
//! A gentle "scroll for details" nudge for visitors who linger on the
//! carousel. It appears after a fixed dwell without scrolling, reappears when
//! the carousel completes a full autoplay loop while the visitor still hasn't
//! scrolled, and goes away for good once they scroll past a small threshold —
//! at that point they've found the content and the hint has nothing to add.
//!
//! Timers live in the environment: the dwell timeout and the carousel's loop
//! report arrive as method calls.

/// Scroll-hint state machine.
#[derive(Debug)]
pub struct ScrollHint {
    shown: bool,
    suppressed: bool,
    threshold_px: u32,
}

impl ScrollHint {
    pub fn new(threshold_px: u32) -> Self {
        Self {
            shown: false,
            suppressed: false,
            threshold_px,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// The dwell timer elapsed without the visitor scrolling.
    pub fn on_dwell_elapsed(&mut self) {
        if !self.suppressed {
            self.shown = true;
        }
    }

    /// The carousel completed a full autoplay loop.
    pub fn on_loop_completed(&mut self) {
        if !self.suppressed {
            self.shown = true;
        }
    }

    /// The visitor scrolled to `y`. Any scroll hides the hint; crossing the
    /// threshold suppresses it permanently.
    pub fn on_scroll(&mut self, y: u32) {
        if y > self.threshold_px {
            self.suppressed = true;
        }
        if y > 0 {
            self.shown = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_dwell_elapses() {
        let mut hint = ScrollHint::new(64);
        assert!(!hint.is_shown());
        hint.on_dwell_elapsed();
        assert!(hint.is_shown());
    }

    #[test]
    fn loop_completion_shows_hint() {
        let mut hint = ScrollHint::new(64);
        hint.on_loop_completed();
        assert!(hint.is_shown());
    }

    #[test]
    fn small_scroll_hides_but_rearms() {
        let mut hint = ScrollHint::new(64);
        hint.on_dwell_elapsed();
        hint.on_scroll(10);
        assert!(!hint.is_shown());
        assert!(!hint.is_suppressed());

        // A completed loop without further scrolling brings it back
        hint.on_loop_completed();
        assert!(hint.is_shown());
    }

    #[test]
    fn threshold_scroll_suppresses_permanently() {
        let mut hint = ScrollHint::new(64);
        hint.on_dwell_elapsed();
        hint.on_scroll(65);
        assert!(!hint.is_shown());
        assert!(hint.is_suppressed());

        hint.on_dwell_elapsed();
        hint.on_loop_completed();
        assert!(!hint.is_shown());
    }

    #[test]
    fn scroll_exactly_at_threshold_does_not_suppress() {
        let mut hint = ScrollHint::new(64);
        hint.on_scroll(64);
        assert!(!hint.is_suppressed());
    }
}
