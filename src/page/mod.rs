//! Runtime page model — the state machines behind the generated site.
//!
//! Everything interactive on the landing page is modeled as a plain state
//! machine with its transitions exposed as methods:
//!
//! | Component | Role |
//! |-----------|------|
//! | [`carousel`] | Autoplay cycling, manual navigation, URL fragment sync |
//! | [`lazy`] | Viewport-driven deferral of below-the-fold sections |
//! | [`hint`] | The "scroll for details" affordance |
//! | [`contact`] | Lead form validation and single-flight submission |
//! | [`compose`] | [`LandingPage`] — wires the above together |
//! | [`capability`] | Injectable stand-ins for browser globals |
//!
//! The model is single-threaded and event-driven. Callback sources (the
//! autoplay timer, intersection entries, fragment changes, key presses) are
//! independent and arrive in arbitrary order; the machines tolerate any
//! interleaving because the last write to an index wins and the one-way
//! transitions ignore stale events.
//!
//! Static generation mounts the page with the eager no-op capabilities, so
//! emitted HTML carries full content; the browser script replays the same
//! transitions against the real globals; tests inject the recording fakes.

pub mod capability;
pub mod carousel;
pub mod compose;
pub mod contact;
pub mod hint;
pub mod lazy;

pub use capability::{
    ConversionTracker, EagerWatcher, FragmentSync, IntersectionEntry, NoopFragmentSync,
    NoopTracker, ViewportWatcher, WatchHandle,
};
pub use carousel::{ArrowKey, Carousel, TickOutcome};
pub use compose::{LandingPage, Notice, NoticeKind, SectionId};
pub use contact::{
    FieldError, HttpTransport, LeadForm, LeadInquiry, LeadPayload, LeadTransport, SubmitError,
    SubmitOutcome,
};
pub use hint::ScrollHint;
pub use lazy::{LAZY_MARGIN_PX, LazySection, SectionState};
