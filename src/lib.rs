//! # Villa Press
//!
//! A static site generator and image pipeline for single-property rental
//! marketing sites. One `property.toml` describes the property; a directory
//! of original photographs becomes web-optimized AVIF variants; the output is
//! a plain-HTML landing page with a full-screen carousel, deferred detail
//! sections, and a lead-capture form.
//!
//! # Architecture: Two Independent Flows
//!
//! ```text
//! 1. Optimize   originals/ + image-config.json  →  optimized/   (AVIF variants)
//! 2. Generate   property.toml + optimized/      →  dist/        (static site)
//! ```
//!
//! `build` runs both in order. The stages are independent on purpose:
//! re-encoding photographs is expensive and rare, re-rendering HTML is cheap
//! and frequent.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Batch image optimization: settings resolution, three variants per image |
//! | [`imaging`] | Pure-Rust pixel work: crop/resize/blur geometry, AVIF encoding, backend trait |
//! | [`config`] | `property.toml` loading, merging, validation |
//! | [`page`] | Runtime page model: carousel, lazy sections, scroll hint, lead form |
//! | [`render`] | Maud HTML generation and static site output |
//! | [`output`] | CLI output formatting — display of pipeline results |
//!
//! # Design Decisions
//!
//! ## AVIF-Only Output
//!
//! All generated images are AVIF. The format has had [100% browser support
//! since September 2023](https://caniuse.com/avif) and produces dramatically
//! smaller files than JPEG at equivalent quality. Three fixed variants cover
//! the delivery breakpoints: a blurred 9:16 520px mobile background, a 4:3
//! 1200px tablet crop, and a 16:9 1920px desktop hero.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed HTML is a build error, template variables are
//! Rust expressions, and all interpolation is auto-escaped.
//!
//! ## State Machines Behind Capability Traits
//!
//! The interactive behavior — carousel autoplay with URL fragment sync, the
//! viewport-driven lazy loader, the single-flight form submission — lives in
//! [`page`] as plain state machines. Browser globals (viewport observation,
//! history replacement, conversion tracking) are injected capabilities with
//! no-op fallbacks, never probed. Static generation mounts the page with the
//! eager fallbacks so shipped HTML carries full content; the small embedded
//! script replays the same transitions in the browser; tests substitute
//! deterministic fakes and drive every edge.
//!
//! ## Pure-Rust Imaging (No ImageMagick)
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling,
//! gaussian blur) and rav1e for AVIF encoding — both pure Rust. No system
//! dependencies, no external conversion binary, and conversions are
//! best-effort per file: one bad photograph is a logged warning, not an
//! aborted batch.

pub mod config;
pub mod imaging;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
