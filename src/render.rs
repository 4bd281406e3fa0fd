//! HTML site generation.
//!
//! Renders the routing shell — the landing page, the privacy-policy page, and
//! the not-found fallback — from a [`PropertyConfig`] and the page model's
//! current state, then writes the static site to the output directory.
//!
//! ## Generated Pages
//!
//! - **Landing page** (`/index.html`): carousel, deferred property details,
//!   deferred bottom bar with the inquiry modal
//! - **Privacy page** (`/privacy/index.html`): markdown policy body
//! - **Not-found fallback** (`/404.html`): the static-host catch-all
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── privacy/
//! │   └── index.html
//! ├── pool-small.avif            # Optimized variants (copied)
//! ├── pool-medium.avif
//! └── ...
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors injected from config)
//! - `static/slides.js`: browser mirror of the page model's transitions
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Rendering
//! is driven by the page model: a section's content appears in the markup
//! only once its [`LazySection`] reports visible, which is what makes the
//! deferral observable in tests — and why `generate` mounts the page with the
//! eager watcher, so shipped pages carry full content.

use crate::config::{self, PropertyConfig, PropertyFacts, RentPeriod};
use crate::imaging::{VariantKind, variant_filename};
use crate::page::{Carousel, EagerWatcher, LandingPage, LazySection, LeadForm, ScrollHint};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/slides.js");

/// Summary of a generate run, for CLI display.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Output-relative paths of the pages written.
    pub pages: Vec<String>,
    /// Number of optimized variant files copied.
    pub images_copied: usize,
    /// Slide variants that were expected but missing from the optimized dir.
    pub missing_variants: Vec<String>,
}

/// Generate the full static site.
pub fn generate(
    config: &PropertyConfig,
    optimized_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, RenderError> {
    let css = site_css(config);
    fs::create_dir_all(output_dir)?;

    let mut summary = GenerateSummary::default();

    // Copy optimized variants to the output root, noting any slide whose
    // variants the pipeline hasn't produced yet.
    summary.images_copied = copy_variants(optimized_dir, output_dir)?;
    for slide in &config.slides {
        for kind in VariantKind::ALL {
            let filename = variant_filename(&slide.id, kind);
            if !optimized_dir.join(&filename).exists() {
                log::warn!("missing optimized variant {filename}; run `villa-press optimize`");
                summary.missing_variants.push(filename);
            }
        }
    }

    // The shipped landing page carries full content: the eager watcher
    // reveals every deferred section at mount.
    let watcher = EagerWatcher::new();
    let page = LandingPage::mount(config.clone(), None, &watcher);
    fs::write(output_dir.join("index.html"), page.render().into_string())?;
    summary.pages.push("index.html".to_string());

    let privacy_dir = output_dir.join("privacy");
    fs::create_dir_all(&privacy_dir)?;
    let privacy = render_privacy(config, &css);
    fs::write(privacy_dir.join("index.html"), privacy.into_string())?;
    summary.pages.push("privacy/index.html".to_string());

    let not_found = render_not_found(config, &css);
    fs::write(output_dir.join("404.html"), not_found.into_string())?;
    summary.pages.push("404.html".to_string());

    Ok(summary)
}

/// Copy `.avif` files from the optimized directory into the output root.
fn copy_variants(optimized_dir: &Path, output_dir: &Path) -> std::io::Result<usize> {
    if !optimized_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in fs::read_dir(optimized_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_avif = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("avif"));
        if path.is_file() && is_avif {
            fs::copy(&path, output_dir.join(entry.file_name()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Full stylesheet: config-driven custom properties + static rules.
fn site_css(config: &PropertyConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

/// Format whole dollars as `$95,000`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

/// Format a possibly-fractional bath count without a trailing `.0`.
fn format_baths(baths: f64) -> String {
    if baths.fract() == 0.0 {
        format!("{}", baths as u64)
    } else {
        format!("{baths}")
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the carousel section in its current state.
pub fn render_carousel(
    config: &PropertyConfig,
    carousel: &Carousel,
    hint: &ScrollHint,
) -> Markup {
    let offset_style = format!("transform: translateX(-{}%);", carousel.current() * 100);

    html! {
        section.carousel data-interval=(config.timing.autoplay_interval_ms) {
            div.carousel-track style=(offset_style) {
                @for slide in &config.slides {
                    div.slide id=(slide.id) {
                        picture {
                            source media="(max-width: 640px)"
                                srcset=(variant_filename(&slide.id, VariantKind::Small));
                            source media="(max-width: 1280px)"
                                srcset=(variant_filename(&slide.id, VariantKind::Medium));
                            img src=(variant_filename(&slide.id, VariantKind::Large)) alt=(slide.alt());
                        }
                        div.slide-scrim {}
                        div.slide-caption {
                            h2 { (slide.title) }
                            p { (slide.description) }
                        }
                    }
                }
            }

            button.carousel-arrow.prev aria-label="Previous image" { "‹" }
            button.carousel-arrow.next aria-label="Next image" { "›" }

            div.carousel-dots {
                @for (index, _) in config.slides.iter().enumerate() {
                    button.active[index == carousel.current()]
                        aria-label={ "Go to image " (index + 1) } {}
                }
            }

            span.scroll-hint.shown[hint.is_shown()]
                data-dwell=(config.timing.scroll_hint_dwell_ms)
                data-threshold=(config.timing.scroll_suppress_px) {
                "Scroll for details ↓"
            }
        }
    }
}

/// Renders a deferred section wrapper. The content subtree is absent from the
/// markup until the section has intersected.
pub fn render_lazy_section(section: &LazySection, content: Markup) -> Markup {
    html! {
        div id=(section.anchor()) data-lazy=(section.margin_px()) {
            @if section.is_visible() {
                (content)
            }
        }
    }
}

/// Renders the property details article.
pub fn render_details(facts: &PropertyFacts) -> Markup {
    html! {
        article.details {
            header {
                h1 { (facts.headline) }
                address { (facts.address) }
            }

            section.fact-strip aria-label="Property features" {
                span { (facts.bedrooms) " bed" }
                span.sep { "·" }
                span { (format_baths(facts.bathrooms)) " bath" }
                span.sep { "·" }
                span { (group_thousands(facts.square_feet)) " sq ft" }
                span.sep { "·" }
                span { (facts.minutes_to_town) " min to town" }
            }

            section {
                h2 { "About This Property" }
                @for paragraph in &facts.about {
                    p { (paragraph) }
                }
            }

            section {
                h2 { "Premium Amenities" }
                ul.amenities {
                    @for amenity in &facts.amenities {
                        li { (amenity) }
                    }
                }
            }
        }
    }
}

fn group_thousands(n: u32) -> String {
    format_usd(n as u64)[1..].to_string()
}

/// Renders the fixed bottom bar with the rate display and call to action.
pub fn render_bottom_bar(config: &PropertyConfig, selected: &RentPeriod) -> Markup {
    let facts = &config.property;
    html! {
        aside.bottom-bar {
            div.bottom-bar-inner {
                div.rate-picker {
                    span.rate { (format_usd(selected.amount)) }
                    " for "
                    select aria-label="Rental period" {
                        @for period in &config.rent_periods {
                            option value=(period.id) selected[period.id == selected.id] {
                                (period.label)
                            }
                        }
                    }
                }

                div.bar-facts {
                    (facts.bedrooms) " Bed | " (format_baths(facts.bathrooms)) " Bath | "
                    (group_thousands(facts.square_feet)) " Sq Ft"
                }

                button.cta-button data-open-inquiry {
                    "Express Interest"
                }
            }
        }
    }
}

/// Renders the inquiry modal. Optional fields render only when the
/// deployment's capability flags enable them.
pub fn render_inquiry_modal(config: &PropertyConfig, form: &LeadForm, open: bool) -> Markup {
    html! {
        div.modal-backdrop.open[open] {
            div.inquiry-modal role="dialog" aria-label="Express your interest" {
                h2 { "Express Your Interest" }
                p.lede { "Please fill out the form below. We will respond as soon as possible." }

                form method="post" action=(config.form.endpoint) {
                    label for="inquiry-name" { "Full Name" }
                    input id="inquiry-name" name="name" value=(form.name)
                        placeholder="Alexis Baldwin";

                    label for="inquiry-email" { "Email" }
                    input id="inquiry-email" name="email" type="email" value=(form.email)
                        placeholder="alexis@example.com";

                    @if config.form.phone {
                        label for="inquiry-phone" { "Phone Number (optional)" }
                        input id="inquiry-phone" name="phone" type="tel" value=(form.phone)
                            placeholder="(212) 555-1212";
                    }

                    @if config.form.period {
                        label for="inquiry-period" { "Rental Period" }
                        select id="inquiry-period" name="period_id" {
                            option value="" disabled selected[form.period_id.is_none()] {
                                "Please select rental period of interest"
                            }
                            @for period in &config.rent_periods {
                                option value=(period.id)
                                    selected[form.period_id.as_deref() == Some(period.id.as_str())] {
                                    (period.label)
                                }
                            }
                        }
                    }

                    @if config.form.message {
                        label for="inquiry-message" { "Message" }
                        textarea id="inquiry-message" name="message"
                            placeholder="Please tell us about yourselves and list any questions you might have" {
                            (form.message)
                        }
                    }

                    div.modal-actions {
                        button.cancel type="button" disabled[form.is_submitting()] { "Cancel" }
                        button.submit type="submit" disabled[form.is_submitting()] {
                            @if form.is_submitting() { "Submitting..." } @else { "Submit" }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the landing page in the page model's current state.
pub fn render_landing(page: &LandingPage) -> Markup {
    let config = &page.config;
    let css = site_css(config);

    let below_fold = html! {
        (render_details(&config.property))
    };
    let bar_and_modal = html! {
        (render_bottom_bar(config, page.selected_period()))
        (render_inquiry_modal(config, &page.form, page.is_modal_open()))
    };

    let content = html! {
        (render_carousel(config, &page.carousel, &page.hint))
        main {
            (render_lazy_section(&page.details, below_fold))
            (render_lazy_section(&page.bottom_bar, bar_and_modal))
        }
        script { (PreEscaped(JS)) }
    };

    // The headline belongs to the deferred details section; the document
    // title must not carry it into markup that exists before reveal.
    let title = format!("{} — Summer Rental", config.property.address);
    base_document(&title, &css, content)
}

/// Renders the privacy-policy page from the markdown body in config.
pub fn render_privacy(config: &PropertyConfig, css: &str) -> Markup {
    let parser = Parser::new(&config.privacy);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let content = html! {
        main.prose-page {
            a.back-link href="/" { "← Back to Home" }
            h1 { "Privacy Policy" }
            article {
                (PreEscaped(body_html))
            }
        }
    };

    base_document("Privacy Policy", css, content)
}

/// Renders the catch-all not-found page.
pub fn render_not_found(config: &PropertyConfig, css: &str) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "404" }
            p { "This page doesn't exist." }
            a href="/" { "Back to " (config.property.headline) }
        }
    };

    base_document("Page Not Found", css, content)
}

// ============================================================================
// Tests
// ============================================================================
