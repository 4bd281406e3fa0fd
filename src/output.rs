//! CLI output formatting for the pipeline and generate stages.
//!
//! Output is **information-centric, not file-centric**: the primary display
//! for every image is its name and variant inventory, with filesystem paths
//! as secondary context via indented `Source:` lines.
//!
//! ## Optimize
//!
//! ```text
//! Optimized
//! 001 kitchen
//!     Source: kitchen.jpg
//!     small: 520x925   medium: 1200x900   large: 1920x1080
//! 002 pool (default settings)
//!     Source: pool.jpg
//!     small: 520x925   medium: 1200x900   large: 1920x1080
//!
//! Failed
//! 001 backyard
//!     Processing failed: ...
//!
//! Optimized 2 images (6 variants), 1 failed, 1 skipped
//! ```
//!
//! ## Generate
//!
//! ```text
//! Landing → index.html
//! Privacy → privacy/index.html
//! Not found → 404.html
//!
//! Copied 18 optimized images
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::pipeline::OptimizeReport;
use crate::render::GenerateSummary;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the optimize-stage report.
pub fn format_optimize_report(report: &OptimizeReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.optimized.is_empty() {
        lines.push("Optimized".to_string());
        for (pos, image) in report.optimized.iter().enumerate() {
            let suffix = if image.explicit_settings {
                ""
            } else {
                " (default settings)"
            };
            lines.push(format!("{} {}{}", format_index(pos + 1), image.name, suffix));
            lines.push(format!(
                "    Source: {}",
                image
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            ));
            let variants = image
                .variants
                .iter()
                .map(|v| format!("{}: {}x{}", v.kind.suffix(), v.width, v.height))
                .collect::<Vec<_>>()
                .join("   ");
            lines.push(format!("    {variants}"));
        }
    }

    if !report.failed.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Failed".to_string());
        for (pos, failure) in report.failed.iter().enumerate() {
            lines.push(format!("{} {}", format_index(pos + 1), failure.name));
            lines.push(format!("    {}", failure.reason));
        }
    }

    if !report.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for name in &report.skipped {
            lines.push(format!("    {name}"));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Optimized {} images ({} variants), {} failed, {} skipped",
        report.optimized.len(),
        report.variant_count(),
        report.failed.len(),
        report.skipped.len()
    ));

    lines
}

/// Print the optimize-stage report to stdout.
pub fn print_optimize_report(report: &OptimizeReport) {
    for line in format_optimize_report(report) {
        println!("{line}");
    }
}

/// Format the generate-stage summary.
pub fn format_generate_summary(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();
    let titles = ["Landing", "Privacy", "Not found"];
    for (title, page) in titles.iter().zip(&summary.pages) {
        lines.push(format!("{title} → {page}"));
    }
    lines.push(String::new());
    lines.push(format!("Copied {} optimized images", summary.images_copied));
    if !summary.missing_variants.is_empty() {
        lines.push(format!(
            "Missing {} variants (run `villa-press optimize`): {}",
            summary.missing_variants.len(),
            summary.missing_variants.join(", ")
        ));
    }
    lines
}

/// Print the generate-stage summary to stdout.
pub fn print_generate_summary(summary: &GenerateSummary) {
    for line in format_generate_summary(summary) {
        println!("{line}");
    }
}
