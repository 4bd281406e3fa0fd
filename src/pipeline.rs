//! Batch image optimization.
//!
//! Takes a directory of original photographs and a JSON settings document and
//! produces three web-optimized AVIF variants per image. This is the build-time
//! half of the site: the generate stage only references the variant files this
//! stage writes.
//!
//! ## Settings Document
//!
//! ```json
//! {
//!   "defaults": { "blur": "0x8", "speed": "8" },
//!   "images": {
//!     "pool":          { "offset": "+0+120", "small_q": 45, "medium_q": 60, "large_q": 55 },
//!     "default_image": { "offset": "+0+0",   "small_q": 45, "medium_q": 60, "large_q": 55 }
//!   }
//! }
//! ```
//!
//! Images without an explicit entry use `default_image`. The `defaults` block
//! holds run-wide values: the blur applied to small variants and the encoder
//! speed.
//!
//! ## Output Structure
//!
//! ```text
//! optimized/
//! ├── pool-small.avif        # 9:16 crop, 520px wide, blurred
//! ├── pool-medium.avif       # 4:3 crop, 1200px wide
//! ├── pool-large.avif        # 16:9 crop, 1920px wide
//! └── ...
//! ```
//!
//! ## Failure Policy
//!
//! The batch is best-effort: a failed conversion is logged with `log::warn!`,
//! recorded in the run report, and processing moves to the next file. Only
//! settings/IO errors that invalidate the whole run abort it.

use crate::imaging::{
    Blur, GeneratedVariant, ImageBackend, Offset, Quality, RustBackend, Speed, VariantKind,
    create_variant, get_dimensions, is_supported_input,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the fallback settings entry within `images`.
const DEFAULT_IMAGE_KEY: &str = "default_image";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),
}

/// Raw settings document as it appears on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub defaults: RawDefaults,
    pub images: BTreeMap<String, RawImageSettings>,
}

/// Run-wide values, string-typed on the wire.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefaults {
    /// Gaussian blur in `RxS` notation, applied to small variants only.
    pub blur: String,
    /// AVIF encoder speed.
    pub speed: String,
}

/// Per-image override entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawImageSettings {
    /// Crop anchor shift in `±x±y` notation.
    pub offset: String,
    pub small_q: u32,
    pub medium_q: u32,
    pub large_q: u32,
}

/// Parsed run-wide values.
#[derive(Debug, Clone, Copy)]
pub struct GlobalDefaults {
    pub blur: Blur,
    pub speed: Speed,
}

/// Parsed per-image settings.
#[derive(Debug, Clone, Copy)]
pub struct ImageSettings {
    pub offset: Offset,
    pub small_q: Quality,
    pub medium_q: Quality,
    pub large_q: Quality,
}

impl ImageSettings {
    pub fn quality_for(&self, kind: VariantKind) -> Quality {
        match kind {
            VariantKind::Small => self.small_q,
            VariantKind::Medium => self.medium_q,
            VariantKind::Large => self.large_q,
        }
    }
}

/// Settings document with every entry parsed and the fallback entry resolved.
#[derive(Debug)]
pub struct Settings {
    pub defaults: GlobalDefaults,
    images: BTreeMap<String, ImageSettings>,
    fallback: ImageSettings,
}

impl Settings {
    /// Settings for the named image: its explicit entry, or the fallback.
    pub fn resolve(&self, name: &str) -> ImageSettings {
        self.images.get(name).copied().unwrap_or(self.fallback)
    }

    /// Whether the named image has its own entry.
    pub fn has_entry(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }
}

fn parse_entry(name: &str, raw: &RawImageSettings) -> Result<ImageSettings, PipelineError> {
    let offset = Offset::parse(&raw.offset).ok_or_else(|| {
        PipelineError::Settings(format!("bad offset '{}' for image '{}'", raw.offset, name))
    })?;
    Ok(ImageSettings {
        offset,
        small_q: Quality::new(raw.small_q),
        medium_q: Quality::new(raw.medium_q),
        large_q: Quality::new(raw.large_q),
    })
}

/// Parse a raw settings document, requiring a `default_image` entry.
pub fn parse_settings(file: &SettingsFile) -> Result<Settings, PipelineError> {
    let blur = Blur::parse(&file.defaults.blur).ok_or_else(|| {
        PipelineError::Settings(format!("bad defaults.blur '{}'", file.defaults.blur))
    })?;
    let speed = Speed::parse(&file.defaults.speed).ok_or_else(|| {
        PipelineError::Settings(format!("bad defaults.speed '{}'", file.defaults.speed))
    })?;

    let mut images = BTreeMap::new();
    for (name, raw) in &file.images {
        images.insert(name.clone(), parse_entry(name, raw)?);
    }
    let fallback = images.remove(DEFAULT_IMAGE_KEY).ok_or_else(|| {
        PipelineError::Settings(format!("images.{DEFAULT_IMAGE_KEY} entry is required"))
    })?;

    Ok(Settings {
        defaults: GlobalDefaults { blur, speed },
        images,
        fallback,
    })
}

/// Load and parse the settings document from disk.
pub fn load_settings(path: &Path) -> Result<Settings, PipelineError> {
    let content = std::fs::read_to_string(path)?;
    let file: SettingsFile = serde_json::from_str(&content)?;
    parse_settings(&file)
}

/// One successfully optimized source image.
#[derive(Debug)]
pub struct OptimizedImage {
    pub name: String,
    pub source: PathBuf,
    pub variants: Vec<GeneratedVariant>,
    /// Whether the image had its own settings entry (false = used the fallback).
    pub explicit_settings: bool,
}

/// One source image whose conversion failed.
#[derive(Debug)]
pub struct FailedImage {
    pub name: String,
    pub reason: String,
}

/// Outcome of an optimization run.
#[derive(Debug, Default)]
pub struct OptimizeReport {
    pub optimized: Vec<OptimizedImage>,
    pub failed: Vec<FailedImage>,
    /// Non-image files in the input directory, by filename.
    pub skipped: Vec<String>,
}

impl OptimizeReport {
    pub fn variant_count(&self) -> usize {
        self.optimized.iter().map(|i| i.variants.len()).sum()
    }
}

/// Run the optimization batch with the production backend.
pub fn optimize(
    settings_path: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<OptimizeReport, PipelineError> {
    let backend = RustBackend::new();
    optimize_with_backend(&backend, settings_path, input_dir, output_dir)
}

/// Run the optimization batch using a specific backend (allows testing with mock).
pub fn optimize_with_backend(
    backend: &impl ImageBackend,
    settings_path: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<OptimizeReport, PipelineError> {
    let settings = load_settings(settings_path)?;
    if !input_dir.is_dir() {
        return Err(PipelineError::InputDirNotFound(input_dir.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)?;

    // Deterministic order regardless of directory iteration order.
    let mut entries: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut report = OptimizeReport::default();

    for source in entries {
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if !is_supported_input(&source) {
            log::debug!("skipping non-image file {filename}");
            report.skipped.push(filename);
            continue;
        }

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let explicit_settings = settings.has_entry(&stem);
        let image_settings = settings.resolve(&stem);
        log::debug!(
            "optimizing {stem} ({} settings)",
            if explicit_settings { "explicit" } else { "default" }
        );

        match optimize_one(backend, &source, output_dir, &stem, &settings, image_settings) {
            Ok(variants) => report.optimized.push(OptimizedImage {
                name: stem,
                source,
                variants,
                explicit_settings,
            }),
            Err(e) => {
                log::warn!("conversion failed for {}: {e}", source.display());
                report.failed.push(FailedImage {
                    name: stem,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Produce all three variants of one source image.
fn optimize_one(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    stem: &str,
    settings: &Settings,
    image_settings: ImageSettings,
) -> Result<Vec<GeneratedVariant>, crate::imaging::BackendError> {
    let dims = get_dimensions(backend, source)?;

    let mut variants = Vec::with_capacity(VariantKind::ALL.len());
    for kind in VariantKind::ALL {
        let variant = create_variant(
            backend,
            source,
            output_dir,
            stem,
            kind,
            dims,
            image_settings.offset,
            image_settings.quality_for(kind),
            Some(settings.defaults.blur),
            settings.defaults.speed,
        )?;
        variants.push(variant);
    }
    Ok(variants)
}
