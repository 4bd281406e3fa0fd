//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG) | `image` crate (pure Rust decoders) |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Blur | `image::DynamicImage::blur` (gaussian) |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e) |
//!
//! The encoder writes pixel data only — embedded camera metadata never
//! survives a conversion, which is the "strip" step of the original tool.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ConvertParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Source extensions the pipeline accepts, lowercase.
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Returns true when the path has a decodable source extension (any case).
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode a source image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save as AVIF at the given speed and quality.
fn save_avif(img: &DynamicImage, path: &Path, quality: u32, speed: u8) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder =
        image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, speed, quality as u8);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("AVIF encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        let cropped = img.crop_imm(
            params.crop.x,
            params.crop.y,
            params.crop.width,
            params.crop.height,
        );
        let resized = cropped.resize_exact(params.width, params.height, FilterType::Lanczos3);
        let final_img = match params.blur {
            Some(blur) => resized.blur(blur.sigma),
            None => resized,
        };

        save_avif(
            &final_img,
            &params.output,
            params.quality.value(),
            params.speed.value(),
        )
    }
}
