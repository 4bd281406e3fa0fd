//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_crop_window, calculate_resize_dimensions};
use super::params::{Blur, ConvertParams, CropRatio, Offset, Quality, Speed};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// The three delivery variants produced for every source image.
///
/// Each variant fixes a crop ratio and output width; the small variant is the
/// only one that takes the shared gaussian blur (it serves as a low-cost
/// mobile background, so softness is acceptable and bytes matter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Small,
    Medium,
    Large,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [VariantKind::Small, VariantKind::Medium, VariantKind::Large];

    /// Filename suffix: `{base}-{suffix}.avif`.
    pub fn suffix(self) -> &'static str {
        match self {
            VariantKind::Small => "small",
            VariantKind::Medium => "medium",
            VariantKind::Large => "large",
        }
    }

    /// Crop aspect ratio.
    pub fn ratio(self) -> CropRatio {
        match self {
            VariantKind::Small => CropRatio::new(9, 16),
            VariantKind::Medium => CropRatio::new(4, 3),
            VariantKind::Large => CropRatio::new(16, 9),
        }
    }

    /// Output width in pixels.
    pub fn target_width(self) -> u32 {
        match self {
            VariantKind::Small => 520,
            VariantKind::Medium => 1200,
            VariantKind::Large => 1920,
        }
    }

    /// Whether the shared blur applies to this variant.
    pub fn takes_blur(self) -> bool {
        matches!(self, VariantKind::Small)
    }
}

/// Output filename for a variant of the given base name.
pub fn variant_filename(stem: &str, kind: VariantKind) -> String {
    format!("{}-{}.avif", stem, kind.suffix())
}

/// A generated image variant with its output path.
#[derive(Debug, Clone)]
pub struct GeneratedVariant {
    pub kind: VariantKind,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Create one variant of a source image.
///
/// Computes the offset-anchored crop window and resize dimensions, then asks
/// the backend to execute the conversion. `blur` is applied only when the
/// variant kind takes it.
#[allow(clippy::too_many_arguments)]
pub fn create_variant(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    stem: &str,
    kind: VariantKind,
    source_dims: (u32, u32),
    offset: Offset,
    quality: Quality,
    blur: Option<Blur>,
    speed: Speed,
) -> Result<GeneratedVariant> {
    let crop = calculate_crop_window(source_dims, kind.ratio(), offset);
    let (width, height) = calculate_resize_dimensions((crop.width, crop.height), kind.target_width());

    let filename = variant_filename(stem, kind);
    backend.convert(&ConvertParams {
        source: source.to_path_buf(),
        output: output_dir.join(&filename),
        crop,
        width,
        height,
        blur: blur.filter(|_| kind.takes_blur()),
        quality,
        speed,
    })?;

    Ok(GeneratedVariant {
        kind,
        filename,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1920,
            height: 1080,
        }]);

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn variant_table_matches_delivery_contract() {
        assert_eq!(VariantKind::Small.ratio(), CropRatio::new(9, 16));
        assert_eq!(VariantKind::Small.target_width(), 520);
        assert!(VariantKind::Small.takes_blur());

        assert_eq!(VariantKind::Medium.ratio(), CropRatio::new(4, 3));
        assert_eq!(VariantKind::Medium.target_width(), 1200);
        assert!(!VariantKind::Medium.takes_blur());

        assert_eq!(VariantKind::Large.ratio(), CropRatio::new(16, 9));
        assert_eq!(VariantKind::Large.target_width(), 1920);
        assert!(!VariantKind::Large.takes_blur());
    }

    #[test]
    fn variant_filenames() {
        assert_eq!(variant_filename("pool", VariantKind::Small), "pool-small.avif");
        assert_eq!(
            variant_filename("living-room", VariantKind::Large),
            "living-room-large.avif"
        );
    }

    #[test]
    fn create_variant_computes_crop_and_resize() {
        let backend = MockBackend::new();
        let variant = create_variant(
            &backend,
            Path::new("/in/pool.jpg"),
            Path::new("/out"),
            "pool",
            VariantKind::Large,
            (4000, 3000),
            Offset::default(),
            Quality::new(55),
            Some(Blur::new(8.0)),
            Speed::new(8),
        )
        .unwrap();

        assert_eq!(variant.filename, "pool-large.avif");
        assert_eq!((variant.width, variant.height), (1920, 1080));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Convert {
                output,
                crop: (0, 375, 4000, 2250),
                width: 1920,
                height: 1080,
                blur_sigma: None, // large never blurs
                quality: 55,
                speed: 8,
                ..
            } if output.ends_with("pool-large.avif")
        ));
    }

    #[test]
    fn create_variant_applies_blur_only_to_small() {
        let backend = MockBackend::new();
        create_variant(
            &backend,
            Path::new("/in/pool.jpg"),
            Path::new("/out"),
            "pool",
            VariantKind::Small,
            (4000, 3000),
            Offset::default(),
            Quality::new(45),
            Some(Blur::new(8.0)),
            Speed::new(8),
        )
        .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Convert {
                blur_sigma: Some(s),
                ..
            } if *s == 8.0
        ));
    }

    #[test]
    fn create_variant_honors_offset() {
        let backend = MockBackend::new();
        create_variant(
            &backend,
            Path::new("/in/pool.jpg"),
            Path::new("/out"),
            "pool",
            VariantKind::Large,
            (4000, 3000),
            Offset::new(0, 200),
            Quality::new(55),
            None,
            Speed::default(),
        )
        .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(&ops[0], RecordedOp::Convert { crop: (0, 575, ..), .. }));
    }
}
