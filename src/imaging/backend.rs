//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and convert.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Everything is statically linked into the binary.

use super::params::ConvertParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement both operations — identify and convert — so
/// the rest of the codebase is backend-agnostic.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a conversion: crop, resize, optional blur, encode.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// Uses Mutex (not RefCell) so it stays Sync like the real backend.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// Source paths whose conversions should fail.
        pub failing_sources: Mutex<Vec<String>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Convert {
            source: String,
            output: String,
            crop: (u32, u32, u32, u32),
            width: u32,
            height: u32,
            blur_sigma: Option<f32>,
            quality: u32,
            speed: u8,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Dimensions are popped per identify call; seed one entry per
        /// expected call (last in, first out).
        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Make every conversion of `source` fail with a processing error.
        pub fn fail_for(self, source: &str) -> Self {
            self.failing_sources.lock().unwrap().push(source.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Recorded conversions only, in call order.
        pub fn conversions(&self) -> Vec<RecordedOp> {
            self.get_operations()
                .into_iter()
                .filter(|op| matches!(op, RecordedOp::Convert { .. }))
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
            let source = params.source.to_string_lossy().to_string();
            if self
                .failing_sources
                .lock()
                .unwrap()
                .iter()
                .any(|s| source.contains(s.as_str()))
            {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock failure for {source}"
                )));
            }
            self.operations.lock().unwrap().push(RecordedOp::Convert {
                source,
                output: params.output.to_string_lossy().to_string(),
                crop: (
                    params.crop.x,
                    params.crop.y,
                    params.crop.width,
                    params.crop.height,
                ),
                width: params.width,
                height: params.height,
                blur_sigma: params.blur.map(|b| b.sigma),
                quality: params.quality.value(),
                speed: params.speed.value(),
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_records_convert() {
        use crate::imaging::params::{Blur, CropWindow, Quality, Speed};

        let backend = MockBackend::new();
        backend
            .convert(&ConvertParams {
                source: "/source.jpg".into(),
                output: "/out/source-small.avif".into(),
                crop: CropWindow {
                    x: 10,
                    y: 0,
                    width: 900,
                    height: 1600,
                },
                width: 520,
                height: 924,
                blur: Some(Blur::new(8.0)),
                quality: Quality::new(45),
                speed: Speed::new(8),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Convert {
                crop: (10, 0, 900, 1600),
                width: 520,
                blur_sigma: Some(s),
                quality: 45,
                speed: 8,
                ..
            } if *s == 8.0
        ));
    }

    #[test]
    fn mock_fails_for_marked_sources() {
        use crate::imaging::params::{CropWindow, Quality, Speed};

        let backend = MockBackend::new().fail_for("broken.jpg");
        let result = backend.convert(&ConvertParams {
            source: "/in/broken.jpg".into(),
            output: "/out/broken-small.avif".into(),
            crop: CropWindow {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
            },
            width: 50,
            height: 50,
            blur: None,
            quality: Quality::default(),
            speed: Speed::default(),
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(backend.conversions().is_empty());
    }
}
