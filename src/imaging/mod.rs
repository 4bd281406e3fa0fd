//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Crop → Resize → AVIF** | `crop_imm` + Lanczos3 + rav1e encoder |
//! | **Blur (small variant)** | `DynamicImage::blur` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop/resize geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{GeneratedVariant, VariantKind, create_variant, get_dimensions, variant_filename};
pub use params::{Blur, CropRatio, Offset, Quality, Speed};
pub use rust_backend::{RustBackend, is_supported_input};
