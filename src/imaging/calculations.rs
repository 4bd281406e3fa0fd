//! Pure calculation functions for crop and resize geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{CropRatio, CropWindow, Offset};

/// Calculate the crop window for a ratio crop anchored by an offset.
///
/// The window is the largest rectangle of the requested aspect ratio that
/// fits inside the source, positioned at the center and then shifted by the
/// offset. Shifts that would push the window out of bounds are clamped, so
/// the result always lies fully within the source.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height)
/// * `ratio` - Target aspect ratio
/// * `offset` - Signed shift away from the centered position
pub fn calculate_crop_window(source: (u32, u32), ratio: CropRatio, offset: Offset) -> CropWindow {
    let (src_w, src_h) = source;

    // Largest window of the requested ratio that fits the source.
    let (crop_w, crop_h) = if (src_w as u64) * (ratio.h as u64) <= (src_h as u64) * (ratio.w as u64)
    {
        // Width is the limiting dimension
        let w = src_w;
        let h = ((w as u64 * ratio.h as u64) / ratio.w as u64) as u32;
        (w, h)
    } else {
        // Height is the limiting dimension
        let h = src_h;
        let w = ((h as u64 * ratio.w as u64) / ratio.h as u64) as u32;
        (w, h)
    };

    let max_x = (src_w - crop_w) as i64;
    let max_y = (src_h - crop_h) as i64;
    let x = (max_x / 2 + offset.x as i64).clamp(0, max_x) as u32;
    let y = (max_y / 2 + offset.y as i64).clamp(0, max_y) as u32;

    CropWindow {
        x,
        y,
        width: crop_w,
        height: crop_h,
    }
}

/// Calculate output dimensions for resizing a crop to a target width.
///
/// The width becomes exactly `target_width`; the height scales to preserve
/// the crop's aspect ratio. Upscaling is permitted — the variant widths are a
/// delivery contract, not a quality hint.
pub fn calculate_resize_dimensions(crop: (u32, u32), target_width: u32) -> (u32, u32) {
    let (crop_w, crop_h) = crop;
    let height = (crop_h as f64 * target_width as f64 / crop_w as f64).round() as u32;
    (target_width, height.max(1))
}
