//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what variants to create) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`Speed`] — AVIF encoder speed (1–10, default 6). Clamped on construction.
//! - [`Blur`] — Gaussian blur sigma, parsed from the `RxS` settings notation.
//! - [`CropRatio`] — Target aspect ratio for a crop, e.g. 16:9.
//! - [`Offset`] — Signed crop anchor shift, parsed from `±x±y` geometry notation.
//! - [`CropWindow`] — A concrete pixel rectangle within a source image.
//! - [`ConvertParams`] — Full specification for one conversion: source, output,
//!   crop window, resize dimensions, optional blur, quality, speed.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// AVIF encoder speed (1 = slowest/best, 10 = fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(pub u8);

impl Speed {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 10))
    }

    /// Parse the settings-file notation, a bare integer string like `"8"`.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u8>().ok().map(Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(6)
    }
}

/// Gaussian blur strength.
///
/// The settings file uses the `RxS` (radius x sigma) notation inherited from
/// the original conversion tool, e.g. `"0x8"`. Only sigma matters for the
/// pure-Rust blur; a zero radius means "derive from sigma".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blur {
    pub sigma: f32,
}

impl Blur {
    pub fn new(sigma: f32) -> Self {
        Self { sigma }
    }

    /// Parse `"0x8"` → sigma 8.0. A bare number is accepted as sigma directly.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let sigma_part = match text.split_once(['x', 'X']) {
            Some((_, sigma)) => sigma,
            None => text,
        };
        let sigma: f32 = sigma_part.parse().ok()?;
        (sigma > 0.0).then_some(Self { sigma })
    }
}

/// Target aspect ratio for a crop, e.g. `CropRatio { w: 16, h: 9 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRatio {
    pub w: u32,
    pub h: u32,
}

impl CropRatio {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// Signed shift of a crop window away from the centered position, in pixels.
///
/// Written in the settings file as geometry-offset notation: `"+0+120"` moves
/// the window 120px down, `"-40+0"` moves it 40px left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parse `±x±y` notation. Empty input is the zero offset.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Self::default());
        }
        // Both components carry an explicit sign; the second starts at the
        // first sign character after position 0.
        let second = text[1..].find(['+', '-']).map(|i| i + 1)?;
        let x: i32 = text[..second].parse().ok()?;
        let y: i32 = text[second..].parse().ok()?;
        Some(Self { x, y })
    }
}

/// A concrete pixel rectangle within a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Full specification for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Region of the source to keep.
    pub crop: CropWindow,
    /// Final output dimensions after resizing the crop.
    pub width: u32,
    pub height: u32,
    /// Gaussian blur applied after the resize, if any.
    pub blur: Option<Blur>,
    pub quality: Quality,
    pub speed: Speed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn speed_clamps_and_parses() {
        assert_eq!(Speed::new(0).value(), 1);
        assert_eq!(Speed::new(12).value(), 10);
        assert_eq!(Speed::parse("8"), Some(Speed(8)));
        assert_eq!(Speed::parse(" 6 "), Some(Speed(6)));
        assert_eq!(Speed::parse("fast"), None);
    }

    #[test]
    fn blur_parses_radius_x_sigma_notation() {
        assert_eq!(Blur::parse("0x8"), Some(Blur { sigma: 8.0 }));
        assert_eq!(Blur::parse("2x1.5"), Some(Blur { sigma: 1.5 }));
    }

    #[test]
    fn blur_parses_bare_sigma() {
        assert_eq!(Blur::parse("4"), Some(Blur { sigma: 4.0 }));
    }

    #[test]
    fn blur_rejects_zero_and_garbage() {
        assert_eq!(Blur::parse("0x0"), None);
        assert_eq!(Blur::parse("soft"), None);
    }

    #[test]
    fn offset_parses_signed_pairs() {
        assert_eq!(Offset::parse("+0+120"), Some(Offset::new(0, 120)));
        assert_eq!(Offset::parse("-40+0"), Some(Offset::new(-40, 0)));
        assert_eq!(Offset::parse("+15-30"), Some(Offset::new(15, -30)));
    }

    #[test]
    fn offset_empty_is_zero() {
        assert_eq!(Offset::parse(""), Some(Offset::default()));
    }

    #[test]
    fn offset_rejects_single_component() {
        assert_eq!(Offset::parse("+120"), None);
    }
}
