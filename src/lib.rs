//! Palette and dominant color extraction with modified median cut quantization (MMCQ).
//!
//! Pixels are counted into a 5-bit-per-channel histogram, the populated color
//! space is recursively cut at the population median of its widest axis, and
//! each resulting box contributes its average color to the palette.
//!
//! ```
//! use zenpalette::{PaletteConfig, RGBA8};
//!
//! let mut pixels = vec![RGBA8::new(200, 30, 30, 255); 600];
//! pixels.extend(vec![RGBA8::new(20, 40, 220, 255); 400]);
//!
//! let config = PaletteConfig::new().color_count(4).quality(1);
//! let palette = zenpalette::get_palette(&pixels, &config).unwrap();
//! assert!(!palette.is_empty() && palette.len() <= 4);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod color_map;
pub mod error;
pub mod histogram;
#[cfg(feature = "image")]
pub mod image_source;
pub mod median_cut;
pub mod priority_queue;
pub mod sampling;
pub mod vbox;

pub use color_map::{ColorMap, ColorMapEntry};
pub use error::QuantizeError;
pub use priority_queue::PriorityQueue;
pub use rgb::{RGB8, RGBA8};
pub use vbox::{Axis, ColorBox};

use alloc::vec::Vec;

/// Smallest accepted `color_count`.
pub const MIN_COLORS: u32 = 2;
/// Largest accepted `color_count`.
pub const MAX_COLORS: u32 = 256;

/// Palette size used by [`get_color`]; the dominant color is its first entry.
pub const DOMINANT_COLOR_COUNT: u32 = 5;

/// Configuration for palette extraction from RGBA input.
#[derive(Debug, Clone)]
pub struct PaletteConfig {
    /// Number of palette colors to aim for (2..=256). The result may be slightly smaller.
    pub color_count: u32,
    /// Sampling stride: every `quality`-th pixel is considered. 1 = every pixel.
    pub quality: u32,
    /// Keep near-white pixels (all channels above 250).
    pub allow_white: bool,
    /// Minimum alpha for a pixel to be sampled.
    pub alpha_threshold: u8,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            color_count: 10,
            quality: 10,
            allow_white: false,
            alpha_threshold: 125,
        }
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_count(mut self, n: u32) -> Self {
        self.color_count = n;
        self
    }

    pub fn quality(mut self, q: u32) -> Self {
        self.quality = q;
        self
    }

    pub fn allow_white(mut self, allow: bool) -> Self {
        self.allow_white = allow;
        self
    }

    pub fn alpha_threshold(mut self, alpha: u8) -> Self {
        self.alpha_threshold = alpha;
        self
    }
}

/// Quantize RGB samples into a [`ColorMap`] of about `color_count` colors.
///
/// Fails on empty input or a `color_count` outside `2..=256`, before any
/// histogram work. The palette can come out smaller than requested when the
/// input has few distinct colors.
pub fn quantize(pixels: &[RGB8], color_count: u32) -> Result<ColorMap, QuantizeError> {
    if pixels.is_empty() {
        return Err(QuantizeError::EmptyPixels);
    }
    validate_color_count(color_count)?;

    log::debug!(
        "quantizing {} pixels to {} colors",
        pixels.len(),
        color_count
    );
    Ok(median_cut::quantize_pixels(pixels, color_count as usize))
}

/// Palette of RGBA pixels, most significant color first.
pub fn get_palette(pixels: &[RGBA8], config: &PaletteConfig) -> Result<Vec<RGB8>, QuantizeError> {
    validate_color_count(config.color_count)?;
    let samples = sampling::sample_rgba(pixels, config)?;
    Ok(quantize(&samples, config.color_count)?.palette())
}

/// Palette of a tightly packed RGBA8 buffer, most significant color first.
pub fn get_palette_from_bytes(
    data: &[u8],
    config: &PaletteConfig,
) -> Result<Vec<RGB8>, QuantizeError> {
    validate_color_count(config.color_count)?;
    let samples = sampling::sample_rgba_bytes(data, config)?;
    Ok(quantize(&samples, config.color_count)?.palette())
}

/// Dominant color of RGBA pixels: the first entry of a
/// [`DOMINANT_COLOR_COUNT`]-color palette. `config.color_count` is ignored.
pub fn get_color(pixels: &[RGBA8], config: &PaletteConfig) -> Result<RGB8, QuantizeError> {
    let samples = sampling::sample_rgba(pixels, config)?;
    dominant_color(&samples)
}

/// Dominant color of a tightly packed RGBA8 buffer.
pub fn get_color_from_bytes(data: &[u8], config: &PaletteConfig) -> Result<RGB8, QuantizeError> {
    let samples = sampling::sample_rgba_bytes(data, config)?;
    dominant_color(&samples)
}

fn dominant_color(samples: &[RGB8]) -> Result<RGB8, QuantizeError> {
    quantize(samples, DOMINANT_COLOR_COUNT)?
        .entries()
        .first()
        .map(ColorMapEntry::color)
        .ok_or(QuantizeError::EmptyPixels)
}

fn validate_color_count(color_count: u32) -> Result<(), QuantizeError> {
    if !(MIN_COLORS..=MAX_COLORS).contains(&color_count) {
        return Err(QuantizeError::InvalidColorCount(color_count));
    }
    Ok(())
}
