//! `image` crate integration: decode a file or an encoded buffer and extract its palette.
//!
//! Decoding happens entirely before quantization; the quantizer only sees the
//! sampled pixels.
//!
//! ```rust,no_run
//! use zenpalette::{PaletteConfig, image_source};
//!
//! let config = PaletteConfig::new().color_count(6);
//! let palette = image_source::palette_from_path("photo.jpg", &config)?;
//! for c in palette {
//!     println!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b);
//! }
//! # Ok::<(), zenpalette::QuantizeError>(())
//! ```

use std::path::Path;

use image::RgbaImage;

use crate::{PaletteConfig, QuantizeError, RGB8};

fn load(path: &Path) -> Result<RgbaImage, QuantizeError> {
    let img = image::open(path)?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img.into_rgba8())
}

fn decode(bytes: &[u8]) -> Result<RgbaImage, QuantizeError> {
    Ok(image::load_from_memory(bytes)?.into_rgba8())
}

/// Palette of the image at `path`.
pub fn palette_from_path(
    path: impl AsRef<Path>,
    config: &PaletteConfig,
) -> Result<Vec<RGB8>, QuantizeError> {
    let img = load(path.as_ref())?;
    crate::get_palette_from_bytes(img.as_raw(), config)
}

/// Dominant color of the image at `path`.
pub fn color_from_path(
    path: impl AsRef<Path>,
    config: &PaletteConfig,
) -> Result<RGB8, QuantizeError> {
    let img = load(path.as_ref())?;
    crate::get_color_from_bytes(img.as_raw(), config)
}

/// Palette of an encoded image (PNG, JPEG, GIF, WebP, BMP) held in memory.
pub fn palette_from_memory(bytes: &[u8], config: &PaletteConfig) -> Result<Vec<RGB8>, QuantizeError> {
    let img = decode(bytes)?;
    crate::get_palette_from_bytes(img.as_raw(), config)
}

/// Dominant color of an encoded image held in memory.
pub fn color_from_memory(bytes: &[u8], config: &PaletteConfig) -> Result<RGB8, QuantizeError> {
    let img = decode(bytes)?;
    crate::get_color_from_bytes(img.as_raw(), config)
}
