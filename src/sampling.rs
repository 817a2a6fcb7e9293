extern crate alloc;
use alloc::vec::Vec;

use rgb::{RGB8, RGBA8};

use crate::PaletteConfig;
use crate::error::QuantizeError;

/// Channel value above which all three channels count as near-white.
pub const WHITE_THRESHOLD: u8 = 250;

#[inline]
fn is_near_white(p: RGBA8) -> bool {
    p.r > WHITE_THRESHOLD && p.g > WHITE_THRESHOLD && p.b > WHITE_THRESHOLD
}

#[inline]
fn is_eligible(p: RGBA8, config: &PaletteConfig) -> bool {
    p.a >= config.alpha_threshold && (config.allow_white || !is_near_white(p))
}

fn stride(config: &PaletteConfig) -> Result<usize, QuantizeError> {
    if config.quality == 0 {
        return Err(QuantizeError::InvalidQuality(config.quality));
    }
    Ok(config.quality as usize)
}

/// Collect eligible samples from RGBA pixels.
///
/// Visits every `quality`-th pixel and keeps those that are at least
/// `alpha_threshold` opaque and, unless `allow_white` is set, not near-white.
pub fn sample_rgba(pixels: &[RGBA8], config: &PaletteConfig) -> Result<Vec<RGB8>, QuantizeError> {
    let step = stride(config)?;
    Ok(pixels
        .iter()
        .step_by(step)
        .filter(|&&p| is_eligible(p, config))
        .map(|p| RGB8::new(p.r, p.g, p.b))
        .collect())
}

/// Same as [`sample_rgba`] over a raw, tightly packed RGBA8 buffer.
pub fn sample_rgba_bytes(data: &[u8], config: &PaletteConfig) -> Result<Vec<RGB8>, QuantizeError> {
    if data.len() % 4 != 0 {
        return Err(QuantizeError::InvalidBufferLength(data.len()));
    }
    let step = stride(config)?;
    Ok(data
        .chunks_exact(4)
        .step_by(step)
        .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
        .filter(|&p| is_eligible(p, config))
        .map(|p| RGB8::new(p.r, p.g, p.b))
        .collect())
}
