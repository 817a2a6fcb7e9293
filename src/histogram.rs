extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::RGB8;

/// Significant bits kept per channel in the reduced color space.
pub const SIGBITS: u32 = 5;
/// Right shift that takes an 8-bit channel into the reduced space.
pub const RSHIFT: u32 = 8 - SIGBITS;
/// Number of cells along one axis of the reduced space.
pub const AXIS_LEN: u8 = 1 << SIGBITS;
/// Number of cells in the reduced space (32³).
pub const HISTOGRAM_SIZE: usize = 1 << (3 * SIGBITS);

/// Reduce an 8-bit channel to its 5-bit bucket.
#[inline(always)]
pub const fn reduce_channel(v: u8) -> u8 {
    v >> RSHIFT
}

/// Pack reduced channel values into a histogram index.
#[inline(always)]
pub const fn color_index(r: u8, g: u8, b: u8) -> usize {
    ((r as usize) << (2 * SIGBITS)) + ((g as usize) << SIGBITS) + b as usize
}

/// Histogram index of a full-range pixel.
#[inline(always)]
pub const fn pixel_index(pixel: RGB8) -> usize {
    color_index(
        reduce_channel(pixel.r),
        reduce_channel(pixel.g),
        reduce_channel(pixel.b),
    )
}

/// Pixel counts over the reduced 32×32×32 color space.
///
/// Built once per quantization and shared read-only by every box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u32>,
    total: u64,
}

impl Histogram {
    /// Count every pixel into its reduced-space cell.
    pub fn from_pixels(pixels: &[RGB8]) -> Self {
        let mut counts = vec![0u32; HISTOGRAM_SIZE];
        for &pixel in pixels {
            counts[pixel_index(pixel)] += 1;
        }
        Self {
            counts,
            total: pixels.len() as u64,
        }
    }

    /// Count stored at a packed index. Out-of-range indices read as zero.
    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Count stored at reduced coordinates.
    #[inline]
    pub fn at(&self, r: u8, g: u8, b: u8) -> u32 {
        self.get(color_index(r, g, b))
    }

    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of cells with a non-zero count.
    pub fn populated(&self) -> usize {
        self.iter_populated().count()
    }

    /// `(index, count)` for each non-empty cell, in index order.
    pub fn iter_populated(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, &c)| (i, c))
    }
}
