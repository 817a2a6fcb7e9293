extern crate alloc;
use alloc::sync::Arc;
use core::cell::OnceCell;
use core::ops::RangeInclusive;

use rgb::RGB8;

use crate::histogram::{Histogram, RSHIFT, color_index, reduce_channel};

/// An axis of the reduced color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Red,
    Green,
    Blue,
}

/// An axis-aligned box over the reduced color space.
///
/// Bounds are inclusive and always satisfy `lo <= hi`. `volume`, `count` and
/// `average` are computed on first access and cached, so bounds must not change
/// after any of them has been read; splitting works on fresh copies instead.
///
/// A box is meant to have a single owner: the caches are not `Sync`.
#[derive(Debug)]
pub struct ColorBox {
    r1: u8,
    r2: u8,
    g1: u8,
    g2: u8,
    b1: u8,
    b2: u8,
    histogram: Arc<Histogram>,
    volume: OnceCell<u32>,
    count: OnceCell<u64>,
    average: OnceCell<RGB8>,
}

impl ColorBox {
    /// Box spanning the reduced bounds of `pixels`. `None` if `pixels` is empty.
    pub fn from_pixels(pixels: &[RGB8], histogram: Arc<Histogram>) -> Option<Self> {
        let first = pixels.first()?;
        let (mut rmin, mut gmin, mut bmin) = (
            reduce_channel(first.r),
            reduce_channel(first.g),
            reduce_channel(first.b),
        );
        let (mut rmax, mut gmax, mut bmax) = (rmin, gmin, bmin);

        for p in &pixels[1..] {
            let (r, g, b) = (reduce_channel(p.r), reduce_channel(p.g), reduce_channel(p.b));
            rmin = rmin.min(r);
            rmax = rmax.max(r);
            gmin = gmin.min(g);
            gmax = gmax.max(g);
            bmin = bmin.min(b);
            bmax = bmax.max(b);
        }

        Some(Self::new(rmin, rmax, gmin, gmax, bmin, bmax, histogram))
    }

    pub(crate) fn new(
        r1: u8,
        r2: u8,
        g1: u8,
        g2: u8,
        b1: u8,
        b2: u8,
        histogram: Arc<Histogram>,
    ) -> Self {
        debug_assert!(r1 <= r2 && g1 <= g2 && b1 <= b2);
        Self {
            r1,
            r2,
            g1,
            g2,
            b1,
            b2,
            histogram,
            volume: OnceCell::new(),
            count: OnceCell::new(),
            average: OnceCell::new(),
        }
    }

    /// Same bounds and histogram, with empty caches.
    pub fn copy(&self) -> Self {
        Self::new(
            self.r1,
            self.r2,
            self.g1,
            self.g2,
            self.b1,
            self.b2,
            Arc::clone(&self.histogram),
        )
    }

    /// Inclusive reduced-space range along `axis`.
    pub fn range(&self, axis: Axis) -> RangeInclusive<u8> {
        match axis {
            Axis::Red => self.r1..=self.r2,
            Axis::Green => self.g1..=self.g2,
            Axis::Blue => self.b1..=self.b2,
        }
    }

    /// Number of cells along `axis`.
    pub fn extent(&self, axis: Axis) -> u32 {
        let range = self.range(axis);
        u32::from(*range.end() - *range.start()) + 1
    }

    pub fn histogram(&self) -> &Arc<Histogram> {
        &self.histogram
    }

    /// Copy of this box with the bounds along `axis` replaced.
    pub(crate) fn with_range(&self, axis: Axis, lo: u8, hi: u8) -> Self {
        let mut b = self.copy();
        match axis {
            Axis::Red => (b.r1, b.r2) = (lo, hi),
            Axis::Green => (b.g1, b.g2) = (lo, hi),
            Axis::Blue => (b.b1, b.b2) = (lo, hi),
        }
        debug_assert!(lo <= hi);
        b
    }

    /// Reduced-space cell count.
    pub fn volume(&self) -> u32 {
        *self.volume.get_or_init(|| {
            self.extent(Axis::Red) * self.extent(Axis::Green) * self.extent(Axis::Blue)
        })
    }

    /// Number of pixels inside the box.
    pub fn count(&self) -> u64 {
        *self.count.get_or_init(|| {
            let mut npix = 0u64;
            for r in self.r1..=self.r2 {
                for g in self.g1..=self.g2 {
                    for b in self.b1..=self.b2 {
                        npix += u64::from(self.histogram.at(r, g, b));
                    }
                }
            }
            npix
        })
    }

    /// `count * volume`, the ordering key for volume-weighted splitting.
    pub fn weighted_volume(&self) -> u64 {
        self.count() * u64::from(self.volume())
    }

    /// Population-weighted mean color in 8-bit space.
    ///
    /// Cells contribute their center (`(i + 0.5) * 8`). An empty box yields the
    /// midpoint of its bounds.
    pub fn average(&self) -> RGB8 {
        *self.average.get_or_init(|| {
            let mult = f64::from(1u32 << RSHIFT);
            let mut ntot = 0u64;
            let (mut rsum, mut gsum, mut bsum) = (0.0f64, 0.0f64, 0.0f64);

            for r in self.r1..=self.r2 {
                for g in self.g1..=self.g2 {
                    for b in self.b1..=self.b2 {
                        let hval = self.histogram.get(color_index(r, g, b));
                        if hval == 0 {
                            continue;
                        }
                        let h = f64::from(hval);
                        ntot += u64::from(hval);
                        rsum += h * (f64::from(r) + 0.5) * mult;
                        gsum += h * (f64::from(g) + 0.5) * mult;
                        bsum += h * (f64::from(b) + 0.5) * mult;
                    }
                }
            }

            if ntot > 0 {
                let n = ntot as f64;
                RGB8::new(
                    truncate_channel(rsum / n),
                    truncate_channel(gsum / n),
                    truncate_channel(bsum / n),
                )
            } else {
                let mid = |lo: u8, hi: u8| {
                    truncate_channel(mult * (f64::from(lo) + f64::from(hi) + 1.0) / 2.0)
                };
                RGB8::new(
                    mid(self.r1, self.r2),
                    mid(self.g1, self.g2),
                    mid(self.b1, self.b2),
                )
            }
        })
    }

    /// Whether the pixel's reduced coordinates fall inside the box.
    pub fn contains(&self, pixel: RGB8) -> bool {
        let (r, g, b) = (
            reduce_channel(pixel.r),
            reduce_channel(pixel.g),
            reduce_channel(pixel.b),
        );
        (self.r1..=self.r2).contains(&r)
            && (self.g1..=self.g2).contains(&g)
            && (self.b1..=self.b2).contains(&b)
    }
}

/// Truncate toward zero into 0..=255.
#[inline]
fn truncate_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
