extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::vbox::ColorBox;

/// A finished box and its representative color.
#[derive(Debug)]
pub struct ColorMapEntry {
    vbox: ColorBox,
    color: RGB8,
}

impl ColorMapEntry {
    pub fn color(&self) -> RGB8 {
        self.color
    }

    pub fn vbox(&self) -> &ColorBox {
        &self.vbox
    }
}

/// The quantized palette: boxes with their average colors, ordered by
/// `count * volume` descending (most significant region first).
#[derive(Debug, Default)]
pub struct ColorMap {
    entries: Vec<ColorMapEntry>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add a box, computing its color now. Boxes with equal weight keep push order.
    pub fn push(&mut self, vbox: ColorBox) {
        let color = vbox.average();
        let key = vbox.weighted_volume();
        let pos = self
            .entries
            .partition_point(|e| e.vbox.weighted_volume() >= key);
        self.entries.insert(pos, ColorMapEntry { vbox, color });
    }

    /// Representative colors in palette order.
    pub fn palette(&self) -> Vec<RGB8> {
        self.entries.iter().map(|e| e.color).collect()
    }

    pub fn entries(&self) -> &[ColorMapEntry] {
        &self.entries
    }

    pub fn boxes(&self) -> impl Iterator<Item = &ColorBox> + '_ {
        self.entries.iter().map(|e| &e.vbox)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest palette color by Euclidean RGB distance. First entry wins ties.
    pub fn nearest(&self, color: RGB8) -> Option<RGB8> {
        let mut best: Option<(u32, RGB8)> = None;
        for entry in &self.entries {
            let d = distance_sq(color, entry.color);
            if best.is_none_or(|(best_dist, _)| d < best_dist) {
                best = Some((d, entry.color));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Color of the first box containing `color`, else the nearest color.
    pub fn map(&self, color: RGB8) -> Option<RGB8> {
        self.entries
            .iter()
            .find(|e| e.vbox.contains(color))
            .map(|e| e.color)
            .or_else(|| self.nearest(color))
    }
}

/// Squared Euclidean distance in 8-bit RGB. Same ordering as the true distance.
#[inline]
fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db) as u32
}
