extern crate alloc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;

use log::{debug, trace};
use rgb::RGB8;

use crate::color_map::ColorMap;
use crate::histogram::{Histogram, color_index};
use crate::priority_queue::{PriorityQueue, natural_order};
use crate::vbox::{Axis, ColorBox};

/// Split attempts allowed per refinement phase.
pub const MAX_ITERATIONS: usize = 1000;

/// Share of the target color count produced by the population-ordered phase.
pub const FRACT_BY_POPULATION: f64 = 0.75;

/// Outcome of cutting one box.
#[derive(Debug)]
pub enum Cut {
    /// The box holds no pixels.
    Unpopulated,
    /// The box holds pixels but no median slice was found.
    NoCut,
    /// The box cannot be subdivided further.
    Single(ColorBox),
    /// The two halves on either side of the cut plane.
    Pair(ColorBox, ColorBox),
}

/// Axis with the largest extent. Ties go to red, then green, then blue.
fn widest_axis(vbox: &ColorBox) -> Axis {
    let rw = vbox.extent(Axis::Red);
    let gw = vbox.extent(Axis::Green);
    let bw = vbox.extent(Axis::Blue);
    let maxw = rw.max(gw).max(bw);
    if maxw == rw {
        Axis::Red
    } else if maxw == gw {
        Axis::Green
    } else {
        Axis::Blue
    }
}

/// Population of the plane `axis == coord` clipped to the box's other two ranges.
fn slice_count(histogram: &Histogram, vbox: &ColorBox, axis: Axis, coord: u8) -> u64 {
    let (first, second) = match axis {
        Axis::Red => (Axis::Green, Axis::Blue),
        Axis::Green => (Axis::Red, Axis::Blue),
        Axis::Blue => (Axis::Red, Axis::Green),
    };

    let mut sum = 0u64;
    for j in vbox.range(first) {
        for k in vbox.range(second) {
            let index = match axis {
                Axis::Red => color_index(coord, j, k),
                Axis::Green => color_index(j, coord, k),
                Axis::Blue => color_index(j, k, coord),
            };
            sum += u64::from(histogram.get(index));
        }
    }
    sum
}

/// Cut a box at the population median of its widest axis.
///
/// The raw median is pulled toward the middle of the longer side, then moved
/// off empty slices so that both halves hold pixels whenever the box has more
/// than one populated slice along the axis.
pub fn median_cut_apply(histogram: &Histogram, vbox: &ColorBox) -> Cut {
    let count = vbox.count();
    if count == 0 {
        return Cut::Unpopulated;
    }
    if count == 1 {
        return Cut::Single(vbox.copy());
    }

    let axis = widest_axis(vbox);
    let range = vbox.range(axis);
    let (lo, hi) = (i64::from(*range.start()), i64::from(*range.end()));
    if lo == hi {
        // Widest extent is one cell, so the whole box is a single cell.
        return Cut::Single(vbox.copy());
    }

    let mut total = 0u64;
    let partial: Vec<u64> = range
        .map(|coord| {
            total += slice_count(histogram, vbox, axis, coord);
            total
        })
        .collect();
    let lookahead: Vec<u64> = partial.iter().map(|&p| total - p).collect();

    // Slices are stored from `lo`, so coordinate `c` lives at `c - lo`.
    let at = |values: &[u64], coord: i64| values[(coord - lo) as usize];

    let Some(offset) = partial.iter().position(|&p| 2 * p > total) else {
        return Cut::NoCut;
    };
    let i = lo + offset as i64;

    let left = i - lo;
    let right = hi - i;
    // Halves use truncating division on doubled values: (2x + y) / 2 == trunc(x + y / 2).
    let mut d2 = if left <= right {
        (hi - 1).min((2 * i + right) / 2)
    } else {
        lo.max((2 * i - 2 - left) / 2)
    };

    while d2 < hi - 1 && at(&partial, d2) == 0 {
        d2 += 1;
    }
    while d2 > lo && at(&lookahead, d2) == 0 && at(&partial, d2 - 1) > 0 {
        d2 -= 1;
    }

    let (lo, hi, d2) = (lo as u8, hi as u8, d2 as u8);
    Cut::Pair(vbox.with_range(axis, lo, d2), vbox.with_range(axis, d2 + 1, hi))
}

/// Pop-split-push until the queue plus settled boxes reach `target`.
///
/// Returns the number of iterations consumed.
fn iterate<F>(
    queue: &mut PriorityQueue<ColorBox, F>,
    settled: &mut Vec<ColorBox>,
    histogram: &Histogram,
    target: usize,
) -> usize
where
    F: Fn(&ColorBox, &ColorBox) -> Ordering,
{
    let mut iterations = 0;

    while queue.len() + settled.len() < target && iterations < MAX_ITERATIONS {
        let Some(vbox) = queue.pop() else {
            break;
        };
        iterations += 1;

        if vbox.count() == 0 {
            queue.push(vbox);
            continue;
        }

        match median_cut_apply(histogram, &vbox) {
            Cut::Pair(first, second) => {
                queue.push(first);
                queue.push(second);
            }
            Cut::Single(single) => {
                trace!("box with {} pixels cannot be split", single.count());
                settled.push(single);
            }
            Cut::NoCut => {
                trace!("no cut plane for box with {} pixels", vbox.count());
                settled.push(vbox);
            }
            Cut::Unpopulated => queue.push(vbox),
        }
    }

    iterations
}

/// Modified median cut over validated, non-empty pixels.
///
/// Phase one splits the most populous boxes until `0.75 * color_count` boxes
/// exist. Phase two re-ranks by `count * volume` and splits until
/// `color_count` boxes exist. Either phase also stops after
/// [`MAX_ITERATIONS`] attempts, so the result may hold fewer colors.
pub(crate) fn quantize_pixels(pixels: &[RGB8], color_count: usize) -> ColorMap {
    let histogram = Arc::new(Histogram::from_pixels(pixels));
    debug!(
        "histogram: {} pixels in {} cells",
        histogram.total(),
        histogram.populated()
    );
    let Some(seed) = ColorBox::from_pixels(pixels, Arc::clone(&histogram)) else {
        return ColorMap::new();
    };

    let mut settled = Vec::new();

    let mut by_count = PriorityQueue::with_capacity(color_count, |a: &ColorBox, b: &ColorBox| {
        natural_order(a.count(), b.count())
    });
    by_count.push(seed);

    let population_target = (FRACT_BY_POPULATION * color_count as f64) as usize;
    let iterations = iterate(&mut by_count, &mut settled, &histogram, population_target);
    debug!(
        "population phase: {} boxes ({} settled) after {} iterations",
        by_count.len() + settled.len(),
        settled.len(),
        iterations
    );

    let mut by_volume =
        PriorityQueue::with_capacity(color_count, |a: &ColorBox, b: &ColorBox| {
            natural_order(a.weighted_volume(), b.weighted_volume())
        });
    while let Some(vbox) = by_count.pop() {
        by_volume.push(vbox);
    }

    let iterations = iterate(&mut by_volume, &mut settled, &histogram, color_count);
    debug!(
        "volume phase: {} boxes ({} settled) after {} iterations",
        by_volume.len() + settled.len(),
        settled.len(),
        iterations
    );

    let mut cmap = ColorMap::with_capacity(by_volume.len() + settled.len());
    while let Some(vbox) = by_volume.pop() {
        cmap.push(vbox);
    }
    for vbox in settled {
        cmap.push(vbox);
    }
    cmap
}
