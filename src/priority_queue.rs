extern crate alloc;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Ascending comparison of two keys, for building queue comparators.
#[inline]
pub fn natural_order<K: Ord>(a: K, b: K) -> Ordering {
    a.cmp(&b)
}

/// A queue ordered by a caller-supplied comparator.
///
/// Items are appended unsorted and the backing vector is only sorted when an
/// ordered read (`pop`, `peek`, `iter`) happens after a `push`. The maximum
/// element per the comparator sits at the end, so `pop` is a plain `Vec::pop`
/// once sorted.
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    contents: Vec<T>,
    sorted: bool,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> Self {
        Self {
            contents: Vec::new(),
            sorted: false,
            compare,
        }
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            contents: Vec::with_capacity(capacity),
            sorted: false,
            compare,
        }
    }

    pub fn push(&mut self, item: T) {
        self.contents.push(item);
        self.sorted = false;
    }

    /// Remove and return the maximum element.
    pub fn pop(&mut self) -> Option<T> {
        self.ensure_sorted();
        self.contents.pop()
    }

    /// Element at ascending rank `index`.
    ///
    /// A negative or out-of-range index yields the maximum element.
    pub fn peek(&mut self, index: isize) -> Option<&T> {
        self.ensure_sorted();
        let len = self.contents.len();
        match usize::try_from(index) {
            Ok(i) if i < len => self.contents.get(i),
            _ => self.contents.last(),
        }
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Iterate in ascending order.
    pub fn iter(&mut self) -> core::slice::Iter<'_, T> {
        self.ensure_sorted();
        self.contents.iter()
    }

    /// Map over the stored items in their current storage order, without sorting.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vec<U> {
        self.contents.iter().map(f).collect()
    }

    /// Consume the queue, returning items in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.ensure_sorted();
        self.contents
    }

    fn ensure_sorted(&mut self) {
        if !self.sorted {
            let compare = &self.compare;
            self.contents.sort_by(|a, b| compare(a, b));
            self.sorted = true;
        }
    }
}

impl<T: core::fmt::Debug, F> core::fmt::Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("contents", &self.contents)
            .field("sorted", &self.sorted)
            .finish()
    }
}
