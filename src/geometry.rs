//! Axis-aligned integer rectangles.

use std::fmt;

/// Rectangle with an inclusive min corner and an exclusive max corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (inclusive).
    pub min_x: usize,
    /// Top edge (inclusive).
    pub min_y: usize,
    /// Right edge (exclusive).
    pub max_x: usize,
    /// Bottom edge (exclusive).
    pub max_y: usize,
}

impl Rect {
    /// Creates a rectangle from its corners; the max corner is clamped so that
    /// width and height are never negative.
    pub fn new(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            min_x,
            min_y,
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_size(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns the overlap of two rectangles (empty if they are disjoint).
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        if min_x >= max_x || min_y >= max_y {
            return Rect::default();
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Multiplies both corners by `factor`, truncating toward zero.
    pub fn scale(&self, factor: f64) -> Rect {
        let s = |v: usize| (v as f64 * factor) as usize;
        Rect::new(s(self.min_x), s(self.min_y), s(self.max_x), s(self.max_y))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
