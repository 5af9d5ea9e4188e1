//! Common types and utilities for the indexed-color compositing engine.
//!
//! This crate provides shared types used across the engine crates:
//! - [`Rect`] - Rectangle with position and dimensions
//! - [`RectAccumulator`] - Dirty-rectangle union builder

/// An axis-aligned rectangle: signed top-left position, unsigned size.
///
/// The right and bottom edges are exclusive: a rect at (0, 0) with width 10
/// covers columns 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-area rectangle at the origin.
    pub const EMPTY: Rect = Rect::new(0, 0, 0, 0);

    /// First column past the rectangle (x + width).
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// First row past the rectangle (y + height).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Whether `(px, py)` falls inside the rectangle.
    pub const fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Pixel count covered by the rectangle.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether this rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection with another rectangle, or [`Rect::EMPTY`] if disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            return Rect::EMPTY;
        }
        Rect::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32)
    }
}

/// Accumulates the bounding box of pixel spans actually written by a draw
/// operation, producing a dirty rectangle for incremental screen updates.
///
/// Starts empty; [`add_span`](Self::add_span) grows the box one horizontal
/// span at a time. Callers are expected to add only spans already clamped to
/// the destination, so the result never needs re-clamping.
#[derive(Debug, Clone, Copy)]
pub struct RectAccumulator {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    touched: bool,
}

impl RectAccumulator {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
            touched: false,
        }
    }

    /// Record a written span of `len` pixels starting at `(x, y)`.
    ///
    /// Zero-length spans are ignored.
    pub fn add_span(&mut self, x: i32, y: i32, len: u32) {
        if len == 0 {
            return;
        }
        let right = x + len as i32;
        if !self.touched {
            self.min_x = x;
            self.max_x = right;
            self.min_y = y;
            self.max_y = y + 1;
            self.touched = true;
            return;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(right);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y + 1);
    }

    /// The accumulated bounding box, or [`Rect::EMPTY`] if nothing was added.
    pub fn bounds(&self) -> Rect {
        if !self.touched {
            return Rect::EMPTY;
        }
        Rect::new(
            self.min_x,
            self.min_y,
            (self.max_x - self.min_x) as u32,
            (self.max_y - self.min_y) as u32,
        )
    }
}

impl Default for RectAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
