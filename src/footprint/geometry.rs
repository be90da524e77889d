//! Planar geometry helpers shared by the layout and outline engines.
//!
//! All coordinates are millimetres in package-local space: the origin is the
//! body centre, +x points east and +y points south (board coordinates, as the
//! host draws them). "Top" of a package therefore means negative y.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an axis-aligned extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Extent along X (mm).
    pub x: f64,
    /// Extent along Y (mm).
    pub y: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the size with its axes exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum X (mm).
    pub min_x: f64,
    /// Minimum Y (mm).
    pub min_y: f64,
    /// Maximum X (mm).
    pub max_x: f64,
    /// Maximum Y (mm).
    pub max_y: f64,
}

impl Rect {
    /// Creates a rectangle centred at the origin from its half extents.
    #[must_use]
    pub fn from_half_extents(half_x: f64, half_y: f64) -> Self {
        Self {
            min_x: -half_x,
            min_y: -half_y,
            max_x: half_x,
            max_y: half_y,
        }
    }

    /// Creates a rectangle of the given size centred on `centre`.
    #[must_use]
    pub fn centred_on(centre: Point, size: Size) -> Self {
        Self {
            min_x: centre.x - size.x / 2.0,
            min_y: centre.y - size.y / 2.0,
            max_x: centre.x + size.x / 2.0,
            max_y: centre.y + size.y / 2.0,
        }
    }

    /// Grows the rectangle by `amount` on every side.
    #[must_use]
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns `true` if `other` lies entirely inside `self` (edges may touch).
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Returns the top-left corner (minimum x, minimum y).
    #[must_use]
    pub const fn start(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the bottom-right corner (maximum x, maximum y).
    #[must_use]
    pub const fn end(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Width along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height along Y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A closed interval `[lo, hi]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
}

impl Span {
    /// Creates a span, ordering the bounds.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Returns the hull of two spans.
    #[must_use]
    pub fn hull(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Length of the span.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Subtracts `gap` from `edge`, leaving at most two pieces.
///
/// Pieces of zero or negative length are dropped.
#[must_use]
pub fn subtract_span(edge: Span, gap: Option<Span>) -> Vec<Span> {
    let Some(gap) = gap else {
        return keep_positive(vec![edge]);
    };

    if gap.hi <= edge.lo || gap.lo >= edge.hi {
        return keep_positive(vec![edge]);
    }

    keep_positive(vec![
        Span::new(edge.lo, gap.lo.max(edge.lo)),
        Span::new(gap.hi.min(edge.hi), edge.hi),
    ])
}

fn keep_positive(spans: Vec<Span>) -> Vec<Span> {
    spans.into_iter().filter(|s| s.length() > LENGTH_EPSILON).collect()
}

/// Lengths at or below this are treated as zero (1 nm).
pub const LENGTH_EPSILON: f64 = 1e-6;

/// Evenly spaced positions across a span centred on zero.
///
/// Yields `count` values from `-(count-1)*pitch/2` to `+(count-1)*pitch/2`
/// in ascending order.
#[must_use]
pub fn centred_positions(count: u32, pitch: f64) -> Vec<f64> {
    let half_span = f64::from(count.saturating_sub(1)) * pitch / 2.0;
    (0..count)
        .map(|i| f64::from(i).mul_add(pitch, -half_span))
        .collect()
}
