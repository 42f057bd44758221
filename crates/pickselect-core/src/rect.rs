//! Integer screen-space rectangles.
//!
//! Rectangles live in pick space: pixels with the origin in the bottom-left
//! corner of the viewport, matching framebuffer readback.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An integer rectangle given by its origin and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a 1x1 rectangle covering a single pixel.
    #[must_use]
    pub const fn pixel(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Creates the rectangle spanned by two corners in any order.
    #[must_use]
    pub fn from_corners(a: IVec2, b: IVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(
            min.x,
            min.y,
            max.x.saturating_sub(min.x),
            max.y.saturating_sub(min.y),
        )
    }

    /// Creates the smallest integer rectangle enclosing a floating point span.
    ///
    /// Out of range values saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn enclosing(min: Vec2, max: Vec2) -> Self {
        let lo = min.min(max).floor();
        let hi = min.max(max).ceil();
        Self::from_corners(
            IVec2::new(lo.x as i32, lo.y as i32),
            IVec2::new(hi.x as i32, hi.y as i32),
        )
    }

    /// Right edge, widened so it cannot overflow.
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Top edge, widened so it cannot overflow.
    #[must_use]
    pub fn top(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Returns the integer center.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            ((i64::from(self.x) + self.right()) / 2) as i32,
            ((i64::from(self.y) + self.top()) / 2) as i32,
        )
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns the area, zero for empty rectangles.
    #[must_use]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width) * i64::from(self.height)
        }
    }

    /// Returns true if the rectangles share interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        i64::from(self.x) < other.right()
            && self.right() > i64::from(other.x)
            && i64::from(self.y) < other.top()
            && self.top() > i64::from(other.y)
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.top() <= self.top()
    }

    /// Returns true if the pixel at `point` lies inside this rectangle.
    #[must_use]
    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.x
            && i64::from(point.x) < self.right()
            && point.y >= self.y
            && i64::from(point.y) < self.top()
    }

    /// Returns the intersection of two rectangles.
    ///
    /// The origin is the component-wise max of both origins. The extent is the
    /// component-wise min of the far corners minus that origin, clamped to
    /// zero, so disjoint rectangles give an empty result. The operation is
    /// symmetric and saturates instead of wrapping.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = (self.right().min(other.right()) - i64::from(x)).clamp(0, i64::from(i32::MAX));
        let height = (self.top().min(other.top()) - i64::from(y)).clamp(0, i64::from(i32::MAX));
        Rect::new(x, y, width as i32, height as i32)
    }
}
