//! Geometric primitives for workflow layout and positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Laneflow uses a coordinate system consistent with SVG and browser canvases:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Swimlanes stack downward, so a larger lane index means a larger y offset.

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use laneflow_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns true when both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns the offset from a centroid to the top-left corner of a box of this size
    pub fn half_extent(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds whose top-left corner is `top_left`
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the smallest bounds containing both `self` and `other`
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(220.0, 80.0));

        assert!(approx_eq!(f32, bounds.max_x(), 270.0));
        assert!(approx_eq!(f32, bounds.max_y(), 130.0));
        assert!(approx_eq!(f32, bounds.width(), 220.0));
        assert!(approx_eq!(f32, bounds.height(), 80.0));
    }

    #[test]
    fn test_half_extent() {
        let half = Size::new(260.0, 160.0).half_extent();
        assert!(approx_eq!(f32, half.x(), 130.0));
        assert!(approx_eq!(f32, half.y(), 80.0));
    }

    #[test]
    fn test_point_offsets() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.add_point(Point::new(5.0, 5.0)), Point::new(15.0, 25.0));
        assert_eq!(p.sub_point(Point::new(5.0, 5.0)), Point::new(5.0, 15.0));
        assert_eq!(p.with_y(0.0), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(10.0, -4.0));
        assert_eq!(mid, Point::new(5.0, -2.0));
    }

    proptest! {
        #[test]
        fn merged_bounds_contain_both_inputs(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            w in 0.0f32..500.0, h in 0.0f32..500.0,
        ) {
            let a = Bounds::new_from_top_left(Point::new(ax, ay), Size::new(w, h));
            let b = Bounds::new_from_top_left(Point::new(bx, by), Size::new(h, w));
            let merged = a.merge(&b);

            prop_assert!(merged.min_x() <= a.min_x() && merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= a.min_y() && merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= a.max_x() && merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= a.max_y() && merged.max_y() >= b.max_y());
        }
    }
}
