//! Planar geometry helpers shared by hit-testing, erasing and rendering.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Half-angle of an arrowhead, in radians.
pub const ARROWHEAD_SPREAD: f32 = 0.38;

/// A point in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared distance, for radius checks that don't need the root.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Distance from `p` to the segment `a`-`b`.
///
/// Projects `p` onto the segment and clamps the parametric position to
/// `[0, 1]`. A zero-length segment degrades to the distance to `a`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let d = b - a;
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * d.x, a.y + t * d.y))
}

/// Direction of travel from `from` to `to`, in radians.
#[must_use]
pub fn heading(from: Point, to: Point) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Triangle vertices for an arrowhead whose tip sits at `tip`, pointing
/// along the direction `tail` -> `tip`.
#[must_use]
pub fn arrowhead(tail: Point, tip: Point, size: f32) -> [Point; 3] {
    let angle = heading(tail, tip);
    [
        tip,
        Point::new(
            tip.x - size * (angle - ARROWHEAD_SPREAD).cos(),
            tip.y - size * (angle - ARROWHEAD_SPREAD).sin(),
        ),
        Point::new(
            tip.x - size * (angle + ARROWHEAD_SPREAD).cos(),
            tip.y - size * (angle + ARROWHEAD_SPREAD).sin(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
        assert!((a.distance_squared(b) - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_segment_distance_projects_inside() {
        let d = distance_to_segment(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_to_segment(Point::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        assert!((distance_to_segment(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_segment_distance_degenerate() {
        let a = Point::new(2.0, 2.0);
        let d = distance_to_segment(Point::new(5.0, 6.0), a, a);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_on_segment_is_zero() {
        let d = distance_to_segment(
            Point::new(10.0, 17.5),
            Point::new(10.0, 10.0),
            Point::new(10.0, 25.0),
        );
        assert!(d.abs() < 1e-5);
    }

    #[test]
    fn test_arrowhead_is_symmetric_behind_tip() {
        let [tip, left, right] = arrowhead(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 9.0);
        assert_eq!(tip, Point::new(10.0, 0.0));
        assert!(left.x < 10.0 && right.x < 10.0);
        assert!((left.y + right.y).abs() < 1e-5);
        assert!((tip.distance_to(left) - 9.0).abs() < 1e-4);
    }
}
