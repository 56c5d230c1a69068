//! Point and vector math shared by vertices, edges and the drawing surfaces.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Mul, Sub};

/// A position (or displacement) in canvas space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean length when treated as a vector.
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length when treated as a vector.
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Squared distance to another point.
    pub fn distance_sq(self, other: Point) -> f32 {
        (other - self).length_sq()
    }

    /// Dot product.
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Angle of the vector from `self` to `other`, in radians (canvas orientation).
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Rotates this point around `pivot` by `angle` radians.
    pub fn rotate_around(self, pivot: Point, angle: f32) -> Point {
        let (sin, cos) = angle.sin_cos();
        let d = self - pivot;
        Point::new(pivot.x + d.x * cos - d.y * sin, pivot.y + d.x * sin + d.y * cos)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Returns the point on the circle boundary in the direction of `towards`.
///
/// When `towards` coincides with `center` there is no direction, and the
/// center itself is returned.
pub fn nearest_point_on_circle(center: Point, radius: f32, towards: Point) -> Point {
    let delta = towards - center;
    let len = delta.length();
    if len <= f32::EPSILON {
        return center;
    }
    let unit = Point::new(delta.x / len, delta.y / len);
    center + unit * radius
}

/// Projection of a point onto a segment, see [`point_to_segment_offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOffset {
    /// Position of the projection along `a -> b`; values outside `[0, 1]` lie past an endpoint.
    pub percent: f32,
    /// Signed perpendicular distance from the line through `a` and `b`.
    pub distance: f32,
}

impl SegmentOffset {
    /// Whether the point lies strictly between the endpoints and within `margin` of the line.
    pub fn is_on_segment(&self, margin: f32) -> bool {
        self.percent > 0.0 && self.percent < 1.0 && self.distance.abs() < margin
    }
}

/// Projects `p` onto the segment `a -> b`.
///
/// A zero-length segment yields `percent == 0` and the plain distance to `a`.
pub fn point_to_segment_offset(a: Point, b: Point, p: Point) -> SegmentOffset {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.length_sq();
    if len_sq < 1e-8 {
        return SegmentOffset {
            percent: 0.0,
            distance: ap.length(),
        };
    }
    let len = len_sq.sqrt();
    SegmentOffset {
        percent: ap.dot(ab) / len_sq,
        distance: (ab.x * ap.y - ab.y * ap.x) / len,
    }
}

/// Folds an angle into `(-PI/2, PI/2]` so text drawn along it reads left to right.
pub fn upright_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    if a > FRAC_PI_2 {
        a - PI
    } else if a <= -FRAC_PI_2 {
        a + PI
    } else {
        a
    }
}

/// Polyline approximation of a clockwise (y-down) arc from `start` to `end`.
///
/// Mirrors the 2D canvas convention: a sweep of at least a full turn draws the
/// whole circle, otherwise the sweep wraps into `[0, 2PI)`.
pub fn arc_points(center: Point, radius: f32, start: f32, end: f32) -> Vec<Point> {
    let raw = end - start;
    let sweep = if raw >= TAU {
        TAU
    } else {
        raw.rem_euclid(TAU)
    };
    let segments = ((sweep * radius.abs() / 4.0).ceil() as usize).clamp(8, 128);
    (0..=segments)
        .map(|i| {
            let t = start + sweep * (i as f32 / segments as f32);
            Point::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn nearest_point_lies_on_boundary_towards_target() {
        let p = nearest_point_on_circle(Point::new(0.0, 0.0), 10.0, Point::new(30.0, 40.0));
        assert!(approx(p.x, 6.0));
        assert!(approx(p.y, 8.0));
    }

    #[test]
    fn nearest_point_degenerate_direction_returns_center() {
        let c = Point::new(5.0, 5.0);
        assert_eq!(nearest_point_on_circle(c, 10.0, c), c);
    }

    #[test]
    fn segment_offset_midpoint_is_on_segment() {
        let off = point_to_segment_offset(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 0.0),
        );
        assert!(approx(off.percent, 0.5));
        assert!(approx(off.distance, 0.0));
        assert!(off.is_on_segment(6.0));
    }

    #[test]
    fn segment_offset_distance_is_signed() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let below = point_to_segment_offset(a, b, Point::new(50.0, 4.0));
        let above = point_to_segment_offset(a, b, Point::new(50.0, -4.0));
        assert!(approx(below.distance, 4.0));
        assert!(approx(above.distance, -4.0));
        assert!(below.is_on_segment(6.0) && above.is_on_segment(6.0));
    }

    #[test]
    fn segment_offset_beyond_endpoints_is_off_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let off = point_to_segment_offset(a, b, Point::new(120.0, 0.0));
        assert!(off.percent > 1.0);
        assert!(!off.is_on_segment(6.0));
        let far = point_to_segment_offset(a, b, Point::new(50.0, 20.0));
        assert!(!far.is_on_segment(6.0));
    }

    #[test]
    fn zero_length_segment_does_not_divide_by_zero() {
        let p = Point::new(1.0, 1.0);
        let off = point_to_segment_offset(p, p, Point::new(4.0, 5.0));
        assert_eq!(off.percent, 0.0);
        assert!(approx(off.distance, 5.0));
        assert!(!off.is_on_segment(6.0));
    }

    #[test]
    fn upright_angle_flips_leftward_angles() {
        assert!(approx(upright_angle(0.3), 0.3));
        assert!(approx(upright_angle(PI), 0.0));
        assert!(approx(upright_angle(-PI * 0.75), PI * 0.25));
        assert!(approx(upright_angle(PI * 0.75), -PI * 0.25));
    }

    #[test]
    fn full_arc_closes_on_itself() {
        let pts = arc_points(Point::new(0.0, 0.0), 10.0, 0.0, TAU);
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!(approx(first.x, last.x) && approx(first.y, last.y));
        assert!(pts.iter().all(|p| approx(p.length(), 10.0)));
    }

    #[test]
    fn rotate_around_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotate_around(Point::ZERO, FRAC_PI_2);
        assert!(approx(p.x, 0.0) && approx(p.y, 1.0));
    }
}
