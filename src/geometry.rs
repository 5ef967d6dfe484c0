// src/geometry.rs - Content-space geometry helpers for the measurement tools

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance below which a ray is too short to carry a meaningful direction
pub const MIN_SNAP_DISTANCE: f64 = 1.0;

/// Default angle-snap step in degrees
pub const DEFAULT_SNAP_STEP_DEGREES: f64 = 15.0;

/// Position in image/content coordinate space (not screen pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin of the content space
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Offset by the given deltas
    pub fn offset(self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }

    /// Point at `radius` from `self` along `degrees` (content space, y grows downward)
    pub fn polar_offset(self, radius: f64, degrees: f64) -> Point2D {
        let rad = degrees.to_radians();
        Point2D::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Errors from parsing `"x,y"` point literals
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PointParseError {
    #[error("expected \"x,y\", got \"{0}\"")]
    Malformed(String),

    #[error("invalid coordinate \"{0}\"")]
    InvalidCoordinate(String),

    #[error("coordinate must be finite: {0}")]
    NonFinite(String),
}

impl FromStr for Point2D {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| PointParseError::Malformed(s.to_string()))?;

        let parse = |part: &str| -> Result<f64, PointParseError> {
            let part = part.trim();
            let value: f64 = part
                .parse()
                .map_err(|_| PointParseError::InvalidCoordinate(part.to_string()))?;
            if !value.is_finite() {
                return Err(PointParseError::NonFinite(part.to_string()));
            }
            Ok(value)
        };

        Ok(Point2D::new(parse(x)?, parse(y)?))
    }
}

/// Euclidean distance between two points
pub fn distance(p1: Point2D, p2: Point2D) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Direction of the ray `origin -> p` in degrees, normalized to `[0, 360)`.
///
/// The degenerate case `p == origin` yields 0; callers that care must guard it.
pub fn angle_of_ray(origin: Point2D, p: Point2D) -> f64 {
    let angle = (p.y - origin.y).atan2(p.x - origin.x).to_degrees();
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    // -0.0 and tiny negatives can round up to exactly 360
    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Non-reflex difference between two ray angles, in `[0, 180]`
pub fn angular_difference(a1: f64, a2: f64) -> f64 {
    let diff = (a1 - a2).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Constrain `p` to the horizontal or vertical line through `origin`.
///
/// Horizontal lock wins only when `|dx| > |dy|`; an exact tie locks vertically.
pub fn axis_lock(origin: Point2D, p: Point2D) -> Point2D {
    let dx = (p.x - origin.x).abs();
    let dy = (p.y - origin.y).abs();

    if dx > dy {
        Point2D::new(p.x, origin.y)
    } else {
        Point2D::new(origin.x, p.y)
    }
}

/// Snap the ray `origin -> p` to the nearest multiple of `step_degrees`,
/// keeping its length. Rays shorter than [`MIN_SNAP_DISTANCE`] are returned as-is.
pub fn angle_snap(origin: Point2D, p: Point2D, step_degrees: f64) -> Point2D {
    let length = distance(origin, p);
    if length < MIN_SNAP_DISTANCE || !(step_degrees > 0.0) {
        return p;
    }

    let snapped = (angle_of_ray(origin, p) / step_degrees).round() * step_degrees;
    origin.polar_offset(length, snapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample_points() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 4.0),
            Point2D::new(-7.5, 2.25),
            Point2D::new(100.0, -40.0),
            Point2D::new(-0.5, -0.5),
            Point2D::new(12.0, 12.0),
        ]
    }

    #[test]
    fn test_distance_properties() {
        let points = sample_points();
        for &a in &points {
            assert_eq!(distance(a, a), 0.0);
            for &b in &points {
                assert!((distance(a, b) - distance(b, a)).abs() < EPS);
                for &c in &points {
                    assert!(distance(a, c) <= distance(a, b) + distance(b, c) + EPS);
                }
            }
        }
        assert!((distance(Point2D::origin(), Point2D::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_angle_of_ray_quadrants() {
        let o = Point2D::origin();
        assert!((angle_of_ray(o, Point2D::new(10.0, 0.0)) - 0.0).abs() < EPS);
        assert!((angle_of_ray(o, Point2D::new(0.0, 10.0)) - 90.0).abs() < EPS);
        assert!((angle_of_ray(o, Point2D::new(-10.0, 0.0)) - 180.0).abs() < EPS);
        assert!((angle_of_ray(o, Point2D::new(0.0, -10.0)) - 270.0).abs() < EPS);
        assert!((angle_of_ray(o, Point2D::new(1.0, -1.0)) - 315.0).abs() < EPS);

        let tiny = angle_of_ray(o, Point2D::new(1.0, -1e-18));
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_angular_difference_bounds() {
        assert_eq!(angular_difference(0.0, 350.0), 10.0);
        assert_eq!(angular_difference(350.0, 0.0), 10.0);
        assert_eq!(angular_difference(90.0, 90.0), 0.0);
        assert_eq!(angular_difference(0.0, 180.0), 180.0);

        let mut a = 0.0;
        while a < 360.0 {
            let mut b = 0.0;
            while b < 360.0 {
                let d = angular_difference(a, b);
                assert!((0.0..=180.0).contains(&d), "{} vs {} gave {}", a, b, d);
                b += 7.5;
            }
            a += 11.25;
        }
    }

    #[test]
    fn test_axis_lock() {
        let o = Point2D::new(10.0, 10.0);
        assert_eq!(axis_lock(o, Point2D::new(20.0, 13.0)), Point2D::new(20.0, 10.0));
        assert_eq!(axis_lock(o, Point2D::new(12.0, -5.0)), Point2D::new(10.0, -5.0));
    }

    #[test]
    fn test_axis_lock_tie_locks_vertically() {
        let o = Point2D::origin();
        assert_eq!(axis_lock(o, Point2D::new(5.0, 5.0)), Point2D::new(0.0, 5.0));
        assert_eq!(axis_lock(o, Point2D::new(-5.0, 5.0)), Point2D::new(0.0, 5.0));
    }

    #[test]
    fn test_axis_lock_idempotent() {
        let o = Point2D::new(1.0, 2.0);
        for &p in &sample_points() {
            let once = axis_lock(o, p);
            assert_eq!(axis_lock(o, once), once);
        }
    }

    #[test]
    fn test_angle_snap_quantizes_and_keeps_length() {
        let o = Point2D::new(5.0, -3.0);
        let mut deg = 0.0;
        while deg < 360.0 {
            // Lengths stay clear of the minimum snap distance after rounding
            for &len in &[1.01, 2.5, 37.0, 400.0] {
                let p = o.polar_offset(len, deg);
                let snapped = angle_snap(o, p, 15.0);

                assert!((distance(o, snapped) - distance(o, p)).abs() < 1e-9);

                let angle = angle_of_ray(o, snapped);
                let steps = angle / 15.0;
                let off = (steps - steps.round()).abs();
                assert!(off < 1e-6, "{} snapped to {}", deg, angle);
            }
            deg += 3.7;
        }
    }

    #[test]
    fn test_angle_snap_rounds_to_nearest_step() {
        let o = Point2D::origin();
        let snapped = angle_snap(o, o.polar_offset(10.0, 8.0), 15.0);
        assert!((angle_of_ray(o, snapped) - 15.0).abs() < 1e-9);

        let snapped = angle_snap(o, o.polar_offset(10.0, 7.0), 15.0);
        assert!(angle_of_ray(o, snapped).abs() < 1e-9 || (angle_of_ray(o, snapped) - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_snap_short_ray_unchanged() {
        let o = Point2D::new(2.0, 2.0);
        let p = Point2D::new(2.3, 2.4);
        assert_eq!(angle_snap(o, p, 15.0), p);
        assert_eq!(angle_snap(o, o, 15.0), o);
    }

    #[test]
    fn test_point_parsing() {
        assert_eq!("3,4".parse::<Point2D>().unwrap(), Point2D::new(3.0, 4.0));
        assert_eq!(" -1.5 , 2 ".parse::<Point2D>().unwrap(), Point2D::new(-1.5, 2.0));
        assert!(matches!("3".parse::<Point2D>(), Err(PointParseError::Malformed(_))));
        assert!(matches!("a,4".parse::<Point2D>(), Err(PointParseError::InvalidCoordinate(_))));
        assert!(matches!("inf,4".parse::<Point2D>(), Err(PointParseError::NonFinite(_))));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point2D::new(1.5, -3.0).to_string(), "(1.5, -3.0)");
    }
}
