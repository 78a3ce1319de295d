//! Shared vector and angle helpers.

use nalgebra::{Point2, Vector2};

/// Decomposes a (magnitude, angle) pair into a Cartesian vector.
///
/// # Examples
///
/// ```
/// use orrery::math::polar;
///
/// let v = polar(2.0, 0.0);
/// assert!((v.x - 2.0).abs() < 1e-12);
/// assert!(v.y.abs() < 1e-12);
/// ```
pub fn polar(magnitude: f64, angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

/// Angle of the direction from `from` toward `to`, in radians.
pub fn angle_to(from: Point2<f64>, to: Point2<f64>) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Euclidean distance between two points.
pub fn distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    (b - a).magnitude()
}

/// True when both coordinates are finite (neither NaN nor infinite).
pub fn point_is_finite(p: Point2<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// True when both components are finite.
pub fn vector_is_finite(v: Vector2<f64>) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
