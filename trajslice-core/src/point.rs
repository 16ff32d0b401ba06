//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point in world coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector in world coordinates
pub type Vector3d = Vector3<f64>;

/// Endpoint distance at or below which a trajectory has no direction
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Check that every coordinate of a point is finite
pub fn is_finite_point(point: &Point3d) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}

/// Linear interpolation between two points, `t` in [0, 1]
pub fn lerp_points(from: &Point3d, to: &Point3d, t: f64) -> Point3d {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        let a = Point3d::new(1.0, 2.0, 3.0);
        let b = Point3d::new(3.0, 6.0, 9.0);

        assert_relative_eq!(lerp_points(&a, &b, 0.0), a);
        assert_relative_eq!(lerp_points(&a, &b, 1.0), b);
        assert_relative_eq!(lerp_points(&a, &b, 0.5), Point3d::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_finite_point() {
        assert!(is_finite_point(&Point3d::new(0.0, -1.0, 1e300)));
        assert!(!is_finite_point(&Point3d::new(f64::NAN, 0.0, 0.0)));
        assert!(!is_finite_point(&Point3d::new(0.0, f64::INFINITY, 0.0)));
    }
}
