//! Slice plane basis

use crate::point::{Point3d, Vector3d};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Orientation of a viewer's cutting plane in world space.
///
/// `normal` is the plane normal, `transverse` the in-plane horizontal axis and
/// `origin` the point the viewer centres on. A solved basis has unit-length,
/// mutually orthogonal `normal` and `transverse`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBasis {
    pub normal: Vector3d,
    pub transverse: Vector3d,
    pub origin: Point3d,
}

impl PlaneBasis {
    /// Create a basis from its parts
    pub fn new(normal: Vector3d, transverse: Vector3d, origin: Point3d) -> Self {
        Self {
            normal,
            transverse,
            origin,
        }
    }

    /// Basis of an axial slice through `origin`
    pub fn axial(origin: Point3d) -> Self {
        Self::new(Vector3d::z(), Vector3d::x(), origin)
    }

    /// In-plane vertical axis, `normal × transverse`
    pub fn binormal(&self) -> Vector3d {
        self.normal.cross(&self.transverse)
    }

    /// Slice-to-world matrix: columns are transverse, binormal, normal and origin
    pub fn slice_to_world(&self) -> Matrix4<f64> {
        let b = self.binormal();
        let (t, n, o) = (&self.transverse, &self.normal, &self.origin);
        Matrix4::new(
            t.x, b.x, n.x, o.x,
            t.y, b.y, n.y, o.y,
            t.z, b.z, n.z, o.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Map a point given in slice coordinates to world coordinates
    pub fn to_world(&self, slice_point: &Point3d) -> Point3d {
        let homogeneous = self.slice_to_world() * slice_point.to_homogeneous();
        Point3d::from_homogeneous(homogeneous).unwrap_or(*slice_point)
    }

    /// Check that normal and transverse are unit length and orthogonal
    pub fn is_orthonormal(&self, epsilon: f64) -> bool {
        (self.normal.norm() - 1.0).abs() <= epsilon
            && (self.transverse.norm() - 1.0).abs() <= epsilon
            && self.normal.dot(&self.transverse).abs() <= epsilon
    }
}

impl Default for PlaneBasis {
    fn default() -> Self {
        Self::axial(Point3d::origin())
    }
}

impl From<PlaneBasis> for Matrix4<f64> {
    fn from(basis: PlaneBasis) -> Self {
        basis.slice_to_world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axial_matrix_is_translation() {
        let basis = PlaneBasis::axial(Point3d::new(1.0, 2.0, 3.0));
        let expected = Matrix4::new_translation(&Vector3d::new(1.0, 2.0, 3.0));

        assert_relative_eq!(basis.slice_to_world(), expected);
        assert!(basis.is_orthonormal(1e-12));
    }

    #[test]
    fn test_to_world_uses_basis_axes() {
        let basis = PlaneBasis::new(
            Vector3d::x(),
            Vector3d::y(),
            Point3d::new(10.0, 0.0, 0.0),
        );

        // binormal = x × y = z
        assert_relative_eq!(basis.binormal(), Vector3d::z());
        let world = basis.to_world(&Point3d::new(1.0, 2.0, 3.0));
        assert_relative_eq!(world, Point3d::new(13.0, 1.0, 2.0));
    }

    #[test]
    fn test_non_orthogonal_basis_detected() {
        let basis = PlaneBasis::new(
            Vector3d::new(1.0, 1.0, 0.0).normalize(),
            Vector3d::x(),
            Point3d::origin(),
        );
        assert!(!basis.is_orthonormal(1e-9));
    }
}
