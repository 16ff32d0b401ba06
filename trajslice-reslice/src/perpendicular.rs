//! Deterministic completion of an orthonormal basis from one vector

use trajslice_core::Vector3d;

/// Compute two vectors perpendicular to `v` and to each other.
///
/// The result is a canonical, reproducible pair: axes are permuted so the
/// dominant component of `v` comes first, a closed-form perpendicular is built
/// for that ordering, and the pair is then rotated by `theta` radians about
/// `v`. With `(a, b) = perpendiculars(v, 0)`,
/// `perpendiculars(v, θ).0 == cos θ · a + sin θ · b`.
///
/// `v` need not be normalized but must have non-zero length; the outputs are
/// always unit length.
pub fn perpendiculars(v: &Vector3d, theta: f64) -> (Vector3d, Vector3d) {
    let (x2, y2, z2) = (v.x * v.x, v.y * v.y, v.z * v.z);
    let r = (x2 + y2 + z2).sqrt();

    // Permute so the dominant axis is never the one divided by
    let (dx, dy, dz) = if x2 > y2 && x2 > z2 {
        (0, 1, 2)
    } else if y2 > z2 {
        (1, 2, 0)
    } else {
        (2, 0, 1)
    };

    let a = v[dx] / r;
    let b = v[dy] / r;
    let c = v[dz] / r;
    let tmp = (a * a + c * c).sqrt();

    let (sin_t, cos_t) = theta.sin_cos();

    let mut v2 = Vector3d::zeros();
    v2[dx] = (c * cos_t - a * b * sin_t) / tmp;
    v2[dy] = sin_t * tmp;
    v2[dz] = (-a * cos_t - b * c * sin_t) / tmp;

    let mut v3 = Vector3d::zeros();
    v3[dx] = (-c * sin_t - a * b * cos_t) / tmp;
    v3[dy] = cos_t * tmp;
    v3[dz] = (a * sin_t - b * c * cos_t) / tmp;

    (v2, v3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_orthonormal(v: &Vector3d, v2: &Vector3d, v3: &Vector3d) {
        let u = v.normalize();
        assert_relative_eq!(v2.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v3.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.dot(v2), 0.0, epsilon = 1e-12);
        assert_relative_eq!(u.dot(v3), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v2.dot(v3), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_axis_reference() {
        let (v2, v3) = perpendiculars(&Vector3d::x(), 0.0);
        assert_relative_eq!(v2, Vector3d::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(v3, Vector3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_z_axis_reference() {
        let (v2, v3) = perpendiculars(&Vector3d::z(), 0.0);
        assert_relative_eq!(v2, Vector3d::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(v3, Vector3d::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_orthonormal(&Vector3d::z(), &v2, &v3);
    }

    #[test]
    fn test_rotation_about_axis() {
        let v = Vector3d::new(0.3, -2.0, 0.7);
        let (a, b) = perpendiculars(&v, 0.0);

        for theta in [0.25, 1.0, FRAC_PI_2, 2.5, -1.2] {
            let (v2, v3) = perpendiculars(&v, theta);
            assert_orthonormal(&v, &v2, &v3);
            assert_relative_eq!(v2, a * theta.cos() + b * theta.sin(), epsilon = 1e-12);
            assert_relative_eq!(v3, b * theta.cos() - a * theta.sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unnormalized_input() {
        let (small, _) = perpendiculars(&Vector3d::new(0.0, 0.0, 1e-3), 0.4);
        let (large, _) = perpendiculars(&Vector3d::new(0.0, 0.0, 1e3), 0.4);
        assert_relative_eq!(small, large, epsilon = 1e-12);
    }
}
