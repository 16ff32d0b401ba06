//! Reslice plane solver
//!
//! Computes a viewer's cutting plane from the two endpoints of a trajectory.
//! In perpendicular mode the plane is normal to the trajectory and slides
//! along it; in transverse mode it contains the trajectory and rotates about
//! it, centred on the target.

use crate::params::{ResliceMode, ResliceParameters};
use crate::perpendicular::perpendiculars;
use trajslice_core::{
    is_finite_point, lerp_points, Error, PlaneBasis, Point3d, Result, TrajectoryLine, Viewer,
    DEGENERATE_EPSILON,
};

/// Compute the cutting plane for a trajectory from `point1` (entry) to `point2` (target).
///
/// `scalar` is the position in percent along the trajectory in
/// [`ResliceMode::Perpendicular`] mode and the rotation angle in degrees in
/// [`ResliceMode::Transverse`] mode. Endpoints closer than
/// [`DEGENERATE_EPSILON`], non-finite endpoints, or a separation too large to
/// measure give [`Error::DegenerateTrajectory`].
pub fn compute_plane_basis(
    point1: &Point3d,
    point2: &Point3d,
    mode: ResliceMode,
    scalar: f64,
) -> Result<PlaneBasis> {
    let direction = point2 - point1;
    let length = direction.norm();
    if !is_finite_point(point1)
        || !is_finite_point(point2)
        || !scalar.is_finite()
        || !length.is_finite()
        || length <= DEGENERATE_EPSILON
    {
        return Err(Error::DegenerateTrajectory { length });
    }
    let unit = direction / length;

    let basis = match mode {
        ResliceMode::Perpendicular => {
            let origin = lerp_points(point1, point2, scalar / 100.0);
            let (transverse, _) = perpendiculars(&unit, 0.0);
            PlaneBasis::new(unit, transverse, origin)
        }
        ResliceMode::Transverse => {
            let (normal, _) = perpendiculars(&unit, scalar.to_radians());
            PlaneBasis::new(normal, unit, *point2)
        }
    };

    Ok(basis)
}

/// Solve the plane for `line` with `params` and apply it to `viewer`.
///
/// The viewer is left untouched when the trajectory is degenerate.
pub fn reslice_viewer<V, L>(
    viewer: &mut V,
    line: &L,
    params: &ResliceParameters,
) -> Result<PlaneBasis>
where
    V: Viewer + ?Sized,
    L: TrajectoryLine + ?Sized,
{
    let basis =
        compute_plane_basis(&line.point1(), &line.point2(), params.mode(), params.scalar())?;
    viewer.set_orientation(&basis);
    log::debug!(
        "Resliced viewer '{}' along '{}' ({:?}, {:.2})",
        viewer.name(),
        line.name(),
        params.mode(),
        params.scalar()
    );
    Ok(basis)
}
