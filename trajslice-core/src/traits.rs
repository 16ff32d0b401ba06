//! Capability traits for the host application's collaborators

use crate::{plane::PlaneBasis, point::Point3d};

/// A 2D slice viewport whose cutting plane can be driven.
///
/// The attribute table is a string key-value store owned by the host; it is
/// the only place reslicing state is persisted.
pub trait Viewer {
    /// Unique viewer name, used in persisted attribute keys
    fn name(&self) -> &str;

    /// Short label shown in the viewer's control bar
    fn layout_label(&self) -> &str {
        self.name()
    }

    /// Read an attribute value
    fn attribute(&self, key: &str) -> Option<String>;

    /// Write an attribute value, replacing any previous one
    fn set_attribute(&mut self, key: &str, value: &str);

    /// Orient the cutting plane by normal, transverse and position
    fn set_orientation(&mut self, basis: &PlaneBasis);
}

/// A trajectory segment from an entry point (`point1`) to a target point (`point2`)
pub trait TrajectoryLine {
    /// Stable identifier
    fn id(&self) -> &str;

    /// Display name, used in persisted attribute keys
    fn name(&self) -> &str;

    /// Entry point in world coordinates
    fn point1(&self) -> Point3d;

    /// Target point in world coordinates
    fn point2(&self) -> Point3d;

    /// Distance between the endpoints
    fn length(&self) -> f64 {
        (self.point2() - self.point1()).norm()
    }
}

impl<V: Viewer + ?Sized> Viewer for &mut V {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn layout_label(&self) -> &str {
        (**self).layout_label()
    }

    fn attribute(&self, key: &str) -> Option<String> {
        (**self).attribute(key)
    }

    fn set_attribute(&mut self, key: &str, value: &str) {
        (**self).set_attribute(key, value)
    }

    fn set_orientation(&mut self, basis: &PlaneBasis) {
        (**self).set_orientation(basis)
    }
}

impl<V: Viewer + ?Sized> Viewer for Box<V> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn layout_label(&self) -> &str {
        (**self).layout_label()
    }

    fn attribute(&self, key: &str) -> Option<String> {
        (**self).attribute(key)
    }

    fn set_attribute(&mut self, key: &str, value: &str) {
        (**self).set_attribute(key, value)
    }

    fn set_orientation(&mut self, basis: &PlaneBasis) {
        (**self).set_orientation(basis)
    }
}
