//! In-memory slice viewer

use crate::{plane::PlaneBasis, traits::Viewer};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A slice viewer that keeps its attribute table and cutting plane in memory.
///
/// Hosts that expose their own viewport objects implement [`Viewer`] directly;
/// this type backs tests and headless use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceViewer {
    name: String,
    layout_label: String,
    attributes: BTreeMap<String, String>,
    orientation: PlaneBasis,
    /// Number of times the orientation has been set
    pub orientation_updates: usize,
}

impl SliceViewer {
    /// Create a viewer whose layout label equals its name
    pub fn new<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            layout_label: name.clone(),
            name,
            attributes: BTreeMap::new(),
            orientation: PlaneBasis::default(),
            orientation_updates: 0,
        }
    }

    /// Set the control-bar label (e.g. "R" for the red viewer)
    pub fn with_layout_label<S: Into<String>>(mut self, label: S) -> Self {
        self.layout_label = label.into();
        self
    }

    /// Current cutting plane
    pub fn orientation(&self) -> &PlaneBasis {
        &self.orientation
    }

    /// Current slice-to-world matrix
    pub fn slice_to_world(&self) -> Matrix4<f64> {
        self.orientation.slice_to_world()
    }

    /// All attributes, sorted by key
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl Viewer for SliceViewer {
    fn name(&self) -> &str {
        &self.name
    }

    fn layout_label(&self) -> &str {
        &self.layout_label
    }

    fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.get(key).cloned()
    }

    fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    fn set_orientation(&mut self, basis: &PlaneBasis) {
        self.orientation = *basis;
        self.orientation_updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Point3d, Vector3d};

    #[test]
    fn test_attributes_overwrite() {
        let mut viewer = SliceViewer::new("Red").with_layout_label("R");
        assert_eq!(viewer.name(), "Red");
        assert_eq!(viewer.layout_label(), "R");
        assert_eq!(viewer.attribute("a"), None);

        viewer.set_attribute("a", "1");
        viewer.set_attribute("a", "2");
        assert_eq!(viewer.attribute("a").as_deref(), Some("2"));
        assert_eq!(viewer.attributes().len(), 1);
    }

    #[test]
    fn test_orientation_counts_updates() {
        let mut viewer = SliceViewer::new("Green");
        let basis = PlaneBasis::new(Vector3d::y(), Vector3d::x(), Point3d::new(0.0, 5.0, 0.0));

        viewer.set_orientation(&basis);
        assert_eq!(viewer.orientation(), &basis);
        assert_eq!(viewer.orientation_updates, 1);
    }

    #[test]
    fn test_viewer_through_mutable_reference() {
        fn write<V: Viewer>(mut v: V) {
            v.set_attribute("k", "v");
        }

        let mut viewer = SliceViewer::new("Yellow");
        write(&mut viewer);
        assert_eq!(viewer.attribute("k").as_deref(), Some("v"));
    }
}
