//! Entry and target fiducial lists

use serde::{Deserialize, Serialize};
use std::fmt;
use trajslice_core::Point3d;

/// Identifier of a fiducial within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FiducialId(pub u64);

impl fmt::Display for FiducialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fiducial-{}", self.0)
    }
}

/// A named point picked on the imaging data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fiducial {
    pub id: FiducialId,
    pub name: String,
    pub position: Point3d,
    pub visible: bool,
    pub opacity: f64,
    /// Projected onto slice views
    pub projection: bool,
}

/// An ordered list of fiducials with a single selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiducialList {
    label: String,
    fiducials: Vec<Fiducial>,
    selected: Option<FiducialId>,
    next_id: u64,
    selected_opacity: f64,
    unselected_opacity: f64,
}

impl FiducialList {
    pub fn new<S: Into<String>>(label: S, selected_opacity: f64, unselected_opacity: f64) -> Self {
        Self {
            label: label.into(),
            fiducials: Vec::new(),
            selected: None,
            next_id: 1,
            selected_opacity,
            unselected_opacity,
        }
    }

    /// List name, e.g. "Entry List"
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.fiducials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fiducials.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fiducial> {
        self.fiducials.iter()
    }

    pub fn get(&self, id: FiducialId) -> Option<&Fiducial> {
        self.fiducials.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FiducialId) -> Option<&mut Fiducial> {
        self.fiducials.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FiducialId) -> bool {
        self.get(id).is_some()
    }

    /// Append a visible, fully opaque fiducial
    pub fn add<S: Into<String>>(&mut self, name: S, position: Point3d) -> FiducialId {
        let id = FiducialId(self.next_id);
        self.next_id += 1;
        self.fiducials.push(Fiducial {
            id,
            name: name.into(),
            position,
            visible: true,
            opacity: 1.0,
            projection: false,
        });
        id
    }

    pub fn remove(&mut self, id: FiducialId) -> Option<Fiducial> {
        let index = self.fiducials.iter().position(|f| f.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.fiducials.remove(index))
    }

    pub fn clear(&mut self) {
        self.fiducials.clear();
        self.selected = None;
    }

    pub fn selected(&self) -> Option<FiducialId> {
        self.selected
    }

    /// Select `id`, making it opaque and dimming every other fiducial.
    ///
    /// Unknown ids leave the list unchanged.
    pub fn select(&mut self, id: FiducialId) {
        if !self.contains(id) {
            return;
        }
        self.selected = Some(id);
        for fiducial in &mut self.fiducials {
            fiducial.opacity = if fiducial.id == id {
                self.selected_opacity
            } else {
                self.unselected_opacity
            };
        }
    }

    /// Set coordinates from three table cells.
    ///
    /// Nothing changes when a cell is empty; a cell that is not a number reads
    /// as 0. Returns whether the fiducial was moved.
    pub fn set_coordinates_from_text(&mut self, id: FiducialId, cells: [&str; 3]) -> bool {
        if cells.iter().any(|cell| cell.trim().is_empty()) {
            return false;
        }
        let [x, y, z] = cells.map(|cell| cell.trim().parse::<f64>().unwrap_or(0.0));
        match self.get_mut(id) {
            Some(fiducial) => {
                fiducial.position = Point3d::new(x, y, z);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a FiducialList {
    type Item = &'a Fiducial;
    type IntoIter = std::slice::Iter<'a, Fiducial>;

    fn into_iter(self) -> Self::IntoIter {
        self.fiducials.iter()
    }
}
