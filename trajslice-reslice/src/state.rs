//! Persistence of reslicing state in viewer attributes
//!
//! Parameters are stored per (trajectory, viewer) pair under keys of the form
//! `<namespace>.<trajectory>_<viewer>_<field>`. Keys depend only on names, so
//! renaming a trajectory leaves its old entries behind and starts from
//! defaults under the new name. Entries are never removed.

use crate::config::ReslicingConfig;
use crate::params::{AngleRange, ResliceMode, ResliceParameters};
use trajslice_core::Viewer;

const ON: &str = "ON";
const OFF: &str = "OFF";

/// Per-pair field persisted on a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Position,
    Angle,
    Perpendicular,
}

impl StateField {
    fn suffix(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Angle => "Angle",
            Self::Perpendicular => "Perpendicular",
        }
    }
}

/// Reads and writes reslicing state through a viewer's attribute table
#[derive(Debug, Clone, PartialEq)]
pub struct ResliceStateStore {
    namespace: String,
    angle_range: AngleRange,
}

impl ResliceStateStore {
    pub fn new<S: Into<String>>(namespace: S, angle_range: AngleRange) -> Self {
        Self {
            namespace: namespace.into(),
            angle_range,
        }
    }

    pub fn from_config(config: &ReslicingConfig) -> Self {
        Self::new(config.namespace.clone(), config.angle_range)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Attribute key of one field of a (trajectory, viewer) pair
    pub fn key(&self, trajectory: &str, viewer: &str, field: StateField) -> String {
        format!("{}.{}_{}_{}", self.namespace, trajectory, viewer, field.suffix())
    }

    /// Attribute key of the driving trajectory's ID
    pub fn driving_id_key(&self) -> String {
        format!("{}.DrivingPathID", self.namespace)
    }

    /// Attribute key of the driving trajectory's name
    pub fn driving_name_key(&self) -> String {
        format!("{}.DrivingPathName", self.namespace)
    }

    /// Write `params` for `trajectory` onto `viewer`
    pub fn save_state<V: Viewer + ?Sized>(
        &self,
        trajectory: &str,
        viewer: &mut V,
        params: &ResliceParameters,
    ) {
        let viewer_name = viewer.name().to_string();
        let perpendicular = if params.mode().is_perpendicular() { ON } else { OFF };

        viewer.set_attribute(
            &self.key(trajectory, &viewer_name, StateField::Position),
            &params.position().to_string(),
        );
        viewer.set_attribute(
            &self.key(trajectory, &viewer_name, StateField::Angle),
            &params.angle().to_string(),
        );
        viewer.set_attribute(
            &self.key(trajectory, &viewer_name, StateField::Perpendicular),
            perpendicular,
        );
        log::debug!("Saved reslice state of '{}' on '{}': {:?}", trajectory, viewer_name, params);
    }

    /// Read the parameters of `trajectory` from `viewer`.
    ///
    /// Missing entries give the defaults; unparsable numbers read as 0.
    pub fn load_state<V: Viewer + ?Sized>(
        &self,
        trajectory: &str,
        viewer: &V,
    ) -> ResliceParameters {
        let viewer_name = viewer.name();
        let number = |field| {
            viewer
                .attribute(&self.key(trajectory, viewer_name, field))
                .map(|value| value.trim().parse::<f64>().unwrap_or(0.0))
                .unwrap_or(0.0)
        };
        let perpendicular_key = self.key(trajectory, viewer_name, StateField::Perpendicular);
        let mode = match viewer.attribute(&perpendicular_key) {
            Some(value) => ResliceMode::from_perpendicular(value == ON),
            None => ResliceMode::Perpendicular,
        };

        ResliceParameters::new()
            .with_mode(mode)
            .with_position(number(StateField::Position))
            .with_angle(number(StateField::Angle), self.angle_range)
    }

    /// Record that the trajectory `id`/`name` drives `viewer`
    pub fn mark_driving<V: Viewer + ?Sized>(&self, viewer: &mut V, id: &str, name: &str) {
        viewer.set_attribute(&self.driving_id_key(), id);
        viewer.set_attribute(&self.driving_name_key(), name);
        log::info!("Trajectory '{}' now drives viewer '{}'", name, viewer.name());
    }

    /// ID of the trajectory that last drove `viewer`
    pub fn driving_id<V: Viewer + ?Sized>(&self, viewer: &V) -> Option<String> {
        viewer.attribute(&self.driving_id_key())
    }

    /// Name of the trajectory that last drove `viewer`
    pub fn driving_name<V: Viewer + ?Sized>(&self, viewer: &V) -> Option<String> {
        viewer.attribute(&self.driving_name_key())
    }

    /// Whether the trajectory `id` is the one recorded as driving `viewer`
    pub fn is_driving<V: Viewer + ?Sized>(&self, viewer: &V, id: &str) -> bool {
        self.driving_id(viewer).as_deref() == Some(id)
    }
}

impl Default for ResliceStateStore {
    fn default() -> Self {
        Self::from_config(&ReslicingConfig::default())
    }
}
