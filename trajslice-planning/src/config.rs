//! Planning configuration

use serde::{Deserialize, Serialize};
use trajslice_core::Result;
use trajslice_reslice::ReslicingConfig;

/// Configuration of a [`PathPlan`](crate::PathPlan)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub reslicing: ReslicingConfig,
    /// Opacity of the selected fiducial in its list
    pub selected_opacity: f64,
    /// Opacity of every other fiducial in that list
    pub unselected_opacity: f64,
    /// Viewer name meaning "no viewer" for a trajectory's preview viewer
    pub no_viewer_label: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            reslicing: ReslicingConfig::default(),
            selected_opacity: 1.0,
            unselected_opacity: 0.3,
            no_viewer_label: "None".to_string(),
        }
    }
}

impl PlanConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
