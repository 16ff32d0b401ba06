//! Reslicing configuration

use crate::params::AngleRange;
use serde::{Deserialize, Serialize};
use trajslice_core::Result;

/// Configuration shared by every reslicing controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReslicingConfig {
    /// Prefix of every attribute written on a viewer
    pub namespace: String,
    /// Accepted interval of the transverse angle
    pub angle_range: AngleRange,
    /// Background of the reslice button when the bound trajectory drives the viewer
    pub highlight_color: String,
}

impl Default for ReslicingConfig {
    fn default() -> Self {
        Self {
            namespace: "PathXplorer".to_string(),
            angle_range: AngleRange::Full,
            highlight_color: "#00CCFF".to_string(),
        }
    }
}

impl ReslicingConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_angle_range(mut self, angle_range: AngleRange) -> Self {
        self.angle_range = angle_range;
        self
    }
}
