//! Rows of the trajectory table

use crate::fiducial::FiducialId;
use crate::ruler::Ruler;
use serde::{Deserialize, Serialize};
use std::fmt;
use trajslice_reslice::ResliceParameters;

/// Identifier of a trajectory in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrajectoryId(pub u64);

impl fmt::Display for TrajectoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trajectory-{}", self.0)
    }
}

/// Per-part display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartFlags {
    pub path: bool,
    pub entry: bool,
    pub target: bool,
}

impl PartFlags {
    pub const ALL: Self = Self {
        path: true,
        entry: true,
        target: true,
    };
    pub const NONE: Self = Self {
        path: false,
        entry: false,
        target: false,
    };

    /// Set the flag of the entry or target endpoint
    pub fn set_endpoint(&mut self, kind: FiducialKind, on: bool) {
        match kind {
            FiducialKind::Entry => self.entry = on,
            FiducialKind::Target => self.target = on,
        }
    }
}

/// A planned path: an entry fiducial, a target fiducial and the ruler joining them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryItem {
    pub id: TrajectoryId,
    pub entry: FiducialId,
    pub target: FiducialId,
    pub ruler: Ruler,
    /// Viewer previewing this trajectory with `reslice`, or the "no viewer" label
    pub reslice_viewer: String,
    pub reslice: ResliceParameters,
    pub display: PartFlags,
    pub projection: PartFlags,
}

impl TrajectoryItem {
    pub fn new<S: Into<String>>(
        id: TrajectoryId,
        entry: FiducialId,
        target: FiducialId,
        ruler: Ruler,
        no_viewer_label: S,
    ) -> Self {
        Self {
            id,
            entry,
            target,
            ruler,
            reslice_viewer: no_viewer_label.into(),
            reslice: ResliceParameters::new(),
            display: PartFlags::ALL,
            projection: PartFlags::NONE,
        }
    }

    pub fn name(&self) -> &str {
        trajslice_core::TrajectoryLine::name(&self.ruler)
    }

    /// Whether the trajectory joins exactly this entry and target
    pub fn joins(&self, entry: FiducialId, target: FiducialId) -> bool {
        self.entry == entry && self.target == target
    }

    /// Whether either endpoint is `fiducial` of the given kind
    pub fn uses(&self, fiducial: FiducialId, kind: FiducialKind) -> bool {
        match kind {
            FiducialKind::Entry => self.entry == fiducial,
            FiducialKind::Target => self.target == fiducial,
        }
    }
}

/// Which list a fiducial belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiducialKind {
    Entry,
    Target,
}

impl fmt::Display for FiducialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiducialKind::Entry => f.write_str("entry"),
            FiducialKind::Target => f.write_str("target"),
        }
    }
}
