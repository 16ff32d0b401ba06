//! What a viewer's reslicing control bar displays

use crate::controller::{ResliceController, ResliceState};
use crate::params::{ResliceMode, POSITION_RANGE};
use trajslice_core::{TrajectoryLine, Viewer};

/// Display state of one viewer's reslicing control bar
#[derive(Debug, Clone, PartialEq)]
pub struct ReslicePanel {
    /// Layout label, followed by the driving trajectory's name when one is recorded
    pub title: String,
    /// Bar usable at all (a trajectory is bound)
    pub enabled: bool,
    pub reslicing_checked: bool,
    /// Slider and mode switch usable (reslicing is on)
    pub controls_enabled: bool,
    pub perpendicular: bool,
    pub slider_range: (f64, f64),
    pub slider_value: f64,
    pub caption: &'static str,
    pub unit: &'static str,
    pub value_text: String,
    /// Bound trajectory is the one recorded as driving this viewer
    pub highlighted: bool,
    pub highlight_color: Option<String>,
}

impl<V: Viewer> ResliceController<V> {
    /// Control bar state; `line` is the bound trajectory, if still available
    pub fn panel(&self, line: Option<&dyn TrajectoryLine>) -> ReslicePanel {
        let viewer = self.viewer();
        let store = self.store();
        let params = self.params();

        let title = match store.driving_name(viewer) {
            Some(name) => format!("{} : {}", viewer.layout_label(), name),
            None => viewer.layout_label().to_string(),
        };
        let highlighted = self
            .bound()
            .is_some_and(|key| store.is_driving(viewer, &key.id));

        let (slider_range, caption, unit, value_text) = match params.mode() {
            ResliceMode::Perpendicular => {
                let distance = line.map(|l| l.length()).unwrap_or(0.0) * params.position() / 100.0;
                (POSITION_RANGE, "Distance:", "mm", format!("{:.2}", distance))
            }
            ResliceMode::Transverse => (
                self.angle_range().bounds(),
                "Angle:",
                "deg",
                params.angle().to_string(),
            ),
        };

        ReslicePanel {
            title,
            enabled: self.state() != ResliceState::Idle,
            reslicing_checked: self.is_active(),
            controls_enabled: self.is_active(),
            perpendicular: params.mode().is_perpendicular(),
            slider_range,
            slider_value: params.scalar(),
            caption,
            unit,
            value_text,
            highlighted,
            highlight_color: highlighted.then(|| self.highlight_color().to_string()),
        }
    }
}
