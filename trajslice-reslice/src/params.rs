//! Reslicing parameters

use serde::{Deserialize, Deserializer, Serialize};

/// How the cutting plane relates to the trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResliceMode {
    /// Plane normal to the trajectory, parameterized by position along it
    #[default]
    Perpendicular,
    /// Plane containing the trajectory, parameterized by rotation about it
    Transverse,
}

impl ResliceMode {
    /// Mode from the "perpendicular" switch state
    pub fn from_perpendicular(perpendicular: bool) -> Self {
        if perpendicular {
            Self::Perpendicular
        } else {
            Self::Transverse
        }
    }

    pub fn is_perpendicular(self) -> bool {
        self == Self::Perpendicular
    }
}

/// Accepted interval for the transverse angle, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleRange {
    /// [-180, 180]
    Signed,
    /// [0, 360]
    #[default]
    Full,
}

impl AngleRange {
    /// Inclusive bounds in degrees
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Signed => (-180.0, 180.0),
            Self::Full => (0.0, 360.0),
        }
    }

    pub fn contains(self, angle: f64) -> bool {
        let (min, max) = self.bounds();
        angle >= min && angle <= max
    }
}

/// Bounds of the position along the trajectory, in percent
pub const POSITION_RANGE: (f64, f64) = (0.0, 100.0);

/// Reslicing parameters of one trajectory in one viewer.
///
/// `position` is always within [`POSITION_RANGE`]; `angle` is whatever the
/// last accepted value was, out-of-range inputs resetting it to 0.
/// Deserialized values go through the same rules; since the angle range is not
/// part of the data, an angle is kept when either range accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResliceParameters {
    mode: ResliceMode,
    position: f64,
    angle: f64,
}

impl<'de> Deserialize<'de> for ResliceParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Unchecked {
            mode: ResliceMode,
            position: f64,
            angle: f64,
        }

        let raw = Unchecked::deserialize(deserializer)?;
        let range = if AngleRange::Signed.contains(raw.angle) {
            AngleRange::Signed
        } else {
            AngleRange::Full
        };
        Ok(Self::new()
            .with_mode(raw.mode)
            .with_position(raw.position)
            .with_angle(raw.angle, range))
    }
}

impl ResliceParameters {
    /// Perpendicular mode at position 0, angle 0
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ResliceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_position(mut self, position: f64) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_angle(mut self, angle: f64, range: AngleRange) -> Self {
        self.set_angle(angle, range);
        self
    }

    pub fn mode(&self) -> ResliceMode {
        self.mode
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_mode(&mut self, mode: ResliceMode) {
        self.mode = mode;
    }

    /// Set the position in percent, clamped to [0, 100]; NaN becomes 0
    pub fn set_position(&mut self, position: f64) {
        let (min, max) = POSITION_RANGE;
        self.position = if position.is_nan() {
            0.0
        } else {
            position.clamp(min, max)
        };
    }

    /// Set the angle in degrees; a value outside `range` resets it to 0
    pub fn set_angle(&mut self, angle: f64, range: AngleRange) {
        self.angle = if range.contains(angle) { angle } else { 0.0 };
    }

    /// Value driving the plane in the current mode: position or angle
    pub fn scalar(&self) -> f64 {
        match self.mode {
            ResliceMode::Perpendicular => self.position,
            ResliceMode::Transverse => self.angle,
        }
    }

    /// Set the value of the current mode
    pub fn set_scalar(&mut self, value: f64, range: AngleRange) {
        match self.mode {
            ResliceMode::Perpendicular => self.set_position(value),
            ResliceMode::Transverse => self.set_angle(value, range),
        }
    }
}
