//! Ruler line representing a trajectory in the scene

use serde::{Deserialize, Serialize};
use trajslice_core::{Point3d, TrajectoryLine};

/// Line from an entry point to a target point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruler {
    id: String,
    name: String,
    point1: Point3d,
    point2: Point3d,
    pub visible: bool,
    /// Drawn where a resliced viewer's plane crosses it
    pub slice_intersection_visible: bool,
    pub projection: bool,
}

impl Ruler {
    pub fn new<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        point1: Point3d,
        point2: Point3d,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            point1,
            point2,
            visible: true,
            slice_intersection_visible: false,
            projection: false,
        }
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn set_point1(&mut self, point: Point3d) {
        self.point1 = point;
    }

    pub fn set_point2(&mut self, point: Point3d) {
        self.point2 = point;
    }
}

impl TrajectoryLine for Ruler {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn point1(&self) -> Point3d {
        self.point1
    }

    fn point2(&self) -> Point3d {
        self.point2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ruler_line() {
        let mut ruler = Ruler::new(
            "ruler-1",
            "E1T1",
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(3.0, 4.0, 0.0),
        );
        assert_eq!(ruler.id(), "ruler-1");
        assert_relative_eq!(ruler.length(), 5.0);
        assert!(ruler.visible);
        assert!(!ruler.slice_intersection_visible);

        ruler.set_point2(Point3d::new(0.0, 0.0, 2.0));
        ruler.set_name("Renamed");
        assert_eq!(ruler.name(), "Renamed");
        assert_relative_eq!(ruler.length(), 2.0);
    }
}
