//! # trajslice
//!
//! Trajectory planning and oblique reslicing for 2D slice viewers.
//!
//! This is the umbrella crate that provides convenient access to all trajslice functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, cutting planes and the viewer/trajectory traits
//! - **Reslice**: Plane solver, per-viewer state persistence and the reslicing state machine
//! - **Planning**: Entry/target fiducial lists and the trajectory table
//!
//! ## Quick Start
//!
//! ```rust
//! use trajslice::prelude::*;
//!
//! let mut plan: PathPlan<SliceViewer> = PathPlan::default();
//! plan.add_viewer(SliceViewer::new("Red"));
//!
//! let entry = plan.add_entry("E1", Point3d::new(0.0, 0.0, 0.0));
//! let target = plan.add_target("T1", Point3d::new(0.0, 0.0, 40.0));
//! plan.add_trajectory(entry, target)?;
//!
//! // Slide the Red viewer's plane a quarter of the way along the trajectory
//! plan.toggle_reslicing("Red", true);
//! plan.set_reslice_value("Red", 25.0);
//! assert_eq!(plan.panel("Red").map(|p| p.value_text), Some("10.00".to_string()));
//! # Ok::<(), trajslice::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables planning
//! - `planning`: Fiducial lists, trajectories and [`PathPlan`](planning::PathPlan)

// Re-export core functionality
pub use trajslice_core::*;

// Re-export sub-crates
pub use trajslice_reslice as reslice;

#[cfg(feature = "planning")]
pub use trajslice_planning as planning;

/// Convenient imports for common use cases
pub mod prelude {
    pub use trajslice_core::*;

    pub use trajslice_reslice::*;

    #[cfg(feature = "planning")]
    pub use trajslice_planning::*;
}
