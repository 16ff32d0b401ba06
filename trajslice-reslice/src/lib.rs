//! # trajslice reslice
//!
//! Oblique reslicing of 2D viewers along planning trajectories.
//!
//! This crate computes a viewer's cutting plane from a trajectory's endpoints,
//! stores reslicing parameters per (trajectory, viewer) pair in the viewer's
//! attribute table, and drives each viewer through an explicit
//! `Idle → Bound → Active` state machine.

pub mod config;
pub mod controller;
pub mod panel;
pub mod params;
pub mod perpendicular;
pub mod solver;
pub mod state;

// Re-export commonly used items
pub use config::*;
pub use controller::*;
pub use panel::*;
pub use params::*;
pub use perpendicular::*;
pub use solver::*;
pub use state::*;
