//! Trajectory planning for trajslice
//!
//! This crate provides the entry and target fiducial lists, the trajectory
//! table built from them and a [`PathPlan`] that keeps rulers, fiducials and
//! the viewers' reslicing controllers consistent with each other.

pub mod config;
pub mod fiducial;
pub mod plan;
pub mod ruler;
pub mod trajectory;

pub use config::*;
pub use fiducial::*;
pub use plan::*;
pub use ruler::*;
pub use trajectory::*;

#[cfg(test)]
mod tests;
