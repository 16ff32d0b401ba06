//! Core data structures and traits for trajslice
//!
//! This crate provides the fundamental types shared by the reslicing and
//! planning crates: double precision points and vectors, the slice plane
//! basis, the error type, and the capability traits through which the host
//! application's viewers and trajectories are reached.

pub mod point;
pub mod plane;
pub mod traits;
pub mod viewer;
pub mod error;

pub use point::*;
pub use plane::*;
pub use traits::*;
pub use viewer::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, Unit};
