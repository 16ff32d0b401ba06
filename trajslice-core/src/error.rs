//! Error types for trajslice

use thiserror::Error;

/// Main error type for trajslice operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate trajectory: endpoints are {length} apart")]
    DegenerateTrajectory { length: f64 },

    #[error("Missing fiducial: {0}")]
    MissingFiducial(String),

    #[error("Missing trajectory: {0}")]
    MissingTrajectory(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for trajslice operations
pub type Result<T> = std::result::Result<T, Error>;
