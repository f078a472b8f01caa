//! Spatial-subsystem error type.

use thiserror::Error;

use ai_core::ObstacleId;

/// Errors produced by `ai-spatial`.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("obstacle {id} is invalid: {reason}")]
    InvalidObstacle { id: ObstacleId, reason: &'static str },

    #[error("pathfinder configuration error: {0}")]
    Config(String),

    /// A perception or path query received a NaN/infinite coordinate.
    #[error("non-finite coordinate in spatial query")]
    NonFinite,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
