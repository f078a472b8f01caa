use ai_behavior::BehaviorError;
use ai_core::AiError;
use ai_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] AiError),

    #[error("obstacle layout rejected: {0}")]
    Spatial(#[from] SpatialError),

    /// A fatal state-machine error from one of the agents.  Aborts the run.
    #[error("agent update failed: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SceneResult<T> = Result<T, SceneError>;
