//! Runtime-wide error type.
//!
//! Sub-crates define their own error enums (`FsmError`, `SpatialError`, …)
//! and convert into `AiError` where a common type is convenient.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `ai-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ai-*` crates.
pub type AiResult<T> = Result<T, AiError>;
