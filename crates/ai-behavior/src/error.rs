use thiserror::Error;

use ai_fsm::FsmError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// Unknown state key, missing initial state or a stopped machine.
    #[error(transparent)]
    Fsm(#[from] FsmError),

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
