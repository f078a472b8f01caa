use thiserror::Error;

/// Programmer errors raised by the state-machine runtime.
///
/// None of these are runtime conditions: a scene that sees one has a bug in
/// how its machines were assembled, and the tick loop propagates it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("initial state {0} is not registered")]
    MissingInitialState(String),

    #[error("unknown state {0}")]
    UnknownState(String),

    #[error("state machine has been stopped")]
    Stopped,

    #[error("more than {0} chained transitions in one call (last target {1})")]
    TransitionLoop(usize, String),
}

pub type FsmResult<T> = Result<T, FsmError>;
