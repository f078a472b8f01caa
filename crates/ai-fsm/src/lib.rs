//! `ai-fsm`: a small, generic finite-state-machine runtime.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`state`]   | `Actor` and `State` traits, `Transitions` handle                |
//! | [`machine`] | `StateMachine<A>`, `StateMachineBuilder<A>`, `ExitPolicy`       |
//! | [`error`]   | `FsmError`, `FsmResult<T>`                                      |
//!
//! # Lifecycle
//!
//! ```text
//! step():        current == None ─► current = initial; initial.enter()
//!                states[current].execute()
//! transition(k): [exit(current) if ExitPolicy::CallExit]
//!                current = k; states[k].enter(entry)
//! stop():        current = None; state table cleared (irreversible)
//! ```
//!
//! Transitions requested from inside `enter`/`execute` through the
//! [`Transitions`] handle are applied synchronously as soon as the callback
//! returns, so within one `step` the order of effects is total.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut fsm = StateMachine::<EnemyBody>::builder(EnemyState::Patrolling)
//!     .state(EnemyState::Patrolling, Patrolling)
//!     .state(EnemyState::Alert, Alert)
//!     .label("enemy#0")
//!     .build()?;
//! fsm.step(&mut body, &mut ctx)?;
//! ```

pub mod error;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{FsmError, FsmResult};
pub use machine::{ExitPolicy, MAX_CHAINED_TRANSITIONS, StateMachine, StateMachineBuilder};
pub use state::{Actor, State, StateKey, Transitions};
