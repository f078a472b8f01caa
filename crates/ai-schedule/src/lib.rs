//! `ai-schedule`: agent-owned delayed tasks.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`task_queue`] | `TaskQueue<T>` (`BTreeMap<Millis, Vec<ScheduledTask<T>>>`) |
//!
//! # Task model (summary)
//!
//! Behaviours that need "do X in N ms" (attack cooldown expiry, the
//! dead → fading → reviving chain, combo follow-up hits) push a task record
//! into the agent's own queue instead of registering a closure with the
//! scene.  Each task carries a [`Scope`]:
//!
//! ```text
//! Scope::Agent        fires whenever it comes due
//! Scope::State(epoch) fires only if the agent is still in the state
//!                     activation numbered `epoch`; otherwise it is dropped
//! ```
//!
//! The agent drains due tasks at the start of its update, passing its current
//! state epoch, so a combo hit queued during one attack can never land after
//! the agent has died or moved on.

pub mod task_queue;


pub use task_queue::{Scope, ScheduledTask, TaskQueue};
