//! `ai-behavior`: the state machines that drive enemies, the player and
//! NPCs.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`context`] | `TickContext<'a>` : per-tick view lent to every agent update     |
//! | [`input`]   | `InputKeys` (bitflags), `InputSnapshot`                          |
//! | [`tuning`]  | `EnemyTuning`, `PlayerTuning`, `NpcTuning`                       |
//! | [`agent`]   | `Agent` trait : the surface the scene and save layer use         |
//! | [`enemy`]   | `Enemy`, `EnemyState`, patrol patterns                           |
//! | [`player`]  | `Player`, `PlayerState`, swimming overlay                        |
//! | [`npc`]     | `Npc`, `NpcState`                                                |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Update order
//!
//! Every `update` runs, in order:
//!
//! 1. due scheduled tasks (state-scoped ones from a left state are dropped),
//! 2. one `StateMachine::step` (perception → transition checks → movement),
//! 3. position integration and facing,
//! 4. animation name selection.
//!
//! Agents never mutate each other.  Attacks and cues land in the agent's
//! `Outbox`, and the scene resolves them after every agent has updated.

pub mod agent;
pub mod context;
pub mod enemy;
pub mod error;
pub mod input;
pub mod npc;
pub mod player;
pub mod tuning;


pub use agent::Agent;
pub use context::TickContext;
pub use enemy::{Enemy, EnemyBody, EnemyEntry, EnemyState, EnemyTask, PatrolPattern};
pub use error::{BehaviorError, BehaviorResult};
pub use input::{InputKeys, InputSnapshot};
pub use npc::{Npc, NpcState};
pub use player::{Player, PlayerState};
pub use tuning::{EnemyTuning, NpcTuning, PlayerTuning};
