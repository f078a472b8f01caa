//! `ai-agent`: per-agent building blocks shared by enemies, the player and
//! NPCs.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`body`]       | `Body` (position, velocity, base speed, facing)            |
//! | [`vitals`]     | `Vitals` (clamped hit points), `DamageOutcome`             |
//! | [`night`]      | `NightStats` (idempotent night multipliers)                |
//! | [`path`]       | `PathFollower` (waypoint consumption, staleness)           |
//! | [`animation`]  | `AnimationLibrary`, `Animator` (name selection + fallback) |
//! | [`event`]      | `GameEvent`, `SoundCue`, `AttackKind`, `Outbox`            |
//! | [`snapshot`]   | `AgentSnapshot`, `EntityType`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on snapshots and events.   |

pub mod animation;
pub mod body;
pub mod event;
pub mod night;
pub mod path;
pub mod snapshot;
pub mod vitals;

#[cfg(test)]
mod tests;

pub use animation::{AnimationLibrary, Animator};
pub use body::Body;
pub use event::{AttackKind, GameEvent, Outbox, SoundCue};
pub use night::NightStats;
pub use path::PathFollower;
pub use snapshot::{AgentSnapshot, EntityType};
pub use vitals::{DamageOutcome, Vitals};
