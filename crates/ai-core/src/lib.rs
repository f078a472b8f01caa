//! `ai-core`: foundational types for the actor-AI runtime.
//!
//! This crate is a dependency of every other `ai-*` crate.  It has no `ai-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObstacleId`, `TaskId`                     |
//! | [`geo`]         | `Vec2`, `Rect`, segment distance                      |
//! | [`time`]        | `Millis`, `SceneClock`, `SceneConfig`                 |
//! | [`facing`]      | `Facing` (up/down/left/right)                         |
//! | [`rng`]         | `AgentRng` (per-agent), `SceneRng` (global)           |
//! | [`error`]       | `AiError`, `AiResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod facing;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AiError, AiResult};
pub use facing::Facing;
pub use geo::{Rect, Vec2};
pub use ids::{AgentId, ObstacleId, TaskId};
pub use rng::{AgentRng, SceneRng};
pub use time::{Millis, SceneClock, SceneConfig};
