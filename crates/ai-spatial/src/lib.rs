//! `ai-spatial`: obstacles, local pathfinding and perception.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`obstacle`]   | `Obstacle`, `ObstacleSet` (R-tree indexed)                |
//! | [`pathfinder`] | `Pathfinder` trait, `DetourPathfinder`, `PathfinderConfig`|
//! | [`perception`] | `Perception`, square and circular range tests             |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on obstacles and configs.  |

pub mod error;
pub mod obstacle;
pub mod pathfinder;
pub mod perception;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use obstacle::{Obstacle, ObstacleSet};
pub use pathfinder::{DetourPathfinder, Pathfinder, PathfinderConfig};
pub use perception::{Perception, PerceptionConfig, is_within_radius, is_within_square_range};
