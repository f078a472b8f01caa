//! `ai-sim`: scene tick loop for the actor-AI runtime.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 1..=config.total_ticks:
//!   ① Clock     : scale the frame delta by time_scale and advance.
//!   ② Night     : on a day/night edge, toggle night stats on every enemy.
//!   ③ Player    : input snapshot + water overlap → one FSM step.
//!   ④ Enemies   : target = player position while the player lives.
//!   ⑤ NPCs      : target = player position, same input snapshot.
//!   ⑥ Resolve   : drain every outbox:
//!                   EnemyAttack  → player damage (if still in reach)
//!                   PlayerAttack → damage to enemies within reach
//!   ⑦ Observe   : on_events, on_tick_end, on_snapshot every N ticks.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ai_behavior::InputSnapshot;
//! use ai_core::{SceneConfig, Vec2};
//! use ai_sim::{NoopObserver, SceneBuilder};
//!
//! let mut scene = SceneBuilder::new(SceneConfig::default())
//!     .enemy_at(Vec2::new(120.0, 0.0))
//!     .build()?;
//! scene.run(&mut NoopObserver, |_| InputSnapshot::default())?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scene;


pub use builder::{EnemySpawn, SceneBuilder, SceneLayout};
pub use error::{SceneError, SceneResult};
pub use observer::{NoopObserver, SceneObserver};
pub use scene::{Scene, TickReport};
