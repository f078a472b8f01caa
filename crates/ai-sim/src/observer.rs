//! Scene observer trait for progress reporting and data collection.

use ai_agent::GameEvent;
use ai_core::Millis;

use crate::{Scene, TickReport};

/// Callbacks invoked by [`Scene::run`][crate::Scene::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: death counter
///
/// ```rust,ignore
/// struct Deaths(usize);
///
/// impl SceneObserver for Deaths {
///     fn on_events(&mut self, _tick: u64, events: &[GameEvent]) {
///         self.0 += events.iter().filter(|e| matches!(e, GameEvent::Died { .. })).count();
///     }
/// }
/// ```
pub trait SceneObserver {
    /// Called before the tick is processed.  `tick` is the number the tick
    /// will carry once processed.
    fn on_tick_start(&mut self, _tick: u64, _now: Millis) {}

    /// Every event emitted and resolved during the tick, in emission order.
    fn on_events(&mut self, _tick: u64, _events: &[GameEvent]) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the whole scene.
    fn on_snapshot(&mut self, _tick: u64, _scene: &Scene) {}

    /// Called once after the final tick completes.
    fn on_scene_end(&mut self, _final_tick: u64) {}
}

/// A [`SceneObserver`] that does nothing.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}
