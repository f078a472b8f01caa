//! Per-tick view of the world passed to every agent update.

use ai_core::{Millis, Vec2};
use ai_spatial::{Pathfinder, Perception};

use crate::InputSnapshot;

/// What an agent may read during one update.
///
/// The scene builds one per agent group each tick and lends it to the
/// agents' state callbacks.  States only read from it; the pathfinder and
/// its obstacle snapshot are shared by every agent for the whole tick.
pub struct TickContext<'a> {
    /// Scene time at the end of this tick.
    pub now: Millis,

    /// Scaled milliseconds since the previous tick.
    pub delta_ms: f32,

    /// Where the agent's target (the player) stands.  `None` when there is
    /// nothing to chase; perception then reports "not seen".
    pub target: Option<Vec2>,

    pub pathfinder: &'a dyn Pathfinder,

    pub perception: Perception,

    /// Keys held this tick.  Only the player and NPCs look at it.
    pub input: InputSnapshot,

    /// Whether the player overlaps water this tick.
    pub in_water: bool,
}

impl<'a> TickContext<'a> {
    pub fn new(now: Millis, delta_ms: f32, pathfinder: &'a dyn Pathfinder) -> Self {
        Self {
            now,
            delta_ms,
            target: None,
            pathfinder,
            perception: Perception::default(),
            input: InputSnapshot::default(),
            in_water: false,
        }
    }

    pub fn with_target(mut self, target: Option<Vec2>) -> Self {
        self.target = target;
        self
    }

    pub fn with_perception(mut self, perception: Perception) -> Self {
        self.perception = perception;
        self
    }

    pub fn with_input(mut self, input: InputSnapshot) -> Self {
        self.input = input;
        self
    }

    pub fn with_water(mut self, in_water: bool) -> Self {
        self.in_water = in_water;
        self
    }
}
