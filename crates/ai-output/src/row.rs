//! Plain data row types written by output backends.

use ai_agent::EntityType;
use ai_core::{AgentId, Facing};

/// One agent at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentTraceRow {
    pub tick:       u64,
    pub agent:      AgentId,
    pub kind:       EntityType,
    /// snake_case state name, `"dead"` for a dead player.
    pub state:      &'static str,
    pub x:          f32,
    pub y:          f32,
    pub hit_points: u32,
    pub facing:     Facing,
}

/// Summary of one scene tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub elapsed_ms:    u64,
    pub is_night:      bool,
    pub events:        u64,
    pub player_damage: u32,
    pub kills:         u64,
}
