//! Save-file view of an agent.

use std::fmt;

/// Kind of agent a snapshot belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityType {
    Enemy,
    Player,
    Npc,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Enemy  => "enemy",
            EntityType::Player => "player",
            EntityType::Npc    => "npc",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the save layer stores for one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub x:                   f32,
    pub y:                   f32,
    pub hit_points:          u32,
    pub max_hit_points:      u32,
    pub entity_type:         EntityType,
    pub is_dead:             bool,
    pub night_stats_applied: bool,
}
