//! Tunable constants for each agent kind.
//!
//! Durations are scene milliseconds, speeds are pixels per second and
//! distances are pixels.

use crate::{BehaviorError, BehaviorResult};

// ── EnemyTuning ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTuning {
    pub max_hit_points: u32,
    pub base_speed:     f32,

    /// Square perception half-extent.  0 falls back to the scene default.
    pub detection_distance: f32,
    /// Circular reach of an attack.
    pub attack_range:       f32,

    pub alert_ms:   u64,
    pub pursuit_ms: u64,
    pub search_ms:  u64,
    pub flank_ms:   u64,

    pub attack_delay_ms: u64,
    pub base_damage:     u32,

    pub combo_chance:          f32,
    /// Minimum time in `Attacking` before a combo may be rolled.
    pub combo_gate_ms:         u64,
    pub combo_delay_min_ms:    u64,
    pub combo_delay_max_ms:    u64,
    pub combo_damage_factor:   f32,
    pub combo_cooldown_factor: f32,

    pub death_delay_ms:  u64,
    pub fade_ms:         u64,
    pub revive_delay_ms: u64,

    pub patrol_radius:       f32,
    pub patrol_speed_factor: f32,
    pub search_speed_factor: f32,
    pub flank_speed_factor:  f32,
    /// Distance beside the target at which a flank approach aims.
    pub flank_offset:        f32,

    pub waypoint_reach:      f32,
    pub path_stale_distance: f32,

    pub night_speed_multiplier:  f32,
    pub night_attack_multiplier: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_hit_points: 30,
            base_speed:     80.0,

            detection_distance: 150.0,
            attack_range:       40.0,

            alert_ms:   500,
            pursuit_ms: 5_000,
            search_ms:  3_000,
            flank_ms:   2_000,

            attack_delay_ms: 1_000,
            base_damage:     10,

            combo_chance:          0.3,
            combo_gate_ms:         400,
            combo_delay_min_ms:    300,
            combo_delay_max_ms:    500,
            combo_damage_factor:   0.5,
            combo_cooldown_factor: 1.5,

            death_delay_ms:  1_000,
            fade_ms:         1_000,
            revive_delay_ms: 2_000,

            patrol_radius:       100.0,
            patrol_speed_factor: 0.5,
            search_speed_factor: 0.6,
            flank_speed_factor:  1.2,
            flank_offset:        80.0,

            waypoint_reach:      15.0,
            path_stale_distance: 50.0,

            night_speed_multiplier:  1.25,
            night_attack_multiplier: 1.5,
        }
    }
}

impl EnemyTuning {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !(0.0..=1.0).contains(&self.combo_chance) {
            return Err(BehaviorError::Config(format!(
                "combo_chance must be in [0, 1], got {}",
                self.combo_chance
            )));
        }
        if self.combo_delay_min_ms > self.combo_delay_max_ms {
            return Err(BehaviorError::Config(format!(
                "combo delay window is empty: {}..{}",
                self.combo_delay_min_ms, self.combo_delay_max_ms
            )));
        }
        if self.fade_ms == 0 {
            return Err(BehaviorError::Config("fade_ms must be > 0".into()));
        }
        if self.attack_range < 0.0 || self.waypoint_reach < 0.0 {
            return Err(BehaviorError::Config("distances must be >= 0".into()));
        }
        Ok(())
    }
}

// ── PlayerTuning ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerTuning {
    pub max_hit_points: u32,
    pub base_speed:     f32,

    pub sprint_multiplier:  f32,
    pub sprint_duration_ms: u64,
    /// Counted from the start of a sprint.
    pub sprint_cooldown_ms: u64,

    pub light_damage_min:  u32,
    pub light_damage_max:  u32,
    pub light_cooldown_ms: u64,
    pub light_anim_ms:     u64,

    pub heavy_damage_min:  u32,
    pub heavy_damage_max:  u32,
    pub heavy_cooldown_ms: u64,
    pub heavy_anim_ms:     u64,

    pub attack_reach:      f32,
    pub swim_speed_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_hit_points: 100,
            base_speed:     160.0,

            sprint_multiplier:  1.8,
            sprint_duration_ms: 1_500,
            sprint_cooldown_ms: 3_000,

            light_damage_min:  5,
            light_damage_max:  10,
            light_cooldown_ms: 400,
            light_anim_ms:     300,

            heavy_damage_min:  12,
            heavy_damage_max:  20,
            heavy_cooldown_ms: 1_200,
            heavy_anim_ms:     600,

            attack_reach:      50.0,
            swim_speed_factor: 0.5,
        }
    }
}

impl PlayerTuning {
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.light_damage_min > self.light_damage_max {
            return Err(BehaviorError::Config("light damage range is empty".into()));
        }
        if self.heavy_damage_min > self.heavy_damage_max {
            return Err(BehaviorError::Config("heavy damage range is empty".into()));
        }
        Ok(())
    }
}

// ── NpcTuning ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcTuning {
    pub max_hit_points:  u32,
    pub base_speed:      f32,
    pub wander_radius:   f32,
    pub idle_min_ms:     u64,
    pub idle_max_ms:     u64,
    pub interact_radius: f32,
}

impl Default for NpcTuning {
    fn default() -> Self {
        Self {
            max_hit_points:  10,
            base_speed:      40.0,
            wander_radius:   80.0,
            idle_min_ms:     2_000,
            idle_max_ms:     5_000,
            interact_radius: 40.0,
        }
    }
}

impl NpcTuning {
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.idle_min_ms > self.idle_max_ms {
            return Err(BehaviorError::Config("idle window is empty".into()));
        }
        Ok(())
    }
}
