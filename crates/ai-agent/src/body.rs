//! Kinematic state of one agent.

use ai_core::{AgentId, Facing, Vec2};

/// Position, velocity and facing.  Written only by the agent's own state
/// execution (or by the scene's collision resolution).
#[derive(Clone, Debug)]
pub struct Body {
    pub id:         AgentId,
    pub position:   Vec2,
    /// Pixels per second.
    pub velocity:   Vec2,
    /// Base movement speed in pixels per second, before any multiplier.
    pub base_speed: f32,
    pub facing:     Facing,
}

impl Body {
    pub fn new(id: AgentId, position: Vec2, base_speed: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            base_speed,
            facing: Facing::default(),
        }
    }

    #[inline]
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Point the velocity at `target` with magnitude `speed`.
    #[inline]
    pub fn head_towards(&mut self, target: Vec2, speed: f32) {
        self.velocity = self.position.towards(target, speed);
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.position.distance(p)
    }

    /// Move by `velocity × delta` and re-derive facing from the velocity.
    pub fn integrate(&mut self, delta_ms: f32) {
        self.position += self.velocity * (delta_ms / 1000.0);
        self.facing = Facing::from_velocity(self.velocity, self.facing);
    }
}
