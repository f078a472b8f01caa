//! Deterministic per-agent and scene-level RNG wrappers.
//!
//! Each agent owns its own `SmallRng` seeded by
//!
//!   seed = scene_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! so patrol rolls, combo rolls and damage rolls of one agent never depend on
//! how many other agents were updated before it in the same tick.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Millis};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, owned by the agent's body.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the scene seed and an agent ID.
    pub fn new(scene_seed: u64, agent: AgentId) -> Self {
        let seed = scene_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform `f32` in `[0, 1)`; the `Math.random()` of behaviour code.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.0.gen_bool(f64::from(p.clamp(0.0, 1.0)))
    }

    /// Uniform duration in `[lo, hi]` milliseconds.
    pub fn millis_between(&mut self, lo: u64, hi: u64) -> Millis {
        if hi <= lo {
            return Millis(lo);
        }
        Millis(self.0.gen_range(lo..=hi))
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }
}

// ── SceneRng ──────────────────────────────────────────────────────────────────

/// Scene-level RNG for procedural spawning and other global rolls.
pub struct SceneRng(SmallRng);

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        SceneRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
