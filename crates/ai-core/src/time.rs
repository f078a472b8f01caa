//! Scene time model.
//!
//! Time is an integer count of milliseconds since scene start (`Millis`).
//! Per-state timers accumulate the tick's `delta` as `f32` milliseconds on the
//! agent; absolute deadlines (cooldowns, scheduled tasks) use `Millis`.
//!
//! Pausing is not a cancellation API: the scene scales each tick's delta by
//! `time_scale`, and a near-zero scale freezes every timer.

use std::fmt;

use crate::{AiError, AiResult};

// ── Millis ────────────────────────────────────────────────────────────────────

/// Absolute scene time in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0.saturating_add(rhs))
    }
}

impl std::ops::Add<Millis> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── SceneClock ────────────────────────────────────────────────────────────────

/// Tracks the current tick and scene time.
///
/// Sub-millisecond remainders of scaled deltas are carried so that the
/// integer clock does not drift against the summed `f32` deltas.
#[derive(Clone, Debug)]
pub struct SceneClock {
    pub tick: u64,
    pub now: Millis,
    /// Multiplier applied to every raw delta.  `1.0` = real time.
    pub time_scale: f32,
    carry: f32,
}

impl SceneClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            tick: 0,
            now: Millis::ZERO,
            time_scale,
            carry: 0.0,
        }
    }

    /// Advance by one tick of `raw_delta_ms`; returns the scaled delta.
    pub fn advance(&mut self, raw_delta_ms: f32) -> f32 {
        let delta = (raw_delta_ms * self.time_scale).max(0.0);
        let total = delta + self.carry;
        let whole = total.floor();
        self.carry = total - whole;
        self.now = self.now + whole as u64;
        self.tick += 1;
        delta
    }
}

impl fmt::Display for SceneClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {} @ {}", self.tick, self.now)
    }
}

// ── SceneConfig ───────────────────────────────────────────────────────────────

/// Top-level scene configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Master RNG seed.  The same seed always replays the same scene.
    pub seed: u64,

    /// Fixed frame length used by `Scene::run`, in milliseconds.
    pub tick_ms: f32,

    /// Ticks simulated by `Scene::run`.
    pub total_ticks: u64,

    /// Observer snapshot every N ticks; 0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Delta multiplier; near zero pauses the scene.
    pub time_scale: f32,

    /// Length of a full day/night cycle in scene milliseconds; night is the
    /// second half.  0 disables the cycle (permanent day).
    pub day_length_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tick_ms: 1000.0 / 60.0,
            total_ticks: 3_600,
            snapshot_interval_ticks: 30,
            time_scale: 1.0,
            day_length_ms: 120_000,
        }
    }
}

impl SceneConfig {
    /// Reject frame lengths and time scales the clock cannot run with.
    pub fn validate(&self) -> AiResult<()> {
        if !(self.tick_ms > 0.0 && self.tick_ms.is_finite()) {
            return Err(AiError::Config(format!("tick_ms must be > 0, got {}", self.tick_ms)));
        }
        if !(self.time_scale >= 0.0 && self.time_scale.is_finite()) {
            return Err(AiError::Config(format!("time_scale must be >= 0, got {}", self.time_scale)));
        }
        Ok(())
    }

    pub fn make_clock(&self) -> SceneClock {
        SceneClock::new(self.time_scale)
    }

    /// `true` when `now` falls in the night half of the cycle.
    pub fn is_night_at(&self, now: Millis) -> bool {
        if self.day_length_ms == 0 {
            return false;
        }
        now.0 % self.day_length_ms >= self.day_length_ms / 2
    }
}
