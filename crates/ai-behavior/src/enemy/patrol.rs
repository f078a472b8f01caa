//! Patrol movement patterns.
//!
//! The pattern is rolled once at spawn.  Every pattern keeps its own heading
//! between ticks; headings change on randomized windows, never per tick.

use std::f32::consts::TAU;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use ai_core::{AgentRng, Vec2};

const FLIP_WINDOW_MS: (u64, u64) = (4_000, 6_000);
const HORIZONTAL_PAUSE_CHANCE: f32 = 0.2;
const WOBBLE_HZ: f32 = 0.5;
/// Vertical wobble as a fraction of patrol speed.
const WOBBLE_AMPLITUDE: f32 = 0.2;

const HEADING_WINDOW_MS: (u64, u64) = (3_000, 5_000);
const RANDOM_PAUSE_CHANCE: f32 = 0.3;

const JITTER_INTERVAL_MS: f32 = 3_000.0;
const JITTER_DURATION_MS: f32 = 250.0;
const JITTER_SPEED_FACTOR: f32 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatrolPattern {
    /// Left/right with a small vertical wobble.
    Horizontal,
    /// Orbit around the patrol centre.
    Circular,
    /// Hold a random heading for a few seconds at a time.
    Random,
    /// Stay near the centre with an occasional jitter.
    Stationary,
}

impl PatrolPattern {
    /// Uniform choice over the four patterns.
    pub fn roll(rng: &mut AgentRng) -> Self {
        match rng.gen_range(0..4u8) {
            0 => PatrolPattern::Horizontal,
            1 => PatrolPattern::Circular,
            2 => PatrolPattern::Random,
            _ => PatrolPattern::Stationary,
        }
    }
}

/// Persistent patrol bookkeeping for one enemy.
#[derive(Clone, Debug)]
pub struct Patrol {
    pub pattern: PatrolPattern,
    pub center:  Vec2,
    pub radius:  f32,
    heading:     Vec2,
    paused:      bool,
    /// Countdown to the next heading decision.
    next_change_ms: f32,
    elapsed_ms:     f32,
    jitter_left_ms: f32,
    phase:          f32,
}

impl Patrol {
    pub fn new(pattern: PatrolPattern, center: Vec2, radius: f32, rng: &mut AgentRng) -> Self {
        let mut patrol = Self {
            pattern,
            center,
            radius,
            heading: Vec2::ZERO,
            paused: false,
            next_change_ms: 0.0,
            elapsed_ms: 0.0,
            jitter_left_ms: 0.0,
            phase: 0.0,
        };
        patrol.restart(rng);
        patrol
    }

    /// Fresh heading and window; the orbit phase and centre are kept.
    pub fn restart(&mut self, rng: &mut AgentRng) {
        self.paused = false;
        self.elapsed_ms = 0.0;
        self.jitter_left_ms = 0.0;
        match self.pattern {
            PatrolPattern::Horizontal => {
                let dir = if rng.chance(0.5) { 1.0 } else { -1.0 };
                self.heading = Vec2::new(dir, 0.0);
                self.next_change_ms = window(rng, FLIP_WINDOW_MS);
            }
            PatrolPattern::Random => {
                self.heading = Vec2::from_angle(rng.angle());
                self.next_change_ms = window(rng, HEADING_WINDOW_MS);
            }
            PatrolPattern::Stationary => {
                self.heading = Vec2::ZERO;
                self.next_change_ms = JITTER_INTERVAL_MS;
            }
            PatrolPattern::Circular => {}
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Velocity for this tick.
    pub fn velocity(&mut self, position: Vec2, speed: f32, delta_ms: f32, rng: &mut AgentRng) -> Vec2 {
        self.elapsed_ms += delta_ms;
        self.next_change_ms -= delta_ms;
        let due = self.next_change_ms <= 0.0;

        match self.pattern {
            PatrolPattern::Horizontal => {
                if due {
                    if rng.chance(HORIZONTAL_PAUSE_CHANCE) {
                        self.paused = true;
                    } else {
                        self.paused = false;
                        self.heading.x = -self.heading.x;
                    }
                    self.next_change_ms = window(rng, FLIP_WINDOW_MS);
                }
                if self.paused {
                    return Vec2::ZERO;
                }
                let wobble = (self.elapsed_ms / 1000.0 * TAU * WOBBLE_HZ).sin() * WOBBLE_AMPLITUDE;
                Vec2::new(self.heading.x, wobble) * speed
            }
            PatrolPattern::Circular => {
                let radius = self.radius.max(1.0);
                self.phase = (self.phase + speed / radius * delta_ms / 1000.0) % TAU;
                let point = self.center + Vec2::from_angle(self.phase) * radius;
                position.towards(point, speed)
            }
            PatrolPattern::Random => {
                if due {
                    if rng.chance(RANDOM_PAUSE_CHANCE) {
                        self.paused = true;
                    } else {
                        self.paused = false;
                        self.heading = Vec2::from_angle(rng.angle());
                    }
                    self.next_change_ms = window(rng, HEADING_WINDOW_MS);
                }
                if self.paused { Vec2::ZERO } else { self.heading * speed }
            }
            PatrolPattern::Stationary => {
                if position.distance(self.center) > self.radius {
                    return position.towards(self.center, speed);
                }
                if due {
                    self.heading = Vec2::from_angle(rng.angle());
                    self.jitter_left_ms = JITTER_DURATION_MS;
                    self.next_change_ms = JITTER_INTERVAL_MS;
                }
                if self.jitter_left_ms > 0.0 {
                    self.jitter_left_ms -= delta_ms;
                    self.heading * (speed * JITTER_SPEED_FACTOR)
                } else {
                    Vec2::ZERO
                }
            }
        }
    }
}

fn window(rng: &mut AgentRng, (lo, hi): (u64, u64)) -> f32 {
    rng.millis_between(lo, hi).as_f32()
}
