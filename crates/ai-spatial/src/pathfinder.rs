//! Pathfinding trait and the default single-detour pathfinder.
//!
//! # Pluggability
//!
//! Agents query paths through the [`Pathfinder`] trait, so a scene can swap
//! in a different algorithm without touching behaviour code.
//!
//! # Limits of `DetourPathfinder`
//!
//! `DetourPathfinder` is a local heuristic for sparse fields of roughly
//! circular, convex obstacles.  It routes around at most **one** obstacle
//! per query and returns at most one waypoint; the agent re-queries once
//! that waypoint is reached or the path goes stale.  Dense layouts or
//! concave walls need a graph search, which this type deliberately is not.

use tracing::{trace, warn};

use ai_core::{ObstacleId, Vec2};

use crate::{ObstacleSet, SpatialError, SpatialResult};

// ── PathfinderConfig ──────────────────────────────────────────────────────────

/// Tuning for [`DetourPathfinder`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Sample spacing for line-of-travel tests.
    pub step_size: f32,
    /// Clearance added to an obstacle's radius when placing a detour point.
    pub obstacle_padding: f32,
    /// Targets farther than this get a direct path without any search.
    pub max_search_distance: f32,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            step_size:           20.0,
            obstacle_padding:    25.0,
            max_search_distance: 600.0,
        }
    }
}

impl PathfinderConfig {
    pub fn validate(&self) -> SpatialResult<()> {
        if !(self.step_size > 0.0 && self.step_size.is_finite()) {
            return Err(SpatialError::Config(format!("step_size must be > 0, got {}", self.step_size)));
        }
        if !(self.obstacle_padding >= 0.0 && self.obstacle_padding.is_finite()) {
            return Err(SpatialError::Config(format!(
                "obstacle_padding must be >= 0, got {}",
                self.obstacle_padding
            )));
        }
        if self.max_search_distance.is_nan() || self.max_search_distance < 0.0 {
            return Err(SpatialError::Config(format!(
                "max_search_distance must be >= 0, got {}",
                self.max_search_distance
            )));
        }
        Ok(())
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path query shared read-only by every agent during a tick.
pub trait Pathfinder {
    /// Waypoints from `start` to `target`, consumed front to back.
    ///
    /// An empty path means "no usable answer" and callers fall back to
    /// moving straight at the target.
    fn find_path(&self, start: Vec2, target: Vec2) -> Vec<Vec2>;

    /// `true` if travelling the straight segment `a → b` touches no obstacle.
    fn is_line_clear(&self, a: Vec2, b: Vec2) -> bool;
}

// ── DetourPathfinder ──────────────────────────────────────────────────────────

/// Direct path when the line is clear, otherwise one detour point beside the
/// obstacle closest to the line.
pub struct DetourPathfinder {
    config:    PathfinderConfig,
    obstacles: ObstacleSet,
}

impl DetourPathfinder {
    pub fn new(config: PathfinderConfig, obstacles: ObstacleSet) -> SpatialResult<Self> {
        config.validate()?;
        Ok(Self { config, obstacles })
    }

    /// A pathfinder with no obstacles; every query returns a direct path.
    pub fn open_field(config: PathfinderConfig) -> SpatialResult<Self> {
        Self::new(config, ObstacleSet::empty())
    }

    #[inline]
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    #[inline]
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Swap in a new obstacle snapshot.
    pub fn set_obstacles(&mut self, obstacles: ObstacleSet) {
        self.obstacles = obstacles;
    }

    /// The obstacle whose circle is closest to the segment among those the
    /// segment actually crosses (distance ≤ radius).  Ties go to the lower id.
    pub fn closest_blocking(&self, a: Vec2, b: Vec2) -> Option<ObstacleId> {
        let mut best: Option<(ObstacleId, f32)> = None;
        for id in self.obstacles.near_segment(a, b) {
            let Some(obstacle) = self.obstacles.get(id) else { continue };
            let d = obstacle.distance_to_segment(a, b);
            if d > obstacle.radius {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Both candidate detour points for going around `id` on the way
    /// `start → target`: left of the travel direction first, then right.
    pub fn detour_candidates(&self, id: ObstacleId, start: Vec2, target: Vec2) -> Option<[Vec2; 2]> {
        let obstacle = self.obstacles.get(id)?;
        let dir = (target - start).normalized();
        if dir.is_zero() {
            return None;
        }
        let offset = dir.perp() * (obstacle.radius + self.config.obstacle_padding);
        Some([obstacle.position + offset, obstacle.position - offset])
    }
}

impl Pathfinder for DetourPathfinder {
    fn find_path(&self, start: Vec2, target: Vec2) -> Vec<Vec2> {
        if !start.is_finite() || !target.is_finite() {
            warn!(%start, %target, "non-finite path query ignored");
            return Vec::new();
        }

        let distance = start.distance(target);
        if distance > self.config.max_search_distance {
            trace!(%start, %target, distance, "target beyond search distance; direct path");
            return vec![target];
        }
        if self.is_line_clear(start, target) {
            return vec![target];
        }

        let Some(blocker) = self.closest_blocking(start, target) else {
            return vec![target];
        };
        let Some(candidates) = self.detour_candidates(blocker, start, target) else {
            return vec![target];
        };

        let mut best: Option<Vec2> = None;
        for candidate in candidates {
            if !(self.is_line_clear(start, candidate) && self.is_line_clear(candidate, target)) {
                continue;
            }
            let closer = best.is_none_or(|b| start.distance(candidate) < start.distance(b));
            if closer {
                best = Some(candidate);
            }
        }

        match best {
            Some(detour) => {
                trace!(%start, %target, %detour, obstacle = %blocker, "detour chosen");
                vec![detour]
            }
            None => {
                trace!(%start, %target, obstacle = %blocker, "no clear detour; direct path");
                vec![target]
            }
        }
    }

    fn is_line_clear(&self, a: Vec2, b: Vec2) -> bool {
        let nearby = self.obstacles.near_segment(a, b);
        if nearby.is_empty() {
            return true;
        }

        let length = a.distance(b);
        let steps = ((length / self.config.step_size).ceil() as usize).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = a + (b - a) * t;
            let hit = nearby
                .iter()
                .filter_map(|&id| self.obstacles.get(id))
                .any(|o| o.contains(p));
            if hit {
                return false;
            }
        }
        true
    }
}
