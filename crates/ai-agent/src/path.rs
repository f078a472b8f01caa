//! Waypoint consumption.
//!
//! A path is consumed front to back; `index` only ever moves forward and the
//! path is exhausted once `index >= path.len()`.
//!
//! A detour path holds only the detour point, so the follower also remembers
//! the goal the path was planned for.  Staleness is measured against that goal,
//! which is the final waypoint for a direct path.

use ai_core::Vec2;

use crate::Body;

/// Current path plus the index of the waypoint being walked to.
#[derive(Clone, Debug)]
pub struct PathFollower {
    path:  Vec<Vec2>,
    index: usize,
    goal:  Option<Vec2>,
    /// Distance at which a waypoint counts as reached.
    reach: f32,
}

impl PathFollower {
    pub fn new(reach: f32) -> Self {
        Self { path: Vec::new(), index: 0, goal: None, reach }
    }

    /// Replace the path and start from its first waypoint.  The goal is the
    /// final waypoint.
    pub fn set_path(&mut self, path: Vec<Vec2>) {
        self.goal = path.last().copied();
        self.path = path;
        self.index = 0;
    }

    /// Replace the path with one planned towards `goal`.
    pub fn set_route(&mut self, path: Vec<Vec2>, goal: Vec2) {
        self.path = path;
        self.index = 0;
        self.goal = Some(goal);
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.index = 0;
        self.goal = None;
    }

    #[inline]
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn reach(&self) -> f32 {
        self.reach
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.path.len()
    }

    #[inline]
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path.get(self.index).copied()
    }

    #[inline]
    pub fn final_waypoint(&self) -> Option<Vec2> {
        self.path.last().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    /// `true` when there is no path or `target` has drifted more than
    /// `threshold` from the point the path leads to.
    pub fn is_stale(&self, target: Vec2, threshold: f32) -> bool {
        self.goal.is_none_or(|end| end.distance(target) > threshold)
    }

    /// Steer `body` along the path.
    ///
    /// Returns `false` without touching the velocity when there is no path or
    /// it is exhausted.  When the current waypoint is within reach the index
    /// advances and the return value says whether waypoints remain; otherwise
    /// the velocity is pointed at the waypoint and `true` is returned.
    pub fn move_to_waypoint(&mut self, body: &mut Body, speed: f32) -> bool {
        let Some(waypoint) = self.current_waypoint() else {
            return false;
        };
        if body.distance_to(waypoint) <= self.reach {
            self.index += 1;
            return !self.is_exhausted();
        }
        body.head_towards(waypoint, speed);
        true
    }
}
