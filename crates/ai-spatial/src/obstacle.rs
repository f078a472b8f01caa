//! Circular obstacles and their spatial index.
//!
//! An `ObstacleSet` is an immutable snapshot: path queries read it, nobody
//! mutates it.  When the level's obstacle set changes the caller builds a new
//! set and hands it to the pathfinder.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) stores each obstacle's bounding square.  Segment
//! tests first collect the obstacles whose square intersects the segment's
//! bounding box, so a line test touches only nearby circles.

use rstar::{RTree, RTreeObject, AABB};

use ai_core::{ObstacleId, Vec2};

use crate::{SpatialError, SpatialResult};

/// A collision circle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Vec2,
    pub radius:   f32,
}

impl Obstacle {
    #[inline]
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { position: Vec2::new(x, y), radius }
    }

    /// `true` if `p` is on or inside the circle.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.distance(self.position) <= self.radius
    }

    /// Perpendicular distance from the centre to the segment `a → b`,
    /// clamped to the segment.
    #[inline]
    pub fn distance_to_segment(&self, a: Vec2, b: Vec2) -> f32 {
        self.position.distance_to_segment(a, b)
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    id:  ObstacleId,
    min: [f32; 2],
    max: [f32; 2],
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── ObstacleSet ───────────────────────────────────────────────────────────────

/// Read-only list of obstacles plus an R-tree over their bounding squares.
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
    index:     RTree<ObstacleEntry>,
}

impl ObstacleSet {
    /// Validate and index `obstacles`.  Ids are positions in the input list.
    pub fn new(obstacles: Vec<Obstacle>) -> SpatialResult<Self> {
        let mut entries = Vec::with_capacity(obstacles.len());
        for (i, o) in obstacles.iter().enumerate() {
            let id = ObstacleId(i as u32);
            if !o.position.is_finite() || !o.radius.is_finite() {
                return Err(SpatialError::InvalidObstacle { id, reason: "non-finite geometry" });
            }
            if o.radius < 0.0 {
                return Err(SpatialError::InvalidObstacle { id, reason: "negative radius" });
            }
            entries.push(ObstacleEntry {
                id,
                min: [o.position.x - o.radius, o.position.y - o.radius],
                max: [o.position.x + o.radius, o.position.y + o.radius],
            });
        }
        Ok(Self {
            obstacles,
            index: RTree::bulk_load(entries),
        })
    }

    pub fn empty() -> Self {
        Self { obstacles: Vec::new(), index: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| (ObstacleId(i as u32), o))
    }

    /// Obstacles whose bounding square touches the bounding box of `a → b`,
    /// in ascending id order so callers break ties deterministically.
    pub fn near_segment(&self, a: Vec2, b: Vec2) -> Vec<ObstacleId> {
        let query = AABB::from_corners([a.x.min(b.x), a.y.min(b.y)], [a.x.max(b.x), a.y.max(b.y)]);
        let mut ids: Vec<ObstacleId> = self
            .index
            .locate_in_envelope_intersecting(&query)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::empty()
    }
}
