//! Proximity tests deciding whether an agent notices a target.
//!
//! Two shapes coexist on purpose: the square test (`|dx|` and `|dy|` both
//! within range) is what patrol and alert detection use, while attack reach
//! uses a true circle.  Behaviours pick one explicitly.

use ai_core::Vec2;

use crate::{SpatialError, SpatialResult};

/// Axis-aligned square region test, inclusive on the boundary.
#[inline]
pub fn is_within_square_range(observer: Vec2, target: Vec2, range: f32) -> bool {
    target.within_square(observer, range)
}

/// Euclidean radius test, inclusive on the boundary.
#[inline]
pub fn is_within_radius(observer: Vec2, target: Vec2, radius: f32) -> bool {
    observer.distance(target) <= radius
}

/// Defaults for [`Perception`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    /// Used whenever an observer's own detection distance is unset (≤ 0).
    pub default_detection_distance: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self { default_detection_distance: 150.0 }
    }
}

/// Stateless "listen" queries.
#[derive(Copy, Clone, Debug, Default)]
pub struct Perception {
    pub config: PerceptionConfig,
}

impl Perception {
    pub fn new(config: PerceptionConfig) -> Self {
        Self { config }
    }

    /// `detection_distance` if set, else the configured default.
    #[inline]
    pub fn effective_distance(&self, detection_distance: f32) -> f32 {
        if detection_distance > 0.0 && detection_distance.is_finite() {
            detection_distance
        } else {
            self.config.default_detection_distance
        }
    }

    /// Square-region listen.  A missing target is never perceived.
    pub fn listen(
        &self,
        observer:           Vec2,
        detection_distance: f32,
        target:             Option<Vec2>,
    ) -> SpatialResult<bool> {
        let Some(target) = target else { return Ok(false) };
        check_finite(observer, target)?;
        Ok(is_within_square_range(observer, target, self.effective_distance(detection_distance)))
    }

    /// Circular listen with `radius` taken as given; a radius of zero only
    /// reaches a target at the observer's own position.  A missing target is
    /// never perceived.
    pub fn listen_radius(
        &self,
        observer: Vec2,
        radius:   f32,
        target:   Option<Vec2>,
    ) -> SpatialResult<bool> {
        let Some(target) = target else { return Ok(false) };
        check_finite(observer, target)?;
        Ok(is_within_radius(observer, target, radius))
    }
}

fn check_finite(observer: Vec2, target: Vec2) -> SpatialResult<()> {
    if observer.is_finite() && target.is_finite() {
        Ok(())
    } else {
        Err(SpatialError::NonFinite)
    }
}
