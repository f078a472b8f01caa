//! Night-time stat multipliers.
//!
//! Effective values are always derived from the base value, so toggling night
//! on twice leaves speed and attack unchanged after the first toggle.

/// Speed and attack multipliers applied while the night flag is set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NightStats {
    applied:           bool,
    speed_multiplier:  f32,
    attack_multiplier: f32,
}

impl NightStats {
    pub fn new(speed_multiplier: f32, attack_multiplier: f32) -> Self {
        Self { applied: false, speed_multiplier, attack_multiplier }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Set the night flag.  Returns `true` only when the flag changed.
    pub fn set_night(&mut self, is_night: bool) -> bool {
        let changed = self.applied != is_night;
        self.applied = is_night;
        changed
    }

    #[inline]
    pub fn speed(&self, base: f32) -> f32 {
        if self.applied { base * self.speed_multiplier } else { base }
    }

    /// Attack power, rounded to whole hit points.
    #[inline]
    pub fn attack(&self, base: u32) -> u32 {
        if self.applied {
            (base as f32 * self.attack_multiplier).round() as u32
        } else {
            base
        }
    }
}

impl Default for NightStats {
    fn default() -> Self {
        Self::new(1.25, 1.5)
    }
}
