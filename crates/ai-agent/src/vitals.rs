//! Hit points.

/// What a call to [`Vitals::take_damage`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The agent was already dead; nothing changed.
    Ignored,
    /// Hit points dropped but stay above zero.
    Hurt,
    /// This hit took the agent to zero.  Reported once per death.
    Killed,
}

/// `hit_points ∈ [0, max_hit_points]`; dead ⇔ `hit_points == 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Vitals {
    hit_points:     u32,
    max_hit_points: u32,
}

impl Vitals {
    /// Full health.  A zero maximum is raised to 1 so a fresh agent is alive.
    pub fn new(max_hit_points: u32) -> Self {
        let max_hit_points = max_hit_points.max(1);
        Self { hit_points: max_hit_points, max_hit_points }
    }

    #[inline]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    #[inline]
    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hit_points == 0
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.is_dead() { DamageOutcome::Killed } else { DamageOutcome::Hurt }
    }

    /// Heal by `amount`, capped at the maximum.  Dead agents are not healed;
    /// use [`restore`](Self::restore).
    pub fn heal(&mut self, amount: u32) {
        if !self.is_dead() {
            self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hit_points);
        }
    }

    /// Back to full health.
    pub fn restore(&mut self) {
        self.hit_points = self.max_hit_points;
    }

    /// Overwrite both values (save restore); clamps `hit_points` to the new
    /// maximum.
    pub fn set(&mut self, hit_points: u32, max_hit_points: u32) {
        self.max_hit_points = max_hit_points.max(1);
        self.hit_points = hit_points.min(self.max_hit_points);
    }
}
