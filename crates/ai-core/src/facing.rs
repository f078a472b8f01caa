//! Four-way facing derived from velocity.

use crate::Vec2;

/// Direction an agent's sprite faces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing implied by `velocity`.  The dominant axis wins; ties go to the
    /// horizontal axis.  A zero velocity keeps `previous`.
    pub fn from_velocity(velocity: Vec2, previous: Facing) -> Facing {
        if velocity.is_zero() {
            return previous;
        }
        if velocity.x.abs() >= velocity.y.abs() {
            if velocity.x < 0.0 { Facing::Left } else { Facing::Right }
        } else if velocity.y < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }

    /// Suffix used in animation names (`walk_left`, `idle_up`, …).
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Up    => "up",
            Facing::Down  => "down",
            Facing::Left  => "left",
            Facing::Right => "right",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
