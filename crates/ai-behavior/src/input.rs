//! Player input as an explicit per-tick snapshot.

use std::f32::consts::FRAC_1_SQRT_2;

use bitflags::bitflags;

use ai_core::Vec2;

bitflags! {
    /// Keys held during one tick.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InputKeys: u16 {
        const UP           = 1 << 0;
        const DOWN         = 1 << 1;
        const LEFT         = 1 << 2;
        const RIGHT        = 1 << 3;
        const SPRINT       = 1 << 4;
        const LIGHT_ATTACK = 1 << 5;
        const HEAVY_ATTACK = 1 << 6;
        const INTERACT     = 1 << 7;
    }
}

/// Input state handed to the player's and NPCs' state callbacks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub keys: InputKeys,
}

impl InputSnapshot {
    pub fn new(keys: InputKeys) -> Self {
        Self { keys }
    }

    #[inline]
    pub fn pressed(&self, keys: InputKeys) -> bool {
        self.keys.contains(keys)
    }

    /// Movement direction from the arrow keys.  Opposite keys cancel; a
    /// diagonal is scaled by `1/√2` so it is no faster than a straight line.
    pub fn axis(&self) -> Vec2 {
        let axis = |neg: InputKeys, pos: InputKeys| -> f32 {
            f32::from(u8::from(self.pressed(pos))) - f32::from(u8::from(self.pressed(neg)))
        };
        let x = axis(InputKeys::LEFT, InputKeys::RIGHT);
        let y = axis(InputKeys::UP, InputKeys::DOWN);
        if x != 0.0 && y != 0.0 {
            Vec2::new(x * FRAC_1_SQRT_2, y * FRAC_1_SQRT_2)
        } else {
            Vec2::new(x, y)
        }
    }
}
