//! Strongly typed identifier wrappers.
//!
//! Ids are `Copy + Ord + Hash` so they work as map keys and in sorted
//! collections.  `AgentId` doubles as the RNG seed mixer, so ids must stay
//! stable for the lifetime of a scene.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Scene-unique id of an enemy, player or NPC.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an obstacle inside an `ObstacleSet`.
    pub struct ObstacleId(u32);
}

typed_id! {
    /// Handle of a scheduled task, unique within one agent's task queue.
    pub struct TaskId(u64);
}
