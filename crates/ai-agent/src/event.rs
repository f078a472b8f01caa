//! Fire-and-forget cues an agent emits during its update.
//!
//! Agents never touch each other directly.  Attacks, deaths and sound cues go
//! into the agent's own [`Outbox`]; the scene drains every outbox after all
//! agents have updated and resolves damage from there.

use ai_core::{AgentId, Vec2};

/// Which player attack produced a hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Light,
    Heavy,
}

/// Audio cue names.  Playback is external.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    Alert,
    Attack,
    Hit,
    Death,
    Splash,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// An enemy struck at the player.
    EnemyAttack { from: AgentId, damage: u32, combo: bool },
    /// The player swung; enemies within `reach` of `origin` are hit.
    PlayerAttack { from: AgentId, kind: AttackKind, origin: Vec2, reach: f32, damage: u32 },
    Sound { source: AgentId, cue: SoundCue },
    Hurt { agent: AgentId, damage: u32 },
    Died { agent: AgentId },
    Revived { agent: AgentId },
    SwimEnter { agent: AgentId },
    SwimExit { agent: AgentId },
    /// An NPC started talking to the player.
    Dialogue { npc: AgentId },
}

/// Events produced by one agent since the last drain.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    events: Vec<GameEvent>,
}

impl Outbox {
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn sound(&mut self, source: AgentId, cue: SoundCue) {
        self.events.push(GameEvent::Sound { source, cue });
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
