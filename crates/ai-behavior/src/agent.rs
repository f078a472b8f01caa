//! The `Agent` trait: what the scene, the save layer and trace output may
//! ask of any agent.

use ai_agent::{AgentSnapshot, DamageOutcome, EntityType, GameEvent};
use ai_core::{AgentId, Facing, Vec2};

use crate::{BehaviorResult, TickContext};

/// Common surface of `Enemy`, `Player` and `Npc`.
pub trait Agent {
    fn id(&self) -> AgentId;

    fn entity_type(&self) -> EntityType;

    /// snake_case name of the current state (`"patrolling"`, `"idle"`, …).
    fn state_name(&self) -> &'static str;

    fn position(&self) -> Vec2;

    fn facing(&self) -> Facing;

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    fn is_dead(&self) -> bool {
        self.health() == 0
    }

    /// One tick: scheduled tasks, one FSM step, movement, animation.
    ///
    /// Only the fatal state-machine errors are returned.
    fn update(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()>;

    fn take_damage(&mut self, amount: u32) -> DamageOutcome;

    /// Restore hit points, timers and flags and return to the initial state
    /// without recreating the agent.
    fn reset(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()>;

    /// Transition by name.  Returns `false` instead of failing when the name
    /// is unknown or the machine refuses.
    fn safe_transition_to_state(&mut self, name: &str, ctx: &mut TickContext<'_>) -> bool;

    fn snapshot(&self) -> AgentSnapshot;

    fn restore(&mut self, snapshot: &AgentSnapshot);

    /// Take the events emitted since the last drain.
    fn drain_events(&mut self) -> Vec<GameEvent>;
}
