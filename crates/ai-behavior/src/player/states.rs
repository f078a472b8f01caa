//! Player states.

use ai_agent::AttackKind;
use ai_fsm::{FsmResult, State, StateMachine, Transitions};

use super::{PlayerBody, PlayerState};
use crate::{InputKeys, TickContext};

type PlayerTransitions = Transitions<PlayerState, ()>;

pub(super) fn build_machine() -> FsmResult<StateMachine<PlayerBody>> {
    StateMachine::builder(PlayerState::Idle)
        .state(PlayerState::Idle, Idle)
        .state(PlayerState::Walking, Walking)
        .state(PlayerState::Sprinting, Sprinting)
        .state(PlayerState::AttackingLight, Swing { kind: AttackKind::Light })
        .state(PlayerState::AttackingHeavy, Swing { kind: AttackKind::Heavy })
        .label("player")
        .build()
}

/// Attack keys take priority over movement in every mobile state.
fn try_attack(p: &PlayerBody, ctx: &TickContext<'_>, fsm: &mut PlayerTransitions) -> bool {
    match p.requested_attack(ctx) {
        Some(attack) => {
            fsm.transition(attack);
            true
        }
        None => false,
    }
}

// ── Idle ──────────────────────────────────────────────────────────────────────

struct Idle;

impl State<PlayerBody> for Idle {
    fn enter(&self, p: &mut PlayerBody, _ctx: &mut TickContext<'_>, _fsm: &mut PlayerTransitions, _entry: ()) {
        p.begin(PlayerState::Idle);
        p.body.stop();
    }

    fn execute(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, fsm: &mut PlayerTransitions) {
        p.body.stop();
        if try_attack(p, ctx, fsm) {
            return;
        }
        if !ctx.input.axis().is_zero() {
            let next = if p.sprint_ready(ctx) { PlayerState::Sprinting } else { PlayerState::Walking };
            fsm.transition(next);
        }
    }
}

// ── Walking ───────────────────────────────────────────────────────────────────

struct Walking;

impl State<PlayerBody> for Walking {
    fn enter(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, _fsm: &mut PlayerTransitions, _entry: ()) {
        p.begin(PlayerState::Walking);
        p.body.velocity = ctx.input.axis() * p.move_speed(1.0);
    }

    fn execute(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, fsm: &mut PlayerTransitions) {
        if try_attack(p, ctx, fsm) {
            return;
        }
        let axis = ctx.input.axis();
        if axis.is_zero() {
            p.body.stop();
            fsm.transition(PlayerState::Idle);
            return;
        }
        if p.sprint_ready(ctx) {
            fsm.transition(PlayerState::Sprinting);
            return;
        }
        p.body.velocity = axis * p.move_speed(1.0);
    }
}

// ── Sprinting ─────────────────────────────────────────────────────────────────

struct Sprinting;

impl State<PlayerBody> for Sprinting {
    fn enter(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, _fsm: &mut PlayerTransitions, _entry: ()) {
        p.begin(PlayerState::Sprinting);
        p.sprint_left_ms = p.tuning.sprint_duration_ms as f32;
        p.sprint_ready_at = ctx.now + p.tuning.sprint_cooldown_ms;
        p.body.velocity = ctx.input.axis() * p.move_speed(p.tuning.sprint_multiplier);
    }

    fn execute(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, fsm: &mut PlayerTransitions) {
        if try_attack(p, ctx, fsm) {
            return;
        }
        let axis = ctx.input.axis();
        if axis.is_zero() {
            p.body.stop();
            fsm.transition(PlayerState::Idle);
            return;
        }
        p.sprint_left_ms -= ctx.delta_ms;
        if !ctx.input.pressed(InputKeys::SPRINT) || p.sprint_left_ms <= 0.0 {
            p.body.velocity = axis * p.move_speed(1.0);
            fsm.transition(PlayerState::Walking);
            return;
        }
        p.body.velocity = axis * p.move_speed(p.tuning.sprint_multiplier);
    }
}

// ── AttackingLight / AttackingHeavy ───────────────────────────────────────────

/// One swing.  Returns to idle once the attack animation has played out.
struct Swing {
    kind: AttackKind,
}

impl Swing {
    fn key(&self) -> PlayerState {
        match self.kind {
            AttackKind::Light => PlayerState::AttackingLight,
            AttackKind::Heavy => PlayerState::AttackingHeavy,
        }
    }

    fn animation_ms(&self, p: &PlayerBody) -> f32 {
        match self.kind {
            AttackKind::Light => p.tuning.light_anim_ms as f32,
            AttackKind::Heavy => p.tuning.heavy_anim_ms as f32,
        }
    }
}

impl State<PlayerBody> for Swing {
    fn enter(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, _fsm: &mut PlayerTransitions, _entry: ()) {
        p.begin(self.key());
        p.body.stop();
        p.attack_timer = 0.0;
        p.swing(self.kind, ctx.now);
    }

    fn execute(&self, p: &mut PlayerBody, ctx: &mut TickContext<'_>, fsm: &mut PlayerTransitions) {
        p.body.stop();
        p.attack_timer += ctx.delta_ms;
        if p.attack_timer >= self.animation_ms(p) {
            fsm.transition(PlayerState::Idle);
        }
    }
}
