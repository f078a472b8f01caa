//! The nine enemy states.
//!
//! States hold no data; every timer lives on [`EnemyBody`] and is zeroed by
//! the owning state's `enter`.

use ai_agent::{GameEvent, SoundCue};
use ai_core::AgentId;
use ai_fsm::{FsmResult, State, StateMachine, Transitions};

use super::{EnemyBody, EnemyEntry, EnemyState, EnemyTask};
use crate::TickContext;

type EnemyTransitions = Transitions<EnemyState, EnemyEntry>;

pub(super) fn build_machine(id: AgentId) -> FsmResult<StateMachine<EnemyBody>> {
    StateMachine::builder(EnemyState::Patrolling)
        .state(EnemyState::Patrolling, Patrolling)
        .state(EnemyState::Alert, Alert)
        .state(EnemyState::Pursuing, Pursuing)
        .state(EnemyState::Searching, Searching)
        .state(EnemyState::Flanking, Flanking)
        .state(EnemyState::Attacking, Attacking)
        .state(EnemyState::Dead, Dead)
        .state(EnemyState::Fading, Fading)
        .state(EnemyState::Reviving, Reviving)
        .label(format!("enemy#{}", id.0))
        .build()
}

// ── Patrolling ────────────────────────────────────────────────────────────────

struct Patrolling;

impl State<EnemyBody> for Patrolling {
    fn enter(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Patrolling);
        e.body.stop();
        e.path.clear();
        e.patrol.restart(&mut e.rng);
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        if e.perceives(ctx) == Some(true) {
            e.last_known_target = ctx.target;
            fsm.transition(EnemyState::Alert);
            return;
        }
        let speed = e.speed(e.tuning.patrol_speed_factor);
        e.body.velocity = e.patrol.velocity(e.body.position, speed, ctx.delta_ms, &mut e.rng);
    }
}

// ── Alert ─────────────────────────────────────────────────────────────────────

struct Alert;

impl State<EnemyBody> for Alert {
    fn enter(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Alert);
        e.body.stop();
        e.timers.alert = 0.0;
        e.outbox.sound(e.body.id, SoundCue::Alert);
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.body.stop();
        e.timers.alert += ctx.delta_ms;
        match e.perceives(ctx) {
            Some(false) => fsm.transition(EnemyState::Patrolling),
            Some(true) => {
                e.last_known_target = ctx.target;
                if e.timers.alert > e.tuning.alert_ms as f32 {
                    fsm.transition(EnemyState::Pursuing);
                }
            }
            None => {}
        }
    }
}

// ── Pursuing ──────────────────────────────────────────────────────────────────

struct Pursuing;

impl State<EnemyBody> for Pursuing {
    fn enter(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Pursuing);
        e.timers.pursuit = 0.0;
        if ctx.target.is_some() {
            e.last_known_target = ctx.target;
        }
        e.path.clear();
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.timers.pursuit += ctx.delta_ms;
        match e.perceives(ctx) {
            Some(false) => {
                fsm.transition(EnemyState::Searching);
                return;
            }
            Some(true) => e.last_known_target = ctx.target,
            None => {}
        }
        if e.in_attack_range(ctx) == Some(true) {
            e.body.stop();
            fsm.transition(EnemyState::Attacking);
            return;
        }
        if e.timers.pursuit > e.tuning.pursuit_ms as f32 {
            fsm.transition(EnemyState::Flanking);
            return;
        }

        let Some(goal) = ctx.target.or(e.last_known_target) else {
            e.body.stop();
            return;
        };
        let speed = e.speed(1.0);
        e.chase(ctx, goal, speed);
    }
}

// ── Searching ─────────────────────────────────────────────────────────────────

struct Searching;

impl State<EnemyBody> for Searching {
    fn enter(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Searching);
        e.timers.search = 0.0;
        e.path.clear();
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.timers.search += ctx.delta_ms;
        if e.perceives(ctx) == Some(true) {
            fsm.transition(EnemyState::Pursuing);
            return;
        }

        let reach = e.tuning.waypoint_reach;
        let spot = e.last_known_target.filter(|p| e.body.distance_to(*p) > reach);
        let timed_out = e.timers.search > e.tuning.search_ms as f32;
        match spot {
            Some(p) if !timed_out => {
                let speed = e.speed(e.tuning.search_speed_factor);
                e.body.head_towards(p, speed);
            }
            _ => {
                e.body.stop();
                fsm.transition(EnemyState::Patrolling);
            }
        }
    }
}

// ── Flanking ──────────────────────────────────────────────────────────────────

struct Flanking;

impl State<EnemyBody> for Flanking {
    fn enter(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Flanking);
        e.timers.flank = 0.0;
        e.flank_side = if e.rng.chance(0.5) { 1.0 } else { -1.0 };
        e.path.clear();
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.timers.flank += ctx.delta_ms;
        match e.perceives(ctx) {
            Some(false) => {
                fsm.transition(EnemyState::Patrolling);
                return;
            }
            Some(true) => e.last_known_target = ctx.target,
            None => {}
        }
        if e.in_attack_range(ctx) == Some(true) {
            e.body.stop();
            fsm.transition(EnemyState::Attacking);
            return;
        }
        if e.timers.flank > e.tuning.flank_ms as f32 {
            fsm.transition(EnemyState::Pursuing);
            return;
        }

        let Some(target) = ctx.target.or(e.last_known_target) else {
            e.body.stop();
            return;
        };
        // Aim beside the target, perpendicular to the current approach.
        let approach = (target - e.body.position).normalized();
        let flank_point = target + approach.perp() * (e.flank_side * e.tuning.flank_offset);
        let speed = e.speed(e.tuning.flank_speed_factor);
        if e.body.distance_to(flank_point) <= e.tuning.waypoint_reach {
            e.body.head_towards(target, speed);
        } else {
            e.chase(ctx, flank_point, speed);
        }
    }
}

// ── Attacking ─────────────────────────────────────────────────────────────────

struct Attacking;

impl State<EnemyBody> for Attacking {
    fn enter(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, entry: EnemyEntry) {
        e.begin(EnemyState::Attacking);
        e.body.stop();
        e.path.clear();
        e.timers.attack = 0.0;
        if let Some(target) = ctx.target {
            e.face(target);
        }

        match entry {
            EnemyEntry::Normal => {
                if !e.attack_on_cooldown {
                    let cooldown = e.tuning.attack_delay_ms;
                    e.strike(ctx.now, cooldown);
                }
            }
            EnemyEntry::Combo => {
                let cooldown =
                    (e.tuning.attack_delay_ms as f32 * e.tuning.combo_cooldown_factor).round() as u64;
                e.strike(ctx.now, cooldown);
                let delay = e.rng.millis_between(e.tuning.combo_delay_min_ms, e.tuning.combo_delay_max_ms);
                let scope = e.state_scope();
                e.tasks.schedule(ctx.now, delay.0, scope, EnemyTask::ComboHit);
            }
        }
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.timers.attack += ctx.delta_ms;
        if e.perceives(ctx) == Some(false) {
            fsm.transition(EnemyState::Patrolling);
            return;
        }
        if e.in_attack_range(ctx) == Some(false) {
            fsm.transition(EnemyState::Pursuing);
            return;
        }

        e.body.stop();
        if let Some(target) = ctx.target {
            e.face(target);
        }
        // Attacking while on cooldown is a no-op; wait it out.
        if e.attack_on_cooldown || e.timers.attack < e.tuning.combo_gate_ms as f32 {
            return;
        }
        if e.rng.chance(e.tuning.combo_chance) {
            fsm.transition_with(EnemyState::Attacking, EnemyEntry::Combo);
        } else {
            fsm.transition(EnemyState::Pursuing);
        }
    }
}

// ── Dead ──────────────────────────────────────────────────────────────────────

struct Dead;

impl State<EnemyBody> for Dead {
    fn enter(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Dead);
        e.body.stop();
        e.path.clear();
        e.opacity = 1.0;
        let agent = e.body.id;
        e.outbox.push(GameEvent::Died { agent });
        e.outbox.sound(agent, SoundCue::Death);
        let scope = e.state_scope();
        e.tasks.schedule(ctx.now, e.tuning.death_delay_ms, scope, EnemyTask::BeginFade);
    }

    fn execute(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions) {
        e.body.stop();
    }
}

// ── Fading ────────────────────────────────────────────────────────────────────

struct Fading;

impl State<EnemyBody> for Fading {
    fn enter(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Fading);
        e.timers.fade = 0.0;
    }

    fn execute(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, fsm: &mut EnemyTransitions) {
        e.body.stop();
        e.timers.fade += ctx.delta_ms;
        let duration = e.tuning.fade_ms.max(1) as f32;
        e.opacity = (1.0 - e.timers.fade / duration).clamp(0.0, 1.0);
        if e.timers.fade >= duration {
            fsm.transition(EnemyState::Reviving);
        }
    }
}

// ── Reviving ──────────────────────────────────────────────────────────────────

struct Reviving;

impl State<EnemyBody> for Reviving {
    fn enter(&self, e: &mut EnemyBody, ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions, _entry: EnemyEntry) {
        e.begin(EnemyState::Reviving);
        e.revive();
        let scope = e.state_scope();
        e.tasks.schedule(ctx.now, e.tuning.revive_delay_ms, scope, EnemyTask::Revived);
    }

    fn execute(&self, e: &mut EnemyBody, _ctx: &mut TickContext<'_>, _fsm: &mut EnemyTransitions) {
        e.body.stop();
    }
}
