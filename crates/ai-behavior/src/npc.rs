//! Non-player characters: wander around home, talk when asked.
//!
//! ```text
//! idle         idle window elapsed                 → walking
//! walking      wander point reached                → idle
//! idle/walking player within reach + interact key  → interacting
//! interacting  player walked away                  → idle
//! ```
//!
//! NPCs take no damage.

use std::sync::Arc;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use ai_agent::{
    AgentSnapshot, AnimationLibrary, Animator, Body, DamageOutcome, EntityType, GameEvent, Outbox,
    Vitals,
};
use ai_core::{AgentId, AgentRng, Facing, Vec2};
use ai_fsm::{Actor, FsmResult, State, StateMachine, Transitions};

use crate::{Agent, BehaviorResult, InputKeys, NpcTuning, TickContext};

/// Distance at which a wander point counts as reached.
const ARRIVE_DISTANCE: f32 = 8.0;
/// An interaction ends once the player is this many interact radii away.
const LEAVE_FACTOR: f32 = 1.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum NpcState {
    Idle,
    Walking,
    Interacting,
}

impl NpcState {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ── NpcBody ───────────────────────────────────────────────────────────────────

pub struct NpcBody {
    pub body:     Body,
    pub vitals:   Vitals,
    pub animator: Animator,
    pub outbox:   Outbox,
    pub rng:      AgentRng,
    pub tuning:   Arc<NpcTuning>,
    pub home:     Vec2,

    pub state:         NpcState,
    pub idle_timer:    f32,
    pub idle_for_ms:   f32,
    pub wander_target: Option<Vec2>,
}

impl Actor for NpcBody {
    type Key = NpcState;
    type Entry = ();
    type Ctx<'a> = TickContext<'a>;
}

impl NpcBody {
    fn player_within(&self, ctx: &TickContext<'_>, radius: f32) -> bool {
        ctx.perception
            .listen_radius(self.body.position, radius, ctx.target)
            .unwrap_or(false)
    }

    fn wants_to_talk(&self, ctx: &TickContext<'_>) -> bool {
        ctx.input.pressed(InputKeys::INTERACT) && self.player_within(ctx, self.tuning.interact_radius)
    }

    fn animate(&mut self) {
        let action = match self.state {
            NpcState::Interacting => "talk",
            _ if self.body.velocity.is_zero() => "idle",
            _ => "walk",
        };
        self.animator.play_facing(self.body.id, action, self.body.facing);
    }
}

type NpcTransitions = Transitions<NpcState, ()>;

fn build_machine(id: AgentId) -> FsmResult<StateMachine<NpcBody>> {
    StateMachine::builder(NpcState::Idle)
        .state(NpcState::Idle, Idle)
        .state(NpcState::Walking, Walking)
        .state(NpcState::Interacting, Interacting)
        .label(format!("npc#{}", id.0))
        .build()
}

// ── States ────────────────────────────────────────────────────────────────────

struct Idle;

impl State<NpcBody> for Idle {
    fn enter(&self, n: &mut NpcBody, _ctx: &mut TickContext<'_>, _fsm: &mut NpcTransitions, _entry: ()) {
        n.state = NpcState::Idle;
        n.body.stop();
        n.idle_timer = 0.0;
        n.idle_for_ms = n.rng.millis_between(n.tuning.idle_min_ms, n.tuning.idle_max_ms).as_f32();
    }

    fn execute(&self, n: &mut NpcBody, ctx: &mut TickContext<'_>, fsm: &mut NpcTransitions) {
        n.body.stop();
        if n.wants_to_talk(ctx) {
            fsm.transition(NpcState::Interacting);
            return;
        }
        n.idle_timer += ctx.delta_ms;
        if n.idle_timer >= n.idle_for_ms {
            fsm.transition(NpcState::Walking);
        }
    }
}

struct Walking;

impl State<NpcBody> for Walking {
    fn enter(&self, n: &mut NpcBody, _ctx: &mut TickContext<'_>, _fsm: &mut NpcTransitions, _entry: ()) {
        n.state = NpcState::Walking;
        let distance = n.rng.unit() * n.tuning.wander_radius;
        let heading = Vec2::from_angle(n.rng.angle());
        n.wander_target = Some(n.home + heading * distance);
    }

    fn execute(&self, n: &mut NpcBody, ctx: &mut TickContext<'_>, fsm: &mut NpcTransitions) {
        if n.wants_to_talk(ctx) {
            n.body.stop();
            fsm.transition(NpcState::Interacting);
            return;
        }
        match n.wander_target {
            Some(goal) if n.body.distance_to(goal) > ARRIVE_DISTANCE => {
                let speed = n.body.base_speed;
                n.body.head_towards(goal, speed);
            }
            _ => {
                n.body.stop();
                n.wander_target = None;
                fsm.transition(NpcState::Idle);
            }
        }
    }
}

struct Interacting;

impl State<NpcBody> for Interacting {
    fn enter(&self, n: &mut NpcBody, ctx: &mut TickContext<'_>, _fsm: &mut NpcTransitions, _entry: ()) {
        n.state = NpcState::Interacting;
        n.body.stop();
        if let Some(player) = ctx.target {
            n.body.facing = Facing::from_velocity(player - n.body.position, n.body.facing);
        }
        n.outbox.push(GameEvent::Dialogue { npc: n.body.id });
    }

    fn execute(&self, n: &mut NpcBody, ctx: &mut TickContext<'_>, fsm: &mut NpcTransitions) {
        n.body.stop();
        if !n.player_within(ctx, n.tuning.interact_radius * LEAVE_FACTOR) {
            fsm.transition(NpcState::Idle);
        }
    }
}

// ── Npc ───────────────────────────────────────────────────────────────────────

pub struct Npc {
    body: NpcBody,
    fsm:  StateMachine<NpcBody>,
}

impl Npc {
    /// Spawn at `home`.
    pub fn new(
        id:         AgentId,
        home:       Vec2,
        tuning:     Arc<NpcTuning>,
        rng:        AgentRng,
        animations: Arc<AnimationLibrary>,
    ) -> BehaviorResult<Self> {
        tuning.validate()?;
        let body = NpcBody {
            body:          Body::new(id, home, tuning.base_speed),
            vitals:        Vitals::new(tuning.max_hit_points),
            animator:      Animator::new(animations),
            outbox:        Outbox::default(),
            rng,
            home,
            state:         NpcState::Idle,
            idle_timer:    0.0,
            idle_for_ms:   0.0,
            wander_target: None,
            tuning,
        };
        let fsm = build_machine(id)?;
        Ok(Self { body, fsm })
    }

    #[inline]
    pub fn state(&self) -> NpcState {
        self.fsm.current().unwrap_or(self.fsm.initial())
    }

    #[inline]
    pub fn body(&self) -> &NpcBody {
        &self.body
    }
}

impl Agent for Npc {
    fn id(&self) -> AgentId {
        self.body.body.id
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Npc
    }

    fn state_name(&self) -> &'static str {
        self.state().as_str()
    }

    fn position(&self) -> Vec2 {
        self.body.body.position
    }

    fn facing(&self) -> Facing {
        self.body.body.facing
    }

    fn health(&self) -> u32 {
        self.body.vitals.hit_points()
    }

    fn max_health(&self) -> u32 {
        self.body.vitals.max_hit_points()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()> {
        self.fsm.step(&mut self.body, ctx)?;
        self.body.body.integrate(ctx.delta_ms);
        self.body.animate();
        Ok(())
    }

    fn take_damage(&mut self, _amount: u32) -> DamageOutcome {
        DamageOutcome::Ignored
    }

    fn reset(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()> {
        self.body.vitals.restore();
        self.body.wander_target = None;
        self.body.body.position = self.body.home;
        self.fsm.transition(NpcState::Idle, &mut self.body, ctx)?;
        Ok(())
    }

    fn safe_transition_to_state(&mut self, name: &str, ctx: &mut TickContext<'_>) -> bool {
        let Ok(state) = name.parse::<NpcState>() else {
            debug!(agent = %self.body.body.id, name, "unknown npc state name");
            return false;
        };
        self.fsm.transition(state, &mut self.body, ctx).is_ok()
    }

    fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            x:                   self.body.body.position.x,
            y:                   self.body.body.position.y,
            hit_points:          self.body.vitals.hit_points(),
            max_hit_points:      self.body.vitals.max_hit_points(),
            entity_type:         EntityType::Npc,
            is_dead:             self.body.vitals.is_dead(),
            night_stats_applied: false,
        }
    }

    fn restore(&mut self, snapshot: &AgentSnapshot) {
        self.body.body.position = Vec2::new(snapshot.x, snapshot.y);
        self.body.vitals.set(snapshot.hit_points, snapshot.max_hit_points);
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        self.body.outbox.drain()
    }
}
