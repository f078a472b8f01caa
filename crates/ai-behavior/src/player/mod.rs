//! Player agent: input-driven movement and attacks.
//!
//! ```text
//! idle            move keys                      → walking | sprinting
//! walking         no move keys                   → idle
//!                 sprint key, sprint ready       → sprinting
//! sprinting       no move keys                   → idle
//!                 sprint released / time up      → walking
//! any of above    light key, light ready         → attacking_light
//!                 heavy key, heavy ready         → attacking_heavy
//! attacking_*     animation finished             → idle
//! ```
//!
//! Swimming is an overlay, not a state: while the player overlaps water the
//! movement speed is scaled and animation names get a `swim_` prefix.  A dead
//! player ignores input until `reset`.

mod states;

use std::sync::Arc;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use ai_agent::{
    AgentSnapshot, AnimationLibrary, Animator, AttackKind, Body, DamageOutcome, EntityType,
    GameEvent, Outbox, SoundCue, Vitals,
};
use ai_core::{AgentId, AgentRng, Facing, Millis, Vec2};
use ai_fsm::{Actor, StateMachine};

use crate::{Agent, BehaviorResult, InputKeys, PlayerTuning, TickContext};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerState {
    Idle,
    Walking,
    Sprinting,
    AttackingLight,
    AttackingHeavy,
}

impl PlayerState {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ── PlayerBody ────────────────────────────────────────────────────────────────

pub struct PlayerBody {
    pub body:     Body,
    pub vitals:   Vitals,
    pub animator: Animator,
    pub outbox:   Outbox,
    pub rng:      AgentRng,
    pub tuning:   Arc<PlayerTuning>,

    pub state: PlayerState,

    /// Time spent in the current attack.
    pub attack_timer:   f32,
    pub sprint_left_ms: f32,

    pub sprint_ready_at: Millis,
    pub light_ready_at:  Millis,
    pub heavy_ready_at:  Millis,

    pub swimming: bool,
}

impl Actor for PlayerBody {
    type Key = PlayerState;
    type Entry = ();
    type Ctx<'a> = TickContext<'a>;
}

impl PlayerBody {
    fn begin(&mut self, state: PlayerState) {
        self.state = state;
    }

    /// Walking speed with the sprint `factor` and the swimming penalty.
    pub fn move_speed(&self, factor: f32) -> f32 {
        let swim = if self.swimming { self.tuning.swim_speed_factor } else { 1.0 };
        self.body.base_speed * factor * swim
    }

    /// Attack whose key is held and whose cooldown has elapsed.  Light wins
    /// when both are possible.
    fn requested_attack(&self, ctx: &TickContext<'_>) -> Option<PlayerState> {
        if ctx.input.pressed(InputKeys::LIGHT_ATTACK) && ctx.now >= self.light_ready_at {
            Some(PlayerState::AttackingLight)
        } else if ctx.input.pressed(InputKeys::HEAVY_ATTACK) && ctx.now >= self.heavy_ready_at {
            Some(PlayerState::AttackingHeavy)
        } else {
            None
        }
    }

    fn sprint_ready(&self, ctx: &TickContext<'_>) -> bool {
        ctx.input.pressed(InputKeys::SPRINT) && ctx.now >= self.sprint_ready_at
    }

    /// Roll damage, emit the attack and start the matching cooldown.
    fn swing(&mut self, kind: AttackKind, now: Millis) {
        let t = &self.tuning;
        let (lo, hi, cooldown) = match kind {
            AttackKind::Light => (t.light_damage_min, t.light_damage_max, t.light_cooldown_ms),
            AttackKind::Heavy => (t.heavy_damage_min, t.heavy_damage_max, t.heavy_cooldown_ms),
        };
        let reach = t.attack_reach;
        let damage = self.rng.gen_range(lo..=hi);
        match kind {
            AttackKind::Light => self.light_ready_at = now + cooldown,
            AttackKind::Heavy => self.heavy_ready_at = now + cooldown,
        }
        let from = self.body.id;
        self.outbox.push(GameEvent::PlayerAttack {
            from,
            kind,
            origin: self.body.position,
            reach,
            damage,
        });
        self.outbox.sound(from, SoundCue::Attack);
    }

    fn sync_swimming(&mut self, in_water: bool) {
        if self.swimming == in_water {
            return;
        }
        self.swimming = in_water;
        let agent = self.body.id;
        if in_water {
            self.outbox.push(GameEvent::SwimEnter { agent });
            self.outbox.sound(agent, SoundCue::Splash);
        } else {
            self.outbox.push(GameEvent::SwimExit { agent });
        }
    }

    fn animate(&mut self) {
        let action = if self.vitals.is_dead() {
            "death"
        } else {
            match self.state {
                PlayerState::Idle => "idle",
                PlayerState::Walking => "walk",
                PlayerState::Sprinting => "run",
                PlayerState::AttackingLight => "attack_light",
                PlayerState::AttackingHeavy => "attack_heavy",
            }
        };
        let (agent, facing) = (self.body.id, self.body.facing);
        if self.swimming && self.animator.play_facing(agent, &format!("swim_{action}"), facing) {
            return;
        }
        self.animator.play_facing(agent, action, facing);
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

pub struct Player {
    body: PlayerBody,
    fsm:  StateMachine<PlayerBody>,
}

impl Player {
    pub fn new(
        id:         AgentId,
        position:   Vec2,
        tuning:     Arc<PlayerTuning>,
        rng:        AgentRng,
        animations: Arc<AnimationLibrary>,
    ) -> BehaviorResult<Self> {
        tuning.validate()?;
        let body = PlayerBody {
            body:     Body::new(id, position, tuning.base_speed),
            vitals:   Vitals::new(tuning.max_hit_points),
            animator: Animator::new(animations),
            outbox:   Outbox::default(),
            rng,
            state:    PlayerState::Idle,
            attack_timer:    0.0,
            sprint_left_ms:  0.0,
            sprint_ready_at: Millis::ZERO,
            light_ready_at:  Millis::ZERO,
            heavy_ready_at:  Millis::ZERO,
            swimming:        false,
            tuning,
        };
        let fsm = states::build_machine()?;
        Ok(Self { body, fsm })
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.fsm.current().unwrap_or(self.fsm.initial())
    }

    #[inline]
    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    #[inline]
    pub fn is_swimming(&self) -> bool {
        self.body.swimming
    }
}

impl Agent for Player {
    fn id(&self) -> AgentId {
        self.body.body.id
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Player
    }

    fn state_name(&self) -> &'static str {
        if self.body.vitals.is_dead() { "dead" } else { self.state().as_str() }
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
        self.body.sync_swimming(ctx.in_water);
        if self.body.vitals.is_dead() {
            self.body.body.stop();
        } else {
            self.fsm.step(&mut self.body, ctx)?;
            self.body.body.integrate(ctx.delta_ms);
        }
        self.body.animate();
        Ok(())
    }

    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let body = &mut self.body;
        let agent = body.body.id;
        let outcome = body.vitals.take_damage(amount);
        match outcome {
            DamageOutcome::Hurt => {
                body.outbox.push(GameEvent::Hurt { agent, damage: amount });
                body.outbox.sound(agent, SoundCue::Hit);
            }
            DamageOutcome::Killed => {
                body.outbox.push(GameEvent::Hurt { agent, damage: amount });
                body.outbox.push(GameEvent::Died { agent });
                body.outbox.sound(agent, SoundCue::Death);
                body.body.stop();
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    fn reset(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()> {
        let body = &mut self.body;
        body.vitals.restore();
        body.attack_timer = 0.0;
        body.sprint_left_ms = 0.0;
        body.sprint_ready_at = Millis::ZERO;
        body.light_ready_at = Millis::ZERO;
        body.heavy_ready_at = Millis::ZERO;
        body.body.stop();
        self.fsm.transition(PlayerState::Idle, &mut self.body, ctx)?;
        Ok(())
    }

    fn safe_transition_to_state(&mut self, name: &str, ctx: &mut TickContext<'_>) -> bool {
        let Ok(state) = name.parse::<PlayerState>() else {
            debug!(agent = %self.body.body.id, name, "unknown player state name");
            return false;
        };
        match self.fsm.transition(state, &mut self.body, ctx) {
            Ok(()) => true,
            Err(err) => {
                debug!(agent = %self.body.body.id, name, %err, "transition refused");
                false
            }
        }
    }

    fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            x:                   self.body.body.position.x,
            y:                   self.body.body.position.y,
            hit_points:          self.body.vitals.hit_points(),
            max_hit_points:      self.body.vitals.max_hit_points(),
            entity_type:         EntityType::Player,
            is_dead:             self.body.vitals.is_dead(),
            night_stats_applied: false,
        }
    }

    fn restore(&mut self, snapshot: &AgentSnapshot) {
        self.body.body.position = Vec2::new(snapshot.x, snapshot.y);
        let hit_points = if snapshot.is_dead { 0 } else { snapshot.hit_points };
        self.body.vitals.set(hit_points, snapshot.max_hit_points);
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        self.body.outbox.drain()
    }
}
