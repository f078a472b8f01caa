//! Enemy agent: patrol, alert, pursue, search, flank, attack, and the
//! dead → fading → reviving cycle.
//!
//! # Transition table
//!
//! ```text
//! patrolling  seen                                 → alert
//! alert       not seen                             → patrolling
//!             alert timer > alert_ms               → pursuing
//! pursuing    not seen                             → searching
//!             in attack range                      → attacking
//!             pursuit timer > pursuit_ms           → flanking
//! searching   seen                                 → pursuing
//!             reached last-known / timer > search  → patrolling
//! flanking    not seen                             → patrolling
//!             in attack range                      → attacking
//!             flank timer > flank_ms               → pursuing
//! attacking   not seen                             → patrolling
//!             out of attack range                  → pursuing
//!             off cooldown, past gate: combo roll  → attacking (combo) | pursuing
//! dead        BeginFade task                       → fading
//! fading      opacity reaches zero                 → reviving
//! reviving    Revived task                         → patrolling
//! ```
//!
//! A lethal `take_damage` marks the enemy and the next `update` performs the
//! single transition to `dead`.

mod patrol;
mod states;

use std::sync::Arc;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, trace};

use ai_agent::{
    AgentSnapshot, AnimationLibrary, Animator, Body, DamageOutcome, EntityType, GameEvent,
    NightStats, Outbox, PathFollower, SoundCue, Vitals,
};
use ai_core::{AgentId, AgentRng, Facing, Millis, Vec2};
use ai_fsm::{Actor, StateMachine};
use ai_schedule::{Scope, TaskQueue};

use crate::{Agent, BehaviorResult, EnemyTuning, TickContext};

pub use patrol::{Patrol, PatrolPattern};

// ── Keys, entries and tasks ───────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EnemyState {
    Patrolling,
    Alert,
    Pursuing,
    Searching,
    Flanking,
    Attacking,
    Dead,
    Fading,
    Reviving,
}

impl EnemyState {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// `dead`, `fading` or `reviving`.
    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, EnemyState::Dead | EnemyState::Fading | EnemyState::Reviving)
    }
}

/// Extra data a transition hands to `enter`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EnemyEntry {
    #[default]
    Normal,
    /// Re-entering `attacking` to chain a combo.
    Combo,
}

/// Delayed work an enemy schedules for itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyTask {
    /// Attack cooldown expired (agent-scoped).
    CooldownOver,
    /// Reduced-damage follow-up of a combo (state-scoped).
    ComboHit,
    /// Death delay elapsed (state-scoped).
    BeginFade,
    /// Revive delay elapsed (state-scoped).
    Revived,
}

/// Per-state timers in milliseconds.  Each is zeroed by its state's `enter`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EnemyTimers {
    pub alert:   f32,
    pub pursuit: f32,
    pub search:  f32,
    pub flank:   f32,
    pub attack:  f32,
    pub fade:    f32,
}

// ── EnemyBody ─────────────────────────────────────────────────────────────────

/// Everything an enemy's states read and write.
pub struct EnemyBody {
    pub body:     Body,
    pub vitals:   Vitals,
    pub night:    NightStats,
    pub path:     PathFollower,
    pub animator: Animator,
    pub outbox:   Outbox,
    pub tasks:    TaskQueue<EnemyTask>,
    pub rng:      AgentRng,
    pub tuning:   Arc<EnemyTuning>,
    pub timers:   EnemyTimers,
    pub patrol:   Patrol,

    /// Mirror of the machine's current state.
    pub state: EnemyState,
    /// Incremented on every state entry; scopes state-bound tasks.
    pub epoch: u64,

    pub last_known_target:  Option<Vec2>,
    pub detection_distance: f32,
    pub attack_range:       f32,
    pub attack_on_cooldown: bool,
    /// +1 or -1: which side of the target a flank approaches from.
    pub flank_side:         f32,
    /// 1 = fully visible, 0 = faded out.
    pub opacity:            f32,

    death_pending: bool,
}

impl Actor for EnemyBody {
    type Key = EnemyState;
    type Entry = EnemyEntry;
    type Ctx<'a> = TickContext<'a>;
}

impl EnemyBody {
    #[inline]
    pub fn id(&self) -> AgentId {
        self.body.id
    }

    fn begin(&mut self, state: EnemyState) {
        self.state = state;
        self.epoch += 1;
    }

    #[inline]
    fn state_scope(&self) -> Scope {
        Scope::State(self.epoch)
    }

    /// Movement speed for this tick, night multiplier included.
    #[inline]
    pub fn speed(&self, factor: f32) -> f32 {
        self.night.speed(self.body.base_speed) * factor
    }

    /// Flat attack damage, night multiplier included.
    #[inline]
    pub fn attack_power(&self) -> u32 {
        self.night.attack(self.tuning.base_damage)
    }

    /// Square-range detection of the target.  `None` when the check failed
    /// and this tick's detection must be skipped.
    pub fn perceives(&self, ctx: &TickContext<'_>) -> Option<bool> {
        match ctx.perception.listen(self.body.position, self.detection_distance, ctx.target) {
            Ok(seen) => Some(seen),
            Err(err) => {
                debug!(agent = %self.body.id, %err, "perception failed; detection skipped");
                None
            }
        }
    }

    /// Circular attack-range test.  `None` on a failed check.
    pub fn in_attack_range(&self, ctx: &TickContext<'_>) -> Option<bool> {
        match ctx.perception.listen_radius(self.body.position, self.attack_range, ctx.target) {
            Ok(hit) => Some(hit),
            Err(err) => {
                debug!(agent = %self.body.id, %err, "attack range check failed; skipped");
                None
            }
        }
    }

    /// Follow a pathfinder route to `goal`, re-planning when the route is
    /// used up or `goal` has drifted from it; straight line otherwise.
    fn chase(&mut self, ctx: &TickContext<'_>, goal: Vec2, speed: f32) {
        let stale_after = self.tuning.path_stale_distance;
        if self.path.is_exhausted() || self.path.is_stale(goal, stale_after) {
            let route = ctx.pathfinder.find_path(self.body.position, goal);
            trace!(agent = %self.body.id, %goal, waypoints = route.len(), "path recomputed");
            self.path.set_route(route, goal);
        }
        if !self.path.move_to_waypoint(&mut self.body, speed) {
            self.body.head_towards(goal, speed);
        }
    }

    fn face(&mut self, point: Vec2) {
        self.body.facing = Facing::from_velocity(point - self.body.position, self.body.facing);
    }

    /// Strike the target and start a cooldown of `cooldown_ms`.
    fn strike(&mut self, now: Millis, cooldown_ms: u64) {
        let from = self.body.id;
        let damage = self.attack_power();
        self.outbox.push(GameEvent::EnemyAttack { from, damage, combo: false });
        self.outbox.sound(from, SoundCue::Attack);
        self.attack_on_cooldown = true;
        self.tasks.schedule(now, cooldown_ms, Scope::Agent, EnemyTask::CooldownOver);
    }

    fn combo_hit(&mut self) {
        let from = self.body.id;
        let damage = (self.attack_power() as f32 * self.tuning.combo_damage_factor).round() as u32;
        self.outbox.push(GameEvent::EnemyAttack { from, damage, combo: true });
        self.outbox.sound(from, SoundCue::Attack);
    }

    /// Full hit points; timers, path, flags and queued tasks cleared.
    fn revive(&mut self) {
        self.vitals.restore();
        self.timers = EnemyTimers::default();
        self.path.clear();
        self.tasks.clear();
        self.last_known_target = None;
        self.attack_on_cooldown = false;
        self.opacity = 1.0;
        self.death_pending = false;
        self.body.stop();
    }

    fn animate(&mut self) {
        let action = match self.state {
            EnemyState::Attacking => "attack",
            EnemyState::Dead | EnemyState::Fading => "death",
            EnemyState::Alert => "alert",
            _ if self.body.velocity.is_zero() => "idle",
            _ => "walk",
        };
        self.animator.play_facing(self.body.id, action, self.body.facing);
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// An enemy: its body plus the machine that drives it.
pub struct Enemy {
    body: EnemyBody,
    fsm:  StateMachine<EnemyBody>,
}

impl Enemy {
    /// Spawn at `position`.  The patrol pattern is rolled from `rng` and the
    /// patrol centre is the spawn point.
    pub fn new(
        id:         AgentId,
        position:   Vec2,
        tuning:     Arc<EnemyTuning>,
        mut rng:    AgentRng,
        animations: Arc<AnimationLibrary>,
    ) -> BehaviorResult<Self> {
        tuning.validate()?;
        let pattern = PatrolPattern::roll(&mut rng);
        let patrol = Patrol::new(pattern, position, tuning.patrol_radius, &mut rng);
        let body = EnemyBody {
            body:     Body::new(id, position, tuning.base_speed),
            vitals:   Vitals::new(tuning.max_hit_points),
            night:    NightStats::new(tuning.night_speed_multiplier, tuning.night_attack_multiplier),
            path:     PathFollower::new(tuning.waypoint_reach),
            animator: Animator::new(animations),
            outbox:   Outbox::default(),
            tasks:    TaskQueue::new(),
            rng,
            timers:   EnemyTimers::default(),
            patrol,
            state:    EnemyState::Patrolling,
            epoch:    0,
            last_known_target:  None,
            detection_distance: tuning.detection_distance,
            attack_range:       tuning.attack_range,
            attack_on_cooldown: false,
            flank_side:         1.0,
            opacity:            1.0,
            death_pending:      false,
            tuning,
        };
        let fsm = states::build_machine(id)?;
        Ok(Self { body, fsm })
    }

    /// Replace the rolled patrol pattern.
    pub fn with_pattern(mut self, pattern: PatrolPattern) -> Self {
        let body = &mut self.body;
        body.patrol = Patrol::new(pattern, body.patrol.center, body.patrol.radius, &mut body.rng);
        self
    }

    #[inline]
    pub fn state(&self) -> EnemyState {
        self.fsm.current().unwrap_or(self.fsm.initial())
    }

    #[inline]
    pub fn body(&self) -> &EnemyBody {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    #[inline]
    pub fn machine(&self) -> &StateMachine<EnemyBody> {
        &self.fsm
    }

    /// Toggle night stats.  Returns `true` only on an actual edge.
    pub fn set_night(&mut self, is_night: bool) -> bool {
        self.body.night.set_night(is_night)
    }

    /// Tear the machine down for good (despawn).
    pub fn stop(&mut self) {
        self.fsm.stop();
        self.body.tasks.clear();
        self.body.body.stop();
    }

    fn run_task(&mut self, task: EnemyTask, ctx: &mut TickContext<'_>) -> BehaviorResult<()> {
        let Self { body, fsm } = self;
        match task {
            EnemyTask::CooldownOver => body.attack_on_cooldown = false,
            EnemyTask::ComboHit => body.combo_hit(),
            EnemyTask::BeginFade => fsm.transition(EnemyState::Fading, body, ctx)?,
            EnemyTask::Revived => {
                body.outbox.push(GameEvent::Revived { agent: body.body.id });
                fsm.transition(EnemyState::Patrolling, body, ctx)?;
            }
        }
        Ok(())
    }
}

impl Agent for Enemy {
    fn id(&self) -> AgentId {
        self.body.body.id
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Enemy
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
        if self.body.death_pending {
            self.body.death_pending = false;
            if !matches!(self.state(), EnemyState::Dead | EnemyState::Fading) {
                self.fsm.transition(EnemyState::Dead, &mut self.body, ctx)?;
            }
        }

        let due = self.body.tasks.drain_due(ctx.now, self.body.epoch);
        for task in due {
            self.run_task(task, ctx)?;
        }

        self.fsm.step(&mut self.body, ctx)?;
        self.body.body.integrate(ctx.delta_ms);
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
                body.death_pending = true;
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    fn reset(&mut self, ctx: &mut TickContext<'_>) -> BehaviorResult<()> {
        self.body.revive();
        self.fsm.transition(EnemyState::Patrolling, &mut self.body, ctx)?;
        Ok(())
    }

    fn safe_transition_to_state(&mut self, name: &str, ctx: &mut TickContext<'_>) -> bool {
        let Ok(state) = name.parse::<EnemyState>() else {
            debug!(agent = %self.body.body.id, name, "unknown enemy state name");
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
            entity_type:         EntityType::Enemy,
            is_dead:             self.body.vitals.is_dead(),
            night_stats_applied: self.body.night.is_applied(),
        }
    }

    fn restore(&mut self, snapshot: &AgentSnapshot) {
        let body = &mut self.body;
        body.body.position = Vec2::new(snapshot.x, snapshot.y);
        let hit_points = if snapshot.is_dead { 0 } else { snapshot.hit_points };
        body.vitals.set(hit_points, snapshot.max_hit_points);
        body.night.set_night(snapshot.night_stats_applied);
        body.death_pending = body.vitals.is_dead();
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        self.body.outbox.drain()
    }
}
