//! The `Scene` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, info, trace};

use ai_agent::{AgentSnapshot, AnimationLibrary, DamageOutcome, GameEvent};
use ai_behavior::{
    Agent, BehaviorResult, Enemy, EnemyTuning, InputSnapshot, Npc, NpcTuning, PatrolPattern,
    Player, TickContext,
};
use ai_core::{AgentId, AgentRng, AiError, Millis, Rect, SceneClock, SceneConfig, Vec2};
use ai_spatial::{is_within_radius, DetourPathfinder, Obstacle, ObstacleSet, Perception};

use crate::{SceneObserver, SceneResult};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick:     u64,
    pub now:      Millis,
    /// Scaled delta every agent saw this tick.
    pub delta_ms: f32,
    pub is_night: bool,
    /// The day/night flag flipped on this tick.
    pub night_edge: bool,
    /// Emitted events plus the hits and deaths their resolution produced.
    pub events: Vec<GameEvent>,
    /// Damage the player took this tick.
    pub player_damage: u32,
    /// Enemies killed this tick.
    pub kills: usize,
}

// ── Spawner ───────────────────────────────────────────────────────────────────

/// Id allocation and shared tuning for agents spawned into a scene.
pub(crate) struct Spawner {
    pub seed:         u64,
    pub next_id:      u32,
    pub enemy_tuning: Arc<EnemyTuning>,
    pub npc_tuning:   Arc<NpcTuning>,
    pub animations:   Arc<AnimationLibrary>,
}

impl Spawner {
    /// Fresh id plus the RNG stream derived from it.
    pub fn allocate(&mut self) -> (AgentId, AgentRng) {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        (id, AgentRng::new(self.seed, id))
    }

    pub fn enemy(&mut self, position: Vec2, pattern: Option<PatrolPattern>) -> BehaviorResult<Enemy> {
        let (id, rng) = self.allocate();
        let enemy = Enemy::new(id, position, self.enemy_tuning.clone(), rng, self.animations.clone())?;
        Ok(match pattern {
            Some(pattern) => enemy.with_pattern(pattern),
            None => enemy,
        })
    }

    pub fn npc(&mut self, home: Vec2) -> BehaviorResult<Npc> {
        let (id, rng) = self.allocate();
        Npc::new(id, home, self.npc_tuning.clone(), rng, self.animations.clone())
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// One level: the player, its enemies and NPCs, the obstacle field and the
/// clock that drives them.
///
/// Each [`tick`](Self::tick):
///
/// 1. scales the raw delta and advances the clock,
/// 2. toggles night stats on every enemy when the day/night flag flips,
/// 3. updates the player (input, water overlap),
/// 4. updates enemies with the player's position as target while it lives,
/// 5. updates NPCs,
/// 6. drains every outbox and resolves attacks into damage.
///
/// Agents never touch each other during their update, so the order within a
/// group does not change the outcome of a tick.
///
/// Create via [`SceneBuilder`][crate::SceneBuilder].
pub struct Scene {
    pub config: SceneConfig,
    pub clock:  SceneClock,

    pub(crate) pathfinder: DetourPathfinder,
    pub(crate) perception: Perception,
    pub(crate) water:      Vec<Rect>,
    pub(crate) player:     Player,
    pub(crate) enemies:    Vec<Enemy>,
    pub(crate) npcs:       Vec<Npc>,
    pub(crate) is_night:   bool,
    pub(crate) spawner:    Spawner,
}

impl Scene {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: AgentId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn enemy_mut(&mut self, id: AgentId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    #[inline]
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    #[inline]
    pub fn pathfinder(&self) -> &DetourPathfinder {
        &self.pathfinder
    }

    #[inline]
    pub fn water(&self) -> &[Rect] {
        &self.water
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.is_night
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.clock.now
    }

    /// Player first, then enemies, then NPCs, each group in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &dyn Agent> {
        std::iter::once(&self.player as &dyn Agent)
            .chain(self.enemies.iter().map(|e| e as &dyn Agent))
            .chain(self.npcs.iter().map(|n| n as &dyn Agent))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn Agent> {
        if self.player.id() == id {
            return Some(&mut self.player as &mut dyn Agent);
        }
        if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id() == id) {
            return Some(enemy as &mut dyn Agent);
        }
        self.npcs.iter_mut().find(|n| n.id() == id).map(|n| n as &mut dyn Agent)
    }

    // ── Spawning and teardown ─────────────────────────────────────────────

    /// Spawn an enemy mid-scene.  `None` rolls the patrol pattern.
    pub fn spawn_enemy(&mut self, position: Vec2, pattern: Option<PatrolPattern>) -> SceneResult<AgentId> {
        let mut enemy = self.spawner.enemy(position, pattern)?;
        enemy.set_night(self.is_night);
        let id = enemy.id();
        debug!(agent = %id, %position, "enemy spawned");
        self.enemies.push(enemy);
        Ok(id)
    }

    pub fn spawn_npc(&mut self, home: Vec2) -> SceneResult<AgentId> {
        let npc = self.spawner.npc(home)?;
        let id = npc.id();
        debug!(agent = %id, %home, "npc spawned");
        self.npcs.push(npc);
        Ok(id)
    }

    /// Remove an enemy or NPC for good.  An enemy's machine is stopped so
    /// nothing it scheduled can fire.  The player cannot be despawned.
    pub fn despawn(&mut self, id: AgentId) -> bool {
        if let Some(i) = self.enemies.iter().position(|e| e.id() == id) {
            let mut enemy = self.enemies.remove(i);
            enemy.stop();
            debug!(agent = %id, "enemy despawned");
            return true;
        }
        if let Some(i) = self.npcs.iter().position(|n| n.id() == id) {
            self.npcs.remove(i);
            debug!(agent = %id, "npc despawned");
            return true;
        }
        false
    }

    /// Replace the obstacle field.  Paths already being followed are kept
    /// until they go stale.
    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) -> SceneResult<()> {
        self.pathfinder.set_obstacles(ObstacleSet::new(obstacles)?);
        Ok(())
    }

    /// Pause with a scale near zero; `1.0` is real time.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    /// Bring a dead player back at full health.
    pub fn reset_player(&mut self) -> SceneResult<()> {
        let mut ctx = TickContext::new(self.clock.now, 0.0, &self.pathfinder).with_perception(self.perception);
        self.player.reset(&mut ctx)?;
        Ok(())
    }

    // ── Save round trip ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> Vec<(AgentId, AgentSnapshot)> {
        self.agents().map(|a| (a.id(), a.snapshot())).collect()
    }

    pub fn restore_agent(&mut self, id: AgentId, snapshot: &AgentSnapshot) -> SceneResult<()> {
        let agent = self.agent_mut(id).ok_or(AiError::AgentNotFound(id))?;
        agent.restore(snapshot);
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks` with a fixed frame
    /// of `config.tick_ms`.  `input` is asked for the keys held each tick.
    pub fn run<O, F>(&mut self, observer: &mut O, mut input: F) -> SceneResult<()>
    where
        O: SceneObserver,
        F: FnMut(&Scene) -> InputSnapshot,
    {
        while self.clock.tick < self.config.total_ticks {
            self.observed_tick(observer, &mut input)?;
        }
        observer.on_scene_end(self.clock.tick);
        info!(ticks = self.clock.tick, now = %self.clock.now, "scene finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O, F>(&mut self, n: u64, observer: &mut O, mut input: F) -> SceneResult<()>
    where
        O: SceneObserver,
        F: FnMut(&Scene) -> InputSnapshot,
    {
        for _ in 0..n {
            self.observed_tick(observer, &mut input)?;
        }
        Ok(())
    }

    fn observed_tick<O, F>(&mut self, observer: &mut O, input: &mut F) -> SceneResult<()>
    where
        O: SceneObserver,
        F: FnMut(&Scene) -> InputSnapshot,
    {
        observer.on_tick_start(self.clock.tick + 1, self.clock.now);
        let keys = input(self);
        let report = self.tick(self.config.tick_ms, keys)?;
        if !report.events.is_empty() {
            observer.on_events(report.tick, &report.events);
        }
        observer.on_tick_end(&report);

        let every = self.config.snapshot_interval_ticks;
        if every > 0 && report.tick.is_multiple_of(every) {
            observer.on_snapshot(report.tick, self);
        }
        Ok(())
    }

    /// Advance the scene by one frame of `raw_delta_ms` real milliseconds.
    ///
    /// A fatal state-machine error from any agent aborts the tick and is
    /// returned; the scene should not be ticked again afterwards.
    pub fn tick(&mut self, raw_delta_ms: f32, input: InputSnapshot) -> SceneResult<TickReport> {
        let delta_ms = self.clock.advance(raw_delta_ms);
        let now = self.clock.now;
        let tick = self.clock.tick;

        // ── Day/night edge ────────────────────────────────────────────────
        let is_night = self.config.is_night_at(now);
        let night_edge = is_night != self.is_night;
        if night_edge {
            self.is_night = is_night;
            for enemy in &mut self.enemies {
                enemy.set_night(is_night);
            }
            debug!(tick, %now, is_night, "day/night edge");
        }

        // ── Player ────────────────────────────────────────────────────────
        let in_water = self.water.iter().any(|w| w.contains(self.player.position()));
        let mut ctx = TickContext::new(now, delta_ms, &self.pathfinder)
            .with_perception(self.perception)
            .with_input(input)
            .with_water(in_water);
        self.player.update(&mut ctx)?;

        // ── Enemies chase the player while it lives ───────────────────────
        let player_at = self.player.position();
        let target = (!self.player.is_dead()).then_some(player_at);
        for enemy in &mut self.enemies {
            let mut ctx = TickContext::new(now, delta_ms, &self.pathfinder)
                .with_perception(self.perception)
                .with_target(target);
            enemy.update(&mut ctx)?;
        }

        // ── NPCs ──────────────────────────────────────────────────────────
        for npc in &mut self.npcs {
            let mut ctx = TickContext::new(now, delta_ms, &self.pathfinder)
                .with_perception(self.perception)
                .with_target(Some(player_at))
                .with_input(input);
            npc.update(&mut ctx)?;
        }

        // ── Resolve ───────────────────────────────────────────────────────
        let mut events = self.drain_events();
        let (player_damage, kills) = self.resolve(&events);
        events.extend(self.drain_events());

        Ok(TickReport {
            tick,
            now,
            delta_ms,
            is_night,
            night_edge,
            events,
            player_damage,
            kills,
        })
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        let mut events = self.player.drain_events();
        for enemy in &mut self.enemies {
            events.extend(enemy.drain_events());
        }
        for npc in &mut self.npcs {
            events.extend(npc.drain_events());
        }
        events
    }

    /// Turn attack events into damage.  Returns the damage dealt to the
    /// player and the number of enemies killed.
    fn resolve(&mut self, events: &[GameEvent]) -> (u32, usize) {
        let mut player_damage = 0;
        let mut kills = 0;
        for event in events {
            match *event {
                GameEvent::EnemyAttack { from, damage, combo } => {
                    if self.player.is_dead() {
                        continue;
                    }
                    let Some(attacker) = self.enemies.iter().find(|e| e.id() == from) else {
                        continue;
                    };
                    // A delayed combo hit misses if the player stepped out of reach.
                    let reach = attacker.body().attack_range;
                    if !is_within_radius(attacker.position(), self.player.position(), reach) {
                        trace!(agent = %from, combo, "enemy attack out of reach");
                        continue;
                    }
                    if self.player.take_damage(damage) != DamageOutcome::Ignored {
                        player_damage += damage;
                    }
                }
                GameEvent::PlayerAttack { origin, reach, damage, .. } => {
                    for enemy in &mut self.enemies {
                        if enemy.is_dead() || !is_within_radius(origin, enemy.position(), reach) {
                            continue;
                        }
                        if enemy.take_damage(damage) == DamageOutcome::Killed {
                            kills += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        (player_damage, kills)
    }
}
