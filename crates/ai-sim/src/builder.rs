//! Fluent builder for constructing a [`Scene`].

use std::sync::Arc;

use ai_agent::AnimationLibrary;
use ai_behavior::{EnemyTuning, NpcTuning, PatrolPattern, Player, PlayerTuning};
use ai_core::{Millis, Rect, SceneConfig, SceneRng, Vec2};
use ai_spatial::{DetourPathfinder, Obstacle, ObstacleSet, PathfinderConfig, Perception, PerceptionConfig};

use crate::scene::Spawner;
use crate::{Scene, SceneError, SceneResult};

/// Attempts at finding an obstacle-free spot for a scattered enemy before
/// settling for the last sample.
const SCATTER_ATTEMPTS: usize = 32;

// ── SceneLayout ───────────────────────────────────────────────────────────────

/// One enemy placement in a [`SceneLayout`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub position: Vec2,
    /// `None` rolls a pattern from the enemy's own RNG.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern:  Option<PatrolPattern>,
}

/// Static level data: where things start and what is in the way.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneLayout {
    pub player_spawn: Vec2,
    pub enemies:      Vec<EnemySpawn>,
    pub npcs:         Vec<Vec2>,
    pub obstacles:    Vec<Obstacle>,
    pub water:        Vec<Rect>,
}

// ── SceneBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Scene`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                          |
/// |----------------------------|----------------------------------|
/// | `.layout(l)`               | Empty layout, player at origin   |
/// | `.pathfinder(c)`           | `PathfinderConfig::default()`    |
/// | `.perception(c)`           | `PerceptionConfig::default()`    |
/// | `.enemy_tuning(t)` etc.    | `Default` tuning                 |
/// | `.animations(lib)`         | `AnimationLibrary::accept_all()` |
/// | `.scatter_enemies(n, a)`   | No procedural spawns             |
///
/// Ids are allocated in order: the player is always `AgentId(0)`, then
/// layout enemies, scattered enemies, and NPCs.
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = SceneBuilder::new(config)
///     .player_at(Vec2::new(0.0, 0.0))
///     .enemy_at(Vec2::new(200.0, 0.0))
///     .obstacle(Obstacle::new(100.0, 0.0, 20.0))
///     .build()?;
/// scene.run(&mut NoopObserver, |_| InputSnapshot::default())?;
/// ```
pub struct SceneBuilder {
    config:        SceneConfig,
    layout:        SceneLayout,
    pathfinder:    PathfinderConfig,
    perception:    PerceptionConfig,
    enemy_tuning:  EnemyTuning,
    player_tuning: PlayerTuning,
    npc_tuning:    NpcTuning,
    animations:    Option<AnimationLibrary>,
    scatter:       Option<(usize, Rect)>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            layout:        SceneLayout::default(),
            pathfinder:    PathfinderConfig::default(),
            perception:    PerceptionConfig::default(),
            enemy_tuning:  EnemyTuning::default(),
            player_tuning: PlayerTuning::default(),
            npc_tuning:    NpcTuning::default(),
            animations:    None,
            scatter:       None,
        }
    }

    /// Replace the whole layout (e.g. one loaded from a level file).
    pub fn layout(mut self, layout: SceneLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn pathfinder(mut self, config: PathfinderConfig) -> Self {
        self.pathfinder = config;
        self
    }

    pub fn perception(mut self, config: PerceptionConfig) -> Self {
        self.perception = config;
        self
    }

    pub fn enemy_tuning(mut self, tuning: EnemyTuning) -> Self {
        self.enemy_tuning = tuning;
        self
    }

    pub fn player_tuning(mut self, tuning: PlayerTuning) -> Self {
        self.player_tuning = tuning;
        self
    }

    pub fn npc_tuning(mut self, tuning: NpcTuning) -> Self {
        self.npc_tuning = tuning;
        self
    }

    pub fn animations(mut self, library: AnimationLibrary) -> Self {
        self.animations = Some(library);
        self
    }

    pub fn player_at(mut self, position: Vec2) -> Self {
        self.layout.player_spawn = position;
        self
    }

    pub fn enemy_at(mut self, position: Vec2) -> Self {
        self.layout.enemies.push(EnemySpawn { position, pattern: None });
        self
    }

    pub fn enemy_with_pattern(mut self, position: Vec2, pattern: PatrolPattern) -> Self {
        self.layout.enemies.push(EnemySpawn { position, pattern: Some(pattern) });
        self
    }

    pub fn npc_at(mut self, home: Vec2) -> Self {
        self.layout.npcs.push(home);
        self
    }

    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.layout.obstacles.push(obstacle);
        self
    }

    pub fn water(mut self, area: Rect) -> Self {
        self.layout.water.push(area);
        self
    }

    /// Procedurally place `count` enemies inside `area`, away from
    /// obstacles, using the scene seed.
    pub fn scatter_enemies(mut self, count: usize, area: Rect) -> Self {
        self.scatter = Some((count, area));
        self
    }

    /// Validate inputs, index obstacles, spawn every agent and return a
    /// ready-to-run [`Scene`].
    pub fn build(self) -> SceneResult<Scene> {
        self.config.validate()?;
        let seed = self.config.seed;

        let obstacles = ObstacleSet::new(self.layout.obstacles)?;
        let pathfinder = DetourPathfinder::new(self.pathfinder, obstacles)?;
        let animations = Arc::new(self.animations.unwrap_or_else(AnimationLibrary::accept_all));

        let mut spawner = Spawner {
            seed,
            next_id:      0,
            enemy_tuning: Arc::new(self.enemy_tuning),
            npc_tuning:   Arc::new(self.npc_tuning),
            animations:   animations.clone(),
        };

        let (player_id, player_rng) = spawner.allocate();
        let player = Player::new(
            player_id,
            self.layout.player_spawn,
            Arc::new(self.player_tuning),
            player_rng,
            animations,
        )?;

        let mut enemies = Vec::with_capacity(self.layout.enemies.len());
        for spawn in &self.layout.enemies {
            enemies.push(spawner.enemy(spawn.position, spawn.pattern)?);
        }
        if let Some((count, area)) = self.scatter {
            if !(area.min.is_finite() && area.max.is_finite() && area.min.x <= area.max.x && area.min.y <= area.max.y) {
                return Err(SceneError::Config(format!("scatter area is empty: {area:?}")));
            }
            let mut rng = SceneRng::new(seed);
            for _ in 0..count {
                let position = open_spot(&mut rng, area, pathfinder.obstacles());
                enemies.push(spawner.enemy(position, None)?);
            }
        }

        let mut npcs = Vec::with_capacity(self.layout.npcs.len());
        for &home in &self.layout.npcs {
            npcs.push(spawner.npc(home)?);
        }

        let is_night = self.config.is_night_at(Millis::ZERO);
        if is_night {
            for enemy in &mut enemies {
                enemy.set_night(true);
            }
        }

        Ok(Scene {
            clock:      self.config.make_clock(),
            config:     self.config,
            pathfinder,
            perception: Perception::new(self.perception),
            water:      self.layout.water,
            player,
            enemies,
            npcs,
            is_night,
            spawner,
        })
    }
}

/// A uniformly random point in `area` that is not inside any obstacle.
fn open_spot(rng: &mut SceneRng, area: Rect, obstacles: &ObstacleSet) -> Vec2 {
    let mut p = area.min;
    for _ in 0..SCATTER_ATTEMPTS {
        p = Vec2::new(
            rng.gen_range(area.min.x..=area.max.x),
            rng.gen_range(area.min.y..=area.max.y),
        );
        if !obstacles.iter().any(|(_, o)| o.contains(p)) {
            break;
        }
    }
    p
}
