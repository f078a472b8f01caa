//! skirmish: small end-to-end scene for the actor-AI runtime.
//!
//! A scripted player walks east through a field with a rock, a pond, a
//! villager and a handful of enemies, swinging whenever something gets
//! close.  Traces land in `output/skirmish/`.
//!
//! ```text
//! skirmish [config.json] [layout.json]
//! ```
//!
//! Both files are optional; missing ones fall back to the built-in scene.
//! Set `RUST_LOG=debug` to watch state changes.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_agent::GameEvent;
use ai_behavior::{Agent, InputKeys, InputSnapshot, PatrolPattern};
use ai_core::{Rect, SceneConfig, Vec2};
use ai_output::{CsvWriter, OutputWriter, TraceObserver};
use ai_sim::{EnemySpawn, Scene, SceneBuilder, SceneLayout, SceneObserver, TickReport};
use ai_spatial::Obstacle;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const TICK_MS:         f32 = 1000.0 / 60.0;
const SCENE_SECONDS:   u64 = 60;
const SCATTER_ENEMIES: usize = 4;
const OUTPUT_DIR:      &str = "output/skirmish";

/// Enemies closer than this make the scripted player swing.
const SWING_DISTANCE: f32 = 40.0;

// ── Scene data ────────────────────────────────────────────────────────────────

fn default_config() -> SceneConfig {
    SceneConfig {
        seed:                    SEED,
        tick_ms:                 TICK_MS,
        total_ticks:             SCENE_SECONDS * 60,
        snapshot_interval_ticks: 30,
        time_scale:              1.0,
        day_length_ms:           40_000,
    }
}

fn default_layout() -> SceneLayout {
    let mut layout = SceneLayout {
        player_spawn: Vec2::new(0.0, 0.0),
        npcs:         vec![Vec2::new(-120.0, 60.0)],
        obstacles:    vec![Obstacle::new(160.0, 0.0, 30.0), Obstacle::new(420.0, -90.0, 25.0)],
        water:        vec![Rect::new(260.0, 60.0, 120.0, 80.0)],
        ..SceneLayout::default()
    };
    layout.enemies.push(EnemySpawn {
        position: Vec2::new(320.0, 0.0),
        pattern:  Some(PatrolPattern::Horizontal),
    });
    layout.enemies.push(EnemySpawn {
        position: Vec2::new(500.0, 120.0),
        pattern:  None,
    });
    layout
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Scripted input ────────────────────────────────────────────────────────────

/// Walk east, sprint through the middle third, and swing at anything close.
fn scripted_input(scene: &Scene) -> InputSnapshot {
    let player = scene.player();
    let mut keys = InputKeys::RIGHT;

    let tick = scene.clock.tick;
    let third = scene.config.total_ticks / 3;
    if (third..2 * third).contains(&tick) {
        keys |= InputKeys::SPRINT;
    }
    if tick % 240 >= 180 {
        keys |= InputKeys::DOWN;
    }

    let threatened = scene
        .enemies()
        .iter()
        .filter(|e| !e.is_dead())
        .any(|e| e.position().distance(player.position()) <= SWING_DISTANCE);
    if threatened {
        keys |= if tick % 3 == 0 { InputKeys::HEAVY_ATTACK } else { InputKeys::LIGHT_ATTACK };
    }
    if scene.npcs().iter().any(|n| n.position().distance(player.position()) <= 60.0) {
        keys |= InputKeys::INTERACT;
    }
    InputSnapshot::new(keys)
}

// ── Observer wrapper to count events ──────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         TraceObserver<W>,
    deaths:        usize,
    damage_taken:  u32,
    night_changes: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, deaths: 0, damage_taken: 0, night_changes: 0 }
    }
}

impl<W: OutputWriter> SceneObserver for CountingObserver<W> {
    fn on_events(&mut self, _tick: u64, events: &[GameEvent]) {
        self.deaths += events.iter().filter(|e| matches!(e, GameEvent::Died { .. })).count();
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.damage_taken += report.player_damage;
        if report.night_edge {
            self.night_changes += 1;
        }
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(&mut self, tick: u64, scene: &Scene) {
        self.inner.on_snapshot(tick, scene);
    }

    fn on_scene_end(&mut self, final_tick: u64) {
        self.inner.on_scene_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_json::<SceneConfig>(&path)?,
        None => default_config(),
    };
    let layout = match args.next() {
        Some(path) => load_json::<SceneLayout>(&path)?,
        None => default_layout(),
    };
    info!(
        seed = config.seed,
        ticks = config.total_ticks,
        enemies = layout.enemies.len() + SCATTER_ENEMIES,
        "building scene"
    );

    let mut scene = SceneBuilder::new(config)
        .layout(layout)
        .scatter_enemies(SCATTER_ENEMIES, Rect::new(200.0, -200.0, 600.0, 400.0))
        .build()
        .context("building scene")?;

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer));

    let t0 = Instant::now();
    scene.run(&mut obs, scripted_input)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Scene complete in {:.3} s", elapsed.as_secs_f64());
    println!("  deaths        : {}", obs.deaths);
    println!("  damage taken  : {}", obs.damage_taken);
    println!("  night changes : {}", obs.night_changes);
    println!();

    println!("{:<8} {:<8} {:<16} {:>6} {:>16}", "Agent", "Kind", "State", "HP", "Position");
    println!("{}", "-".repeat(58));
    for agent in scene.agents() {
        println!(
            "{:<8} {:<8} {:<16} {:>6} {:>16}",
            agent.id().0,
            agent.entity_type().as_str(),
            agent.state_name(),
            agent.health(),
            agent.position().to_string(),
        );
    }

    Ok(())
}
