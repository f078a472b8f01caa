//! `TraceObserver<W>`: bridges `SceneObserver` to an `OutputWriter`.

use ai_behavior::Agent;
use ai_sim::{Scene, SceneObserver, TickReport};

use crate::row::{AgentTraceRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SceneObserver`] that writes a summary row every tick and one trace
/// row per agent at every snapshot.
///
/// Errors from the writer are stored internally because `SceneObserver`
/// methods have no return value.  After `scene.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `scene.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SceneObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let row = TickSummaryRow {
            tick:          report.tick,
            elapsed_ms:    report.now.0,
            is_night:      report.is_night,
            events:        report.events.len() as u64,
            player_damage: report.player_damage,
            kills:         report.kills as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: u64, scene: &Scene) {
        let rows: Vec<AgentTraceRow> = scene
            .agents()
            .map(|agent| {
                let position = agent.position();
                AgentTraceRow {
                    tick,
                    agent:      agent.id(),
                    kind:       agent.entity_type(),
                    state:      agent.state_name(),
                    x:          position.x,
                    y:          position.y,
                    hit_points: agent.health(),
                    facing:     agent.facing(),
                }
            })
            .collect();

        let result = self.writer.write_trace(&rows);
        self.store_err(result);
    }

    fn on_scene_end(&mut self, _final_tick: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
