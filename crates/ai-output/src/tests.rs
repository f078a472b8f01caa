//! Unit and integration tests for ai-output.

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use ai_agent::EntityType;
    use ai_core::{AgentId, Facing};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentTraceRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent: u32, kind: EntityType, state: &'static str) -> AgentTraceRow {
        AgentTraceRow {
            tick:       5,
            agent:      AgentId(agent),
            kind,
            state,
            x:          12.5,
            y:          -3.25,
            hit_points: 20,
            facing:     Facing::Left,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("agent_trace.csv").exists());
        assert!(dir.path().join("tick_summary.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("first");
        let mut w = CsvWriter::new(&nested).unwrap();
        w.finish().unwrap();
        assert!(nested.join("agent_trace.csv").exists());
    }

    #[test]
    fn csv_trace_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_trace.csv")).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            ["tick", "agent", "kind", "state", "x", "y", "hp", "facing"]
        );
    }

    #[test]
    fn csv_summary_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summary.csv")).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            ["tick", "elapsed_ms", "is_night", "events", "player_damage", "kills"]
        );
    }

    #[test]
    fn csv_trace_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trace(&[
            row(0, EntityType::Player, "idle"),
            row(1, EntityType::Enemy, "pursuing"),
        ])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_trace.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "player");
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][3], "pursuing");
        assert_eq!(&rows[1][4], "12.50");
        assert_eq!(&rows[1][5], "-3.25");
        assert_eq!(&rows[1][7], "left");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:          3,
            elapsed_ms:    300,
            is_night:      true,
            events:        2,
            player_damage: 10,
            kills:         1,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "300", "1", "2", "10", "1"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_trace_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trace(&[]).unwrap();
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use ai_behavior::InputSnapshot;
    use ai_core::{SceneConfig, Vec2};
    use ai_sim::SceneBuilder;
    use tempfile::TempDir;

    use crate::row::{AgentTraceRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult, TraceObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config() -> SceneConfig {
        SceneConfig {
            seed:                    3,
            tick_ms:                 100.0,
            total_ticks:             10,
            snapshot_interval_ticks: 5,
            time_scale:              1.0,
            day_length_ms:           0,
        }
    }

    /// Collects rows in memory and can be told to fail.
    #[derive(Default)]
    struct MemoryWriter {
        trace:     Vec<AgentTraceRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  usize,
        fail:      bool,
    }

    impl OutputWriter for MemoryWriter {
        fn write_trace(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.trace.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn rows_follow_ticks_and_snapshots() {
        let mut scene = SceneBuilder::new(config())
            .player_at(Vec2::ZERO)
            .enemy_at(Vec2::new(800.0, 0.0))
            .npc_at(Vec2::new(-800.0, 0.0))
            .build()
            .unwrap();

        let mut obs = TraceObserver::new(MemoryWriter::default());
        scene.run(&mut obs, |_| InputSnapshot::default()).unwrap();
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.summaries.len(), 10);
        assert_eq!(writer.summaries[9].tick, 10);
        assert_eq!(writer.summaries[9].elapsed_ms, 1_000);

        // Snapshots at ticks 5 and 10, three agents each.
        assert_eq!(writer.trace.len(), 6);
        assert_eq!(writer.trace[0].tick, 5);
        assert_eq!(writer.trace[3].tick, 10);
        assert_eq!(writer.trace[0].kind.as_str(), "player");
        assert_eq!(writer.trace[1].kind.as_str(), "enemy");
        assert_eq!(writer.trace[2].kind.as_str(), "npc");
        assert_eq!(writer.finished, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut scene = SceneBuilder::new(config()).build().unwrap();
        let writer = MemoryWriter { fail: true, ..MemoryWriter::default() };

        let mut obs = TraceObserver::new(writer);
        scene.run(&mut obs, |_| InputSnapshot::default()).unwrap();

        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none(), "error is taken once");
    }

    #[test]
    fn integration_csv() {
        let mut scene = SceneBuilder::new(config())
            .enemy_at(Vec2::new(400.0, 0.0))
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TraceObserver::new(writer);
        scene.run(&mut obs, |_| InputSnapshot::default()).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_trace.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4, "expected 2 snapshots × 2 agents, got {}", rows.len());
        assert_eq!(&rows[0][1], "0");
        assert_eq!(&rows[0][3], "idle");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summary.csv")).unwrap();
        assert_eq!(rdr.records().count(), 10);
    }
}
