//! `ai-output`: scene trace writers for the actor-AI runtime.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `agent_trace.csv`, `tick_summary.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `ai_sim::SceneObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ai_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer);
//! scene.run(&mut obs, |_| InputSnapshot::default())?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{AgentTraceRow, TickSummaryRow};
pub use writer::OutputWriter;
