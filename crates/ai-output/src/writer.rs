//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

/// A sink for agent traces and tick summaries.
///
/// Errors surface from the observer through
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Write one batch of agent rows (one snapshot).
    fn write_trace(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
