//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentStatusRow, OutputResult, TickSummaryRow};

/// A sink for status rows.
///
/// Errors are surfaced to the caller; [`StatusObserver`][crate::StatusObserver]
/// stores the first one since observer hooks cannot fail.
pub trait OutputWriter {
    /// Write a batch of citizen status rows.
    fn write_status(&mut self, rows: &[AgentStatusRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
