//! `StatusObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::debug;

use ca_core::{CitizenId, SimConfig, Tick};
use ca_fsm::{FsmError, StateId};
use ca_sim::{AgentSnapshot, SimObserver, TickSummary};

use crate::row::{AgentStatusRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes citizen status rows and tick summaries to
/// any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct StatusObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u64,
    agent_errors:     u64,
    rows_written:     u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> StatusObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to elapsed time.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: u64::from(config.tick_duration_ms),
            agent_errors: 0,
            rows_written: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Handler failures seen so far, recoverable and fatal.
    pub fn agent_errors(&self) -> u64 {
        self.agent_errors
    }

    /// Status rows handed to the writer so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

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

impl<S: StateId, W: OutputWriter> SimObserver<S> for StatusObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow::new(tick.0, tick.0 * self.tick_duration_ms, summary);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot<S>]) {
        if agents.is_empty() {
            return;
        }
        let rows: Vec<AgentStatusRow> = agents.iter().map(|a| AgentStatusRow::from_snapshot(tick.0, a)).collect();
        let result = self.writer.write_status(&rows);
        if result.is_ok() {
            self.rows_written += rows.len() as u64;
        }
        self.store_err(result);
    }

    fn on_agent_error(&mut self, _tick: Tick, _citizen: CitizenId, _error: &FsmError<S>) {
        self.agent_errors += 1;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
        debug!(tick = %final_tick, rows = self.rows_written, errors = self.agent_errors, "status output closed");
    }
}
