//! Simulation observer trait for progress reporting and data collection.

use ca_core::{CitizenId, Tick};
use ca_fsm::{FsmError, StateId};

use crate::{AgentSnapshot, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: failure counter
///
/// ```rust,ignore
/// struct Failures(usize);
///
/// impl<S: StateId> SimObserver<S> for Failures {
///     fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
///         self.0 += summary.failed;
///     }
/// }
/// ```
pub trait SimObserver<S: StateId> {
    /// Called at the very start of each tick, before any citizen runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what every citizen did.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with one row per assigned citizen, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentSnapshot<S>]) {}

    /// Called whenever a citizen's tick returns an error.  Fatal errors mean
    /// the citizen's machine has halted.
    fn on_agent_error(&mut self, _tick: Tick, _citizen: CitizenId, _error: &FsmError<S>) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl<S: StateId> SimObserver<S> for NoopObserver {}
