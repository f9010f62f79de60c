//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use ca_core::{CitizenId, CoreError, SimClock, SimConfig, Tick};
use ca_fsm::{FsmError, Inspect, StateId, StateMachine, TargetRegistry, TickOutcome};

use crate::{AgentSnapshot, SimError, SimObserver, SimResult, TickSummary};

// ── SimWorld ──────────────────────────────────────────────────────────────────

/// The environment every citizen's handlers act on.
///
/// `advance` runs once per tick after all citizens, for world-side changes
/// such as growth.  The default does nothing.
pub trait SimWorld {
    fn advance(&mut self, _tick: Tick) {}
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One assigned citizen: its context and its state machine.
pub struct Agent<S, A, W> {
    pub context: A,
    pub machine: StateMachine<S, A, W>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The world loop.
///
/// Once per tick every assigned citizen whose machine has not halted gets
/// exactly one [`StateMachine::tick`], in ascending `CitizenId` order.  A
/// failing citizen never stops the others:
///
/// - a recoverable handler failure is logged at `warn` and the citizen
///   continues from its registry's fallback state next tick;
/// - a fatal configuration error is logged at `error` and the citizen's
///   machine stays halted (it remains assigned and shows up in snapshots).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S, A, W> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Shared environment passed to every handler.
    pub world: W,

    agents: BTreeMap<CitizenId, Agent<S, A, W>>,
}

impl<S: StateId, A, W: SimWorld> Sim<S, A, W> {
    pub(crate) fn from_parts(config: SimConfig, world: W, agents: BTreeMap<CitizenId, Agent<S, A, W>>) -> Self {
        Self { clock: config.make_clock(), config, world, agents }
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Give `citizen` a behavior.  Its machine starts in the registry's
    /// entry state with no delay.
    pub fn assign(
        &mut self,
        citizen:  CitizenId,
        context:  A,
        registry: Arc<TargetRegistry<S, A, W>>,
    ) -> SimResult<()> {
        if self.agents.contains_key(&citizen) {
            return Err(SimError::AlreadyAssigned(citizen));
        }
        debug!(%citizen, behavior = registry.name(), "assigned");
        let machine = StateMachine::new(registry);
        self.agents.insert(citizen, Agent { context, machine });
        Ok(())
    }

    /// Remove `citizen`'s behavior, dropping its machine and returning its
    /// context.
    pub fn unassign(&mut self, citizen: CitizenId) -> SimResult<A> {
        let agent = self.agents.remove(&citizen).ok_or(CoreError::CitizenNotFound(citizen))?;
        debug!(%citizen, state = %agent.machine.state(), "unassigned");
        Ok(agent.context)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Assigned citizens in ascending order.
    pub fn citizens(&self) -> impl Iterator<Item = CitizenId> + '_ {
        self.agents.keys().copied()
    }

    pub fn agent(&self, citizen: CitizenId) -> Option<&Agent<S, A, W>> {
        self.agents.get(&citizen)
    }

    pub fn agent_mut(&mut self, citizen: CitizenId) -> Option<&mut Agent<S, A, W>> {
        self.agents.get_mut(&citizen)
    }

    /// Current state of `citizen`'s machine.
    pub fn state(&self, citizen: CitizenId) -> Option<S> {
        self.agents.get(&citizen).map(|a| a.machine.state())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver<S>>(&mut self, observer: &mut O) -> SimResult<()>
    where
        A: Inspect,
    {
        info!(
            citizens = self.agents.len(),
            start = %self.clock.current_tick,
            end = %self.config.end_tick(),
            "simulation starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(clock = %self.clock, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver<S>>(&mut self, n: u64, observer: &mut O) -> SimResult<()>
    where
        A: Inspect,
    {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// One full tick: every citizen, then the world, then the snapshot.
    pub fn step<O: SimObserver<S>>(&mut self, observer: &mut O) -> TickSummary
    where
        A: Inspect,
    {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer);
        observer.on_tick_end(now, &summary);
        if self.config.is_snapshot_tick(now) {
            observer.on_snapshot(now, &self.snapshot());
        }
        self.clock.advance();
        summary
    }

    /// One row per assigned citizen, ascending id.
    pub fn snapshot(&self) -> Vec<AgentSnapshot<S>>
    where
        A: Inspect,
    {
        self.agents
            .iter()
            .map(|(&citizen, agent)| AgentSnapshot {
                citizen,
                state:        agent.machine.state(),
                delay:        agent.machine.delay(),
                halted:       agent.machine.is_halted(),
                actions_done: agent.context.actions_done(),
                managed:      agent.context.managed(),
                status:       agent.context.status(),
            })
            .collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver<S>>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        let mut summary = TickSummary::default();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let world = &mut self.world;
        for (&citizen, agent) in self.agents.iter_mut() {
            match agent.machine.tick(&mut agent.context, world) {
                Ok(TickOutcome::Ran { .. }) => summary.ran += 1,
                Ok(TickOutcome::Delayed { .. }) => summary.delayed += 1,
                Ok(TickOutcome::Blocked { .. }) => summary.blocked += 1,
                Ok(TickOutcome::Halted) => summary.halted += 1,
                Err(err) => {
                    report(now, citizen, &err);
                    if err.is_fatal() {
                        summary.halted += 1;
                    } else {
                        summary.failed += 1;
                    }
                    observer.on_agent_error(now, citizen, &err);
                }
            }
        }

        world.advance(now);
        summary
    }
}

fn report<S: StateId>(now: Tick, citizen: CitizenId, err: &FsmError<S>) {
    if err.is_fatal() {
        error!(tick = %now, %citizen, error = %err, "citizen halted");
    } else {
        warn!(tick = %now, %citizen, error = %err, "handler failed, falling back");
    }
}
