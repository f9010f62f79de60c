//! The per-agent `StateMachine` and its tick algorithm.

use std::sync::Arc;

use tracing::trace;

use crate::{Cx, DelayCounter, FsmError, FsmResult, StateId, TargetRegistry};

/// What one call to [`StateMachine::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome<S> {
    /// The delay was counted down; no handler ran.
    Delayed { remaining: u32 },
    /// The current state's guard failed; no handler ran.
    Blocked { state: S },
    /// Exactly one handler ran.  `from == to` for a self-loop.
    Ran { from: S, to: S },
    /// The machine was halted by an earlier configuration error.
    Halted,
}

impl<S> TickOutcome<S> {
    #[inline]
    pub fn ran(&self) -> bool {
        matches!(self, TickOutcome::Ran { .. })
    }
}

/// One agent's current state, delay, and a handle on its behavior's
/// registry.
///
/// Created when a citizen is assigned a behavior and dropped when it is
/// unassigned.  Holds no history beyond the current state.
pub struct StateMachine<S, A, E> {
    registry: Arc<TargetRegistry<S, A, E>>,
    state:    S,
    delay:    DelayCounter,
    halted:   bool,
}

impl<S: StateId, A, E> StateMachine<S, A, E> {
    /// A machine in the registry's entry state with no delay.
    pub fn new(registry: Arc<TargetRegistry<S, A, E>>) -> Self {
        let state = registry.entry();
        Self { registry, state, delay: DelayCounter::new(), halted: false }
    }

    /// Start in `state` instead of the entry state.
    pub fn with_state(mut self, state: S) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn delay(&self) -> u32 {
        self.delay.remaining()
    }

    /// Overwrite the delay from outside a handler (world events, tests).
    pub fn set_delay(&mut self, ticks: u32) {
        self.delay.set(ticks);
    }

    /// `true` once an unbound state has stopped this machine.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn registry(&self) -> &Arc<TargetRegistry<S, A, E>> {
        &self.registry
    }

    /// Advance this agent by one world tick.
    ///
    /// Runs at most one handler.  A missing target halts the machine and
    /// returns [`FsmError::Unbound`]; every later tick returns
    /// [`TickOutcome::Halted`] without touching the registry again.  A
    /// handler error resets the state to the registry's fallback and is
    /// returned as [`FsmError::Action`].
    pub fn tick(&mut self, agent: &mut A, env: &mut E) -> FsmResult<TickOutcome<S>, S> {
        if self.halted {
            return Ok(TickOutcome::Halted);
        }
        if !self.delay.is_ready() {
            self.delay.tick();
            return Ok(TickOutcome::Delayed { remaining: self.delay.remaining() });
        }

        let registry = &self.registry;
        let current = self.state;

        let action = match registry.pending_interrupt(&*agent, &*env) {
            Some(interrupt) => &interrupt.action,
            None => {
                let Some(target) = registry.resolve(current) else {
                    self.halted = true;
                    return Err(FsmError::Unbound { registry: registry.name(), state: current });
                };
                if let Some(guard) = &target.guard {
                    if !guard(&*agent, &*env) {
                        return Ok(TickOutcome::Blocked { state: current });
                    }
                }
                &target.action
            }
        };

        let result = {
            let mut cx = Cx::new(&mut *agent, &mut *env, current, &mut self.delay);
            action(&mut cx)
        };

        let next = match result {
            Ok(transition) => transition.resolve(current),
            Err(source) => {
                let fallback = registry.fallback();
                self.state = fallback;
                if fallback != current {
                    registry.notify_transition(agent, current, fallback);
                }
                return Err(FsmError::Action { state: current, source });
            }
        };

        self.state = next;
        if next != current {
            trace!(registry = registry.name(), from = %current, to = %next, "transition");
            registry.notify_transition(agent, current, next);
        }
        Ok(TickOutcome::Ran { from: current, to: next })
    }
}
