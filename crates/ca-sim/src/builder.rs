//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;
use std::sync::Arc;

use ca_core::{CitizenId, SimConfig};
use ca_fsm::{StateId, StateMachine, TargetRegistry};

use crate::sim::Agent;
use crate::{Sim, SimError, SimResult, SimWorld};

/// Fluent builder for [`Sim<S, A, W>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration, …
/// - `W: SimWorld`: the environment handed to every handler
///
/// Citizens can be added up front with [`agent`](Self::agent) or later with
/// [`Sim::assign`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, pasture)
///     .agent(CitizenId(0), herdsman, Arc::clone(&registry))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S, A, W> {
    config: SimConfig,
    world:  W,
    agents: Vec<(CitizenId, A, Arc<TargetRegistry<S, A, W>>)>,
}

impl<S: StateId, A, W: SimWorld> SimBuilder<S, A, W> {
    pub fn new(config: SimConfig, world: W) -> Self {
        Self { config, world, agents: Vec::new() }
    }

    /// Assign `citizen` a behavior at start-up.
    pub fn agent(mut self, citizen: CitizenId, context: A, registry: Arc<TargetRegistry<S, A, W>>) -> Self {
        self.agents.push((citizen, context, registry));
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// Fails on an invalid config or a citizen added twice.
    pub fn build(self) -> SimResult<Sim<S, A, W>> {
        self.config.validate()?;
        if self.config.total_ticks == 0 {
            return Err(SimError::Config("total_ticks must be positive".into()));
        }

        let mut agents = BTreeMap::new();
        for (citizen, context, registry) in self.agents {
            if agents.contains_key(&citizen) {
                return Err(SimError::AlreadyAssigned(citizen));
            }
            let machine = StateMachine::new(registry);
            agents.insert(citizen, Agent { context, machine });
        }

        Ok(Sim::from_parts(self.config, self.world, agents))
    }
}
