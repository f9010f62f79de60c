//! `ca-sim`: the world loop that drives every citizen's state machine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① on_tick_start
//!   ② Citizens: StateMachine::tick for each assigned citizen in ascending
//!                CitizenId order; errors are logged, reported to the
//!                observer, and never abort the loop.
//!   ③ World   : SimWorld::advance (growth, regrowth, …).
//!   ④ on_tick_end(TickSummary)
//!   ⑤ on_snapshot every config.snapshot_interval_ticks ticks.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ca_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, world)
//!     .agent(CitizenId(0), context, registry)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Agent, Sim, SimWorld};
pub use snapshot::{AgentSnapshot, TickSummary};
