//! `ca-fsm`: the per-agent state machine that sequences citizen work.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`state`]     | `StateId` bound, `Transition` (`Stay` / `To`)                   |
//! | [`delay`]     | `DelayCounter`: ticks to skip before the next transition       |
//! | [`registry`]  | `TargetRegistry`, `RegistryBuilder`, `Cx` handler context       |
//! | [`machine`]   | `StateMachine`, `TickOutcome`                                   |
//! | [`error`]     | `FsmError`, `ActionError`, result aliases                       |
//! | [`inspect`]   | `Inspect`: read-only agent view for presentation               |
//!
//! # Tick model
//!
//! ```text
//! delay > 0            → delay -= 1, nothing runs            (Delayed)
//! interrupt guard ok   → run the interrupt's handler        (Ran)
//! no target for state  → halt the machine, fatal error      (Err Unbound)
//! target guard fails   → nothing runs, state kept           (Blocked)
//! otherwise            → run handler, state := result       (Ran)
//! handler error        → state := registry fallback         (Err Action)
//! ```
//!
//! A registry is built once per behavior type and shared through an `Arc`
//! by every machine of that type.  Everything a handler mutates (the agent
//! context, the delay, the environment) is passed in by exclusive borrow for
//! the duration of one tick only.

pub mod delay;
pub mod error;
pub mod inspect;
pub mod machine;
pub mod registry;
pub mod state;


pub use delay::DelayCounter;
pub use error::{ActionError, ActionResult, FsmError, FsmResult};
pub use inspect::Inspect;
pub use machine::{StateMachine, TickOutcome};
pub use registry::{Cx, RegistryBuilder, TargetRegistry};
pub use state::{StateId, Transition};
