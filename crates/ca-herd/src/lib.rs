//! `ca-herd`: herding behaviors on top of the `ca-fsm` state machine.
//!
//! # Layers
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`collab`]    | `HerdWorld`, `ShearWorld`, `Inventory`, `Creature`        |
//! | [`herdsman`]  | `Herdsman` agent context, `Hut`, `Status`                 |
//! | [`satchel`]   | `Satchel`, an in-memory `Inventory`                       |
//! | [`policy`]    | `HerderPolicy` tunables                                   |
//! | [`herder`]    | `Herder` + `HerdStrategy`, the shared decision handlers   |
//! | [`shepherd`]  | `Shepherd`, the sheep-shearing strategy                   |
//!
//! A concrete job is a [`HerdStrategy`].  Wrapping it in a [`Herder`] and
//! calling [`Herder::registry`] yields a registry every citizen with that
//! job shares:
//!
//! ```ignore
//! let registry = Shepherd::registry::<Pasture, Satchel>(
//!     Shepherd::default_policy(),
//!     ShepherdConfig::default(),
//! )?;
//! let machine = StateMachine::new(registry);
//! ```

pub mod collab;
pub mod error;
pub mod herder;
pub mod herdsman;
pub mod policy;
pub mod satchel;
pub mod shepherd;
pub mod state;


pub use collab::{Creature, CreatureKind, HerdWorld, Inventory, PathStatus, ShearWorld};
pub use error::{HerdError, HerdResult};
pub use herder::{HerdCx, HerdRegistry, HerdStrategy, Herder};
pub use herdsman::{Herdsman, Hut, Status};
pub use policy::HerderPolicy;
pub use satchel::{Satchel, Tool};
pub use shepherd::{Shepherd, ShepherdConfig};
pub use state::HerdState;
