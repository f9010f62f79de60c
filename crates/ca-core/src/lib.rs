//! `ca-core`: foundational types for the `colony_ai` citizen scheduler.
//!
//! This crate is a dependency of every other `ca-*` crate.  It intentionally
//! has no `ca-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CitizenId`, `EntityId`, `BuildingId`                 |
//! | [`pos`]         | `BlockPos`, block distances                           |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-citizen), `SimRng` (global)           |
//! | [`item`]        | `ItemKind`, `ItemStack`, `ToolType`, `DyeColor`       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod item;
pub mod pos;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{BuildingId, CitizenId, EntityId};
pub use item::{DyeColor, ItemKind, ItemStack, ToolType};
pub use pos::BlockPos;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
