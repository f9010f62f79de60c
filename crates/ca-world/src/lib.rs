//! `ca-world`: an in-memory world for herding citizens.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`pasture`] | `Pasture` (creatures + R-tree index + hut storage)          |
//! | [`pather`]  | `Pather` trait, `StraightPather`                            |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |
//!
//! `Pasture` implements `HerdWorld` and `ShearWorld` from `ca-herd`, and
//! `SimWorld` from `ca-sim` so it ages its animals between ticks.

pub mod error;
pub mod pasture;
pub mod pather;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use pasture::{BREED_COOLDOWN, CHILD_AGE, Pasture};
pub use pather::{Pather, StraightPather};
