//! `ca-output`: status output for colony_ai simulations.
//!
//! | Writer        | Files created                               |
//! |---------------|---------------------------------------------|
//! | [`CsvWriter`] | `agent_status.csv`, `tick_summaries.csv`    |
//!
//! Writers implement [`OutputWriter`] and are driven by [`StatusObserver`],
//! which implements `ca_sim::SimObserver` for any state type.
//! [`RosterPage`] renders a snapshot as a paginated citizen listing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ca_output::{CsvWriter, StatusObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = StatusObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod roster;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatusObserver;
pub use roster::{CITIZENS_PER_PAGE, RosterPage};
pub use row::{AgentStatusRow, TickSummaryRow};
pub use writer::OutputWriter;
