//! Read-only per-citizen rows for presentation and output.

use ca_core::CitizenId;

/// One citizen's state at a snapshot tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot<S> {
    pub citizen:      CitizenId,
    pub state:        S,
    /// Ticks the machine will still skip.
    pub delay:        u32,
    pub halted:       bool,
    pub actions_done: u32,
    /// Entities the citizen currently manages (e.g. herd size).
    pub managed:      usize,
    pub status:       Option<String>,
}

/// What the citizens did during one tick.
///
/// Every assigned citizen is counted in exactly one field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub ran:     usize,
    pub delayed: usize,
    pub blocked: usize,
    /// Recoverable handler failures (machine fell back).
    pub failed:  usize,
    /// Halted machines, including ones that halted this tick.
    pub halted:  usize,
}

impl TickSummary {
    pub fn total(&self) -> usize {
        self.ran + self.delayed + self.blocked + self.failed + self.halted
    }
}
