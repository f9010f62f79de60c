//! Plain data rows written by output backends.

use ca_fsm::StateId;
use ca_sim::{AgentSnapshot, TickSummary};

/// One citizen's status at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStatusRow {
    pub citizen_id:   u32,
    pub tick:         u64,
    pub state:        String,
    pub delay:        u32,
    pub halted:       bool,
    pub actions_done: u32,
    pub managed:      u64,
    /// Empty when the citizen has not reported a status yet.
    pub status:       String,
}

impl AgentStatusRow {
    pub fn from_snapshot<S: StateId>(tick: u64, snap: &AgentSnapshot<S>) -> Self {
        Self {
            citizen_id:   snap.citizen.0,
            tick,
            state:        snap.state.to_string(),
            delay:        snap.delay,
            halted:       snap.halted,
            actions_done: snap.actions_done,
            managed:      snap.managed as u64,
            status:       snap.status.clone().unwrap_or_default(),
        }
    }
}

/// What the citizens did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    /// Simulated time at the start of the tick.
    pub elapsed_ms: u64,
    pub ran:        u64,
    pub delayed:    u64,
    pub blocked:    u64,
    pub failed:     u64,
    pub halted:     u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, elapsed_ms: u64, summary: &TickSummary) -> Self {
        Self {
            tick,
            elapsed_ms,
            ran:     summary.ran as u64,
            delayed: summary.delayed as u64,
            blocked: summary.blocked as u64,
            failed:  summary.failed as u64,
            halted:  summary.halted as u64,
        }
    }
}
