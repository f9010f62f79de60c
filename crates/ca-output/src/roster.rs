//! Paginated citizen listing built from a snapshot.

use std::fmt;

use ca_fsm::StateId;
use ca_sim::AgentSnapshot;

/// Citizens shown per page.
pub const CITIZENS_PER_PAGE: usize = 9;

/// One page of the roster.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterPage<'a, S> {
    /// 1-based page actually shown.
    pub page:       usize,
    pub page_count: usize,
    pub entries:    &'a [AgentSnapshot<S>],
}

impl<'a, S: StateId> RosterPage<'a, S> {
    /// Page `requested` (1-based) of `agents`.  Out-of-range requests show
    /// the first page.
    pub fn new(agents: &'a [AgentSnapshot<S>], requested: usize) -> Self {
        let page_count = agents.len().div_ceil(CITIZENS_PER_PAGE);
        let page = if (1..=page_count).contains(&requested) { requested } else { 1 };
        let start = (page - 1) * CITIZENS_PER_PAGE;
        let entries = agents.get(start..agents.len().min(start + CITIZENS_PER_PAGE)).unwrap_or(&[]);
        Self { page, page_count, entries }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

impl<S: StateId> fmt::Display for RosterPage<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------------------ page {} of {} ------------------", self.page, self.page_count)?;
        for a in self.entries {
            write!(f, "ID: {:<4} state: {:<10}", a.citizen.0, a.state.to_string())?;
            if a.halted {
                f.write_str(" [halted]")?;
            }
            if let Some(status) = &a.status {
                write!(f, " {status}")?;
            }
            writeln!(f)?;
        }
        match (self.has_prev(), self.has_next()) {
            (true, true)   => writeln!(f, " <- prev | next ->"),
            (true, false)  => writeln!(f, " <- prev"),
            (false, true)  => writeln!(f, "next ->"),
            (false, false) => Ok(()),
        }
    }
}
