//! State identifiers and handler results.

use std::fmt;
use std::hash::Hash;

/// Bound for the state labels of a behavior.
///
/// Any small `Copy` enum with `Display` qualifies; the blanket impl means
/// behaviors never implement this by hand.
pub trait StateId: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> StateId for T where T: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// What a handler asks the machine to do next.
///
/// Waiting is spelled `Stay` rather than by returning the current state, so
/// a handler's intent is visible without comparing labels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition<S> {
    /// Keep the current state; run the same target again next eligible tick.
    Stay,
    /// Move to another state (moving to the current one is allowed).
    To(S),
}

impl<S: Copy> Transition<S> {
    /// The state the machine ends up in when this transition is applied to
    /// `current`.
    #[inline]
    pub fn resolve(self, current: S) -> S {
        match self {
            Transition::Stay  => current,
            Transition::To(s) => s,
        }
    }

    #[inline]
    pub fn is_stay(self) -> bool {
        matches!(self, Transition::Stay)
    }
}
