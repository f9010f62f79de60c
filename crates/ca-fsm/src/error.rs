use std::fmt;

use thiserror::Error;

use crate::{StateId, Transition};

/// A collaborator (world query, pathing, inventory) failed inside a handler.
///
/// Recoverable: the machine falls back to its registry's fallback state and
/// the world loop keeps running every other agent.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{collaborator} failed: {reason}")]
    Collaborator {
        collaborator: &'static str,
        reason:       String,
    },
}

impl ActionError {
    pub fn collaborator(collaborator: &'static str, reason: impl fmt::Display) -> Self {
        ActionError::Collaborator { collaborator, reason: reason.to_string() }
    }
}

/// Result returned by every handler.
pub type ActionResult<S> = Result<Transition<S>, ActionError>;

#[derive(Debug, Error)]
pub enum FsmError<S: StateId> {
    /// The current state has no target.  Fatal for the agent: the machine
    /// halts instead of idling forever.
    #[error("registry `{registry}` has no target for state {state}")]
    Unbound {
        registry: &'static str,
        state:    S,
    },

    /// Two targets were registered for one state.
    #[error("registry `{registry}` binds state {state} more than once")]
    DuplicateTarget {
        registry: &'static str,
        state:    S,
    },

    /// A handler returned a collaborator failure.
    #[error("handler for state {state} failed: {source}")]
    Action {
        state:  S,
        #[source]
        source: ActionError,
    },
}

impl<S: StateId> FsmError<S> {
    /// `true` for configuration defects that stop the agent for good.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FsmError::Action { .. })
    }
}

pub type FsmResult<T, S> = Result<T, FsmError<S>>;
