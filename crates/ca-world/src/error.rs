//! World error type.

use thiserror::Error;

use ca_core::EntityId;
use ca_fsm::ActionError;

/// Errors produced by `ca-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0} not found in pasture")]
    UnknownEntity(EntityId),

    #[error("entity {0} cannot be sheared")]
    NotShearable(EntityId),

    #[error("{a} and {b} cannot breed")]
    NotBreedable { a: EntityId, b: EntityId },
}

pub type WorldResult<T> = Result<T, WorldError>;

impl From<WorldError> for ActionError {
    fn from(err: WorldError) -> Self {
        ActionError::collaborator("world", err)
    }
}
