use ca_fsm::FsmError;
use thiserror::Error;

use crate::HerdState;

#[derive(Debug, Error)]
pub enum HerdError {
    #[error("herder configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] FsmError<HerdState>),
}

pub type HerdResult<T> = Result<T, HerdError>;
