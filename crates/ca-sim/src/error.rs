use ca_core::{CitizenId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("citizen {0} already has a behavior assigned")]
    AlreadyAssigned(CitizenId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
