//! Framework error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the few
//! fallible operations on core types (id conversion, config validation).

use thiserror::Error;

use crate::CitizenId;

/// The top-level error type for `ca-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("citizen {0} not found")]
    CitizenNotFound(CitizenId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("dye index {0} out of range (expected 0..16)")]
    DyeIndex(u8),
}

/// Shorthand result type for `ca-core`.
pub type CoreResult<T> = Result<T, CoreError>;
