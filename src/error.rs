//! Errors raised while constructing loggers.

use thiserror::Error;

use crate::config::loader::join_errors;
use crate::config::{ConfigError, ValidationError};

#[derive(Debug, Error)]
pub enum LabelError {
    /// The logger configuration failed semantic validation.
    #[error("invalid label configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("logger name must not be empty")]
    EmptyName,

    /// `get` was called on a logger that does not belong to a live registry.
    #[error("cannot create `{0}`: logger is not attached to a registry")]
    Detached(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type LabelResult<T> = Result<T, LabelError>;
