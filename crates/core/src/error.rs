use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by core domain validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TomError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("invalid radius: {0}")]
    InvalidRadius(String),

    #[error("invalid target type: {0}")]
    InvalidTargetType(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, TomError>;
