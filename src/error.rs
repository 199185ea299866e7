//! Recoverable errors.
//!
//! Shape mismatches inside the numeric core are programming errors and panic
//! at the call site. The variants here cover what a caller can get wrong when
//! describing a network or a training run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("network has no input layer")]
    MissingInput,

    #[error("network has no output layer")]
    MissingOutput,

    /// Layer index counts from the input layer at 0.
    #[error("layer {index} has no neurons")]
    EmptyLayer { index: usize },

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
