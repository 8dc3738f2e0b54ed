//! Error types shared by every stage of the engine

use thiserror::Error;

/// Errors surfaced by the dice parser, the context compiler and the simulator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DprError {
    /// A die expression did not match `NdS`, `NdS+M`, `NdS-M` or a plain integer
    #[error("Invalid die expression '{input}': {reason}")]
    Parse { input: String, reason: String },
    /// A numeric input was out of range (trial count, armor class, level, ...)
    #[error("Validation error: {0}")]
    Validation(String),
    /// The rules inputs contradict each other (e.g. a save without a save stat)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DprError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        DprError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DprError::Validation(message.into())
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        DprError::Configuration(message.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DprError>;
