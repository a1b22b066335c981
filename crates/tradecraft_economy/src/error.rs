//! # Economy Error Types
//!
//! The unchecked formulas never fail. Errors only come from the validated
//! input layer and from loading rate configuration.

use thiserror::Error;

/// Errors that can occur in the economy library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// A caller-supplied value is outside the domain of a formula.
    #[error("invalid input for {parameter}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Rate configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rate configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

impl EconomyError {
    /// Shorthand for an [`EconomyError::InvalidInput`].
    pub(crate) fn invalid_input(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
