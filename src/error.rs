//! Error types for AGC configuration and control.

use thiserror::Error;

/// Result type for AGC operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving an AGC.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A configuration value violates its constraint.
    ///
    /// The AGC state is left unchanged when this is returned.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The loop was asked to run with a selector it does not know.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Create an invalid argument error with a custom message
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create an invalid state error with a custom message
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Error::InvalidState(msg.into())
    }
}
