//! Errors returned by the engine
//!
//! Every variant is recoverable: a failed call leaves the engine untouched.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Wager was zero, negative, or not a number
    #[error("wager must be a positive amount, got {0}")]
    InvalidWager(f64),
    /// Live-ball cap reached; the spawn was rejected, not queued
    #[error("board is full ({max} balls in flight)")]
    Capacity { max: usize },
    /// Board or bucket configuration is unusable
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl EngineError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::InvalidWager(-1.0).to_string(),
            "wager must be a positive amount, got -1"
        );
        assert_eq!(
            EngineError::Capacity { max: 5 }.to_string(),
            "board is full (5 balls in flight)"
        );
        assert_eq!(
            EngineError::config("multiplier table is empty").to_string(),
            "invalid configuration: multiplier table is empty"
        );
    }
}
