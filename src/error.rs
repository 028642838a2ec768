use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("Please enter a participant name")]
    EmptyName,

    #[error("Please add participants before drawing")]
    EmptyRoster,

    #[error(
        "Cannot draw {requested} unique winners from {available} participants. \
         Either reduce the number of winners or enable duplicates."
    )]
    InsufficientPool { requested: usize, available: usize },

    #[error("No winners to export")]
    NoWinnersToExport,

    #[error("Number of winners must be at least 1")]
    InvalidWinnerCount,

    #[error("A draw is already in progress")]
    DrawInProgress,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RaffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_pool_message() {
        let err = RaffleError::InsufficientPool {
            requested: 5,
            available: 3,
        };
        assert!(err.to_string().starts_with("Cannot draw 5 unique winners from 3 participants"));
    }
}
