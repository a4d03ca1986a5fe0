use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board has no cards")]
    EmptyBoard,
    #[error("Invalid card count {count}, must be an even number")]
    OddCardCount { count: usize },
    #[error("Face value at slot {slot} appears {occurrences} times, expected exactly 2")]
    UnpairedFace { slot: usize, occurrences: usize },
    #[error("No row size between 2 and 5 evenly divides {count} cards")]
    NoRowLayout { count: usize },
    #[error("Row size {hint} does not evenly divide {count} cards")]
    InvalidRowHint { hint: usize, count: usize },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Failure reported by a [`HighScoreStore`](crate::HighScoreStore) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("High score storage is unavailable: {0}")]
    Unavailable(String),
    #[error("Stored high score is not an integer: {0}")]
    Malformed(String),
}
