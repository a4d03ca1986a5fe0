use core::fmt;
use serde::{Deserialize, Serialize};

/// Running and persisted scores. Signed since mismatches can drive it below zero.
pub type Score = i64;

/// Logical timestamp, in milliseconds, as supplied by the host.
pub type Millis = u64;

/// Score change applied for every match, and subtracted for every mismatch.
pub const SCORE_STEP: Score = 100;

/// How long a mismatched pair stays face-up before flipping back.
pub const WAITING_PERIOD: Millis = 1000;

/// Interval between two flips of the end-of-round animation.
pub const ANIMATION_PERIOD: Millis = 500;

/// Total length of the end-of-round animation.
pub const ANIMATION_DURATION: Millis = 8000;

/// Position of a card in the shuffled board, stable for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardSlot(pub usize);

impl CardSlot {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CardSlot {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for CardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
}

impl GameStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Where the current pair selection stands, derived from the reveal set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    Idle,
    OneRevealed,
    /// A mismatched pair is face-up and waiting for the reversal timer.
    Resolving,
}

/// Player-visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}
