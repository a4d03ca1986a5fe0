use serde::{Deserialize, Serialize};

use crate::*;

/// Debug controls unlocked by cheat mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheatControl {
    ForceWin,
    BoostScore,
    ResetHighScore,
}

impl CheatControl {
    pub const ALL: [CheatControl; 3] = [Self::ForceWin, Self::BoostScore, Self::ResetHighScore];

    /// Whether the control is usable while the round is in `status`.
    pub const fn is_enabled_for(self, status: GameStatus) -> bool {
        match self {
            Self::ForceWin | Self::BoostScore => status.is_in_progress(),
            Self::ResetHighScore => true,
        }
    }
}

/// Instruction for the presentation layer, emitted in the order it must be applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect<F> {
    RoundStarted {
        card_count: usize,
        cards_per_row: usize,
    },
    Reveal {
        slot: CardSlot,
        face: F,
    },
    Hide {
        slot: CardSlot,
    },
    ScoreChanged {
        score: Score,
    },
    GameOver {
        final_score: Score,
        new_high_score: bool,
    },
    HighScoreChanged {
        high_score: Score,
    },
    /// Flip every card once.
    AnimationTick,
    AnimationStopped,
    CheatModeEnabled,
    ControlsEnabled {
        control: CheatControl,
        enabled: bool,
    },
}
