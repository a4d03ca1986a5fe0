use core::ops::Range;
use serde::{Deserialize, Serialize};

use super::*;

/// Row sizes tried, largest first.
const ROW_CANDIDATES: [usize; 4] = [5, 4, 3, 2];

/// Largest row size in `2..=5` that evenly divides `count`.
pub fn cards_per_row(count: usize) -> Result<usize> {
    if count == 0 {
        return Err(ConfigError::EmptyBoard);
    }
    check_even(count)?;

    ROW_CANDIDATES
        .into_iter()
        .find(|&candidate| count % candidate == 0)
        .ok_or(ConfigError::NoRowLayout { count })
}

/// How the presentation layer should split the board into rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    card_count: usize,
    cards_per_row: usize,
}

impl BoardLayout {
    pub fn new(card_count: usize) -> Result<Self> {
        Ok(Self {
            card_count,
            cards_per_row: cards_per_row(card_count)?,
        })
    }

    pub fn with_row_hint(card_count: usize, hint: usize) -> Result<Self> {
        if card_count == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        check_even(card_count)?;
        if hint == 0 || hint > card_count || card_count % hint != 0 {
            return Err(ConfigError::InvalidRowHint {
                hint,
                count: card_count,
            });
        }
        Ok(Self {
            card_count,
            cards_per_row: hint,
        })
    }

    pub const fn card_count(&self) -> usize {
        self.card_count
    }

    pub const fn cards_per_row(&self) -> usize {
        self.cards_per_row
    }

    pub const fn rows(&self) -> usize {
        self.card_count / self.cards_per_row
    }

    /// Slot ranges for each row, top to bottom.
    pub fn row_ranges(&self) -> impl Iterator<Item = Range<usize>> + use<> {
        let per_row = self.cards_per_row;
        (0..self.rows()).map(move |row| row * per_row..(row + 1) * per_row)
    }
}
