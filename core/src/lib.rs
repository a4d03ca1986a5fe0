#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use cheat::*;
pub use effect::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use store::*;
pub use timer::*;
pub use types::*;

mod cheat;
mod effect;
mod engine;
mod error;
mod generator;
mod store;
mod timer;
mod types;

/// Faces dealt each round, every face listed exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig<F> {
    pub faces: Vec<F>,
    /// Overrides the computed row size when set.
    pub cards_per_row_hint: Option<usize>,
}

impl<F: PartialEq> RoundConfig<F> {
    pub fn new(faces: Vec<F>) -> Self {
        Self {
            faces,
            cards_per_row_hint: None,
        }
    }

    pub fn with_row_hint(mut self, hint: usize) -> Self {
        self.cards_per_row_hint = Some(hint);
        self
    }

    /// Builds a config listing each of `pairs` twice, in order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = F>) -> Self
    where
        F: Clone,
    {
        let pairs: Vec<F> = pairs.into_iter().collect();
        let mut faces = Vec::with_capacity(pairs.len() * 2);
        faces.extend(pairs.iter().cloned());
        faces.extend(pairs);
        Self::new(faces)
    }

    pub fn card_count(&self) -> usize {
        self.faces.len()
    }

    /// Validates the face list and returns the board layout it produces.
    pub fn layout(&self) -> Result<BoardLayout> {
        let count = self.faces.len();
        if count == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if count % 2 != 0 {
            return Err(ConfigError::OddCardCount { count });
        }

        for (slot, face) in self.faces.iter().enumerate() {
            let occurrences = self.faces.iter().filter(|&other| other == face).count();
            if occurrences != 2 {
                return Err(ConfigError::UnpairedFace { slot, occurrences });
            }
        }

        match self.cards_per_row_hint {
            Some(hint) => BoardLayout::with_row_hint(count, hint),
            None => BoardLayout::new(count),
        }
    }
}
