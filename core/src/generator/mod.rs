use alloc::vec::Vec;

use crate::*;
pub use layout::*;
pub use random::*;

mod layout;
mod random;

/// Produces the face order for a new round.
pub trait BoardGenerator {
    fn generate<F>(self, faces: Vec<F>) -> Result<Vec<F>>;
}

/// Keeps the faces in the order they were given.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PresetBoardGenerator;

impl BoardGenerator for PresetBoardGenerator {
    fn generate<F>(self, faces: Vec<F>) -> Result<Vec<F>> {
        check_even(faces.len())?;
        Ok(faces)
    }
}

/// Shuffles `faces` with a generator seeded from `seed`.
pub fn generate_board<F>(faces: Vec<F>, seed: u64) -> Result<Vec<F>> {
    RandomBoardGenerator::new(seed).generate(faces)
}

pub(crate) fn check_even(count: usize) -> Result<()> {
    if count % 2 == 0 {
        Ok(())
    } else {
        Err(ConfigError::OddCardCount { count })
    }
}
