use super::*;

/// Unbiased Fisher-Yates shuffle driven by a seeded small RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate<F>(self, mut faces: Vec<F>) -> Result<Vec<F>> {
        use rand::prelude::*;

        check_even(faces.len())?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        // the swap target includes `i` itself, otherwise the permutation is biased
        for i in (1..faces.len()).rev() {
            let j = rng.random_range(0..=i);
            faces.swap(i, j);
        }

        log::trace!("shuffled {} faces with seed {}", faces.len(), self.seed);
        Ok(faces)
    }
}
