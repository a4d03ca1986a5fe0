use core::result::Result;

use crate::*;

/// Key-value backend holding the persisted high score.
pub trait HighScoreStore {
    /// Reads the stored value, `None` when it was never written.
    fn load(&self) -> Result<Option<Score>, StoreError>;

    fn save(&mut self, high_score: Score) -> Result<(), StoreError>;
}

/// Keeps the high score in memory only, for tests and hosts without storage.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    value: Option<Score>,
}

impl MemoryStore {
    pub const fn with_high_score(high_score: Score) -> Self {
        Self {
            value: Some(high_score),
        }
    }

    pub const fn value(&self) -> Option<Score> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<Score>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, high_score: Score) -> Result<(), StoreError> {
        self.value = Some(high_score);
        Ok(())
    }
}

/// Cached high score in front of a store. Store failures are logged and never
/// surface to the game.
#[derive(Clone, Debug, PartialEq)]
pub struct HighScoreBoard<S> {
    store: S,
    best: Score,
}

impl<S: HighScoreStore> HighScoreBoard<S> {
    pub fn load(mut store: S) -> Self {
        let best = match store.load() {
            Ok(Some(best)) => best,
            Ok(None) => {
                log::debug!("no high score stored yet, initialising to 0");
                if let Err(err) = store.save(0) {
                    log::warn!("failed to initialise high score: {}", err);
                }
                0
            }
            Err(err) => {
                log::warn!("failed to read high score, using 0 for this session: {}", err);
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> Score {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records `score` if it beats the current best, returns whether it did.
    pub fn submit(&mut self, score: Score) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.persist();
        true
    }

    pub fn reset(&mut self) {
        self.best = 0;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(self.best) {
            log::warn!("failed to save high score {}: {}", self.best, err);
        }
    }
}
