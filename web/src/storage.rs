use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use pairmatch_core::{HighScoreStore, Score, StoreError};

pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// High score kept in the browser's `localStorage`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalHighScore;

impl StorageKey for LocalHighScore {
    const KEY: &'static str = "highscore";
}

impl HighScoreStore for LocalHighScore {
    fn load(&self) -> Result<Option<Score>, StoreError> {
        match LocalStorage::get::<Score>(Self::KEY) {
            Ok(high_score) => Ok(Some(high_score)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => Err(StoreError::Malformed(err.to_string())),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    fn save(&mut self, high_score: Score) -> Result<(), StoreError> {
        LocalStorage::set(Self::KEY, high_score)
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}
