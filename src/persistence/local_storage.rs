//! Browser LocalStorage backend

use super::{HIGH_SCORE_KEY, HighScoreStore};
use crate::error::StorageError;

/// Stores the best score as a decimal string under one key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_KEY)
    }
}

impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<u64, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(value)) => value
                .trim()
                .parse()
                .map_err(|_| StorageError::Corrupt(value)),
            Ok(None) => Ok(0),
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|_| StorageError::Unavailable)
    }
}
