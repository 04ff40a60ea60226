//! Best score tracking
//!
//! Loaded once from a store, then written through on every improvement so an
//! abrupt exit never loses it. If the store fails the tracker keeps going in
//! memory only.

use crate::persistence::HighScoreStore;

/// Best score across sessions
#[derive(Debug)]
pub struct HighScores {
    best: u64,
    store: Option<Box<dyn HighScoreStore>>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl HighScores {
    /// Tracker with no backing store
    pub fn in_memory() -> Self {
        Self {
            best: 0,
            store: None,
        }
    }

    /// Load the stored best score. Storage failures degrade to in-memory.
    pub fn load(mut store: Box<dyn HighScoreStore>) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self {
                    best,
                    store: Some(store),
                }
            }
            Err(crate::StorageError::Corrupt(msg)) => {
                // Overwritten by the next improvement
                log::warn!("Ignoring corrupt high score ({}), starting fresh", msg);
                Self {
                    best: 0,
                    store: Some(store),
                }
            }
            Err(err) => {
                log::warn!("High score storage unavailable: {}; scores won't persist", err);
                Self::in_memory()
            }
        }
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether improvements are still being written to storage
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Offer a score. Returns true (and persists) when it beats the best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.persist();
        true
    }

    fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        match store.save(self.best) {
            Ok(()) => log::debug!("High score saved ({})", self.best),
            Err(err) => {
                log::warn!("Failed to save high score: {}; continuing without persistence", err);
                self.store = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::MemoryStore;

    #[derive(Debug)]
    struct BrokenStore {
        load_error: bool,
    }

    impl HighScoreStore for BrokenStore {
        fn load(&mut self) -> Result<u64, StorageError> {
            if self.load_error {
                Err(StorageError::Unavailable)
            } else {
                Ok(10)
            }
        }

        fn save(&mut self, _score: u64) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[derive(Debug)]
    struct CorruptStore;

    impl HighScoreStore for CorruptStore {
        fn load(&mut self) -> Result<u64, StorageError> {
            Err(StorageError::Corrupt("NaN".into()))
        }

        fn save(&mut self, _score: u64) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_loads_and_persists_on_change() {
        let handle = MemoryStore::with_score(100);
        let mut scores = HighScores::load(Box::new(handle.clone()));
        assert_eq!(scores.best(), 100);

        assert!(!scores.submit(50));
        assert!(!scores.submit(100));
        assert_eq!(handle.save_count(), 0);

        assert!(scores.submit(101));
        assert!(scores.submit(140));
        assert_eq!(handle.value(), 140);
        assert_eq!(handle.save_count(), 2);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut scores = HighScores::load(Box::new(BrokenStore { load_error: true }));
        assert!(!scores.is_persistent());
        assert!(scores.submit(5));
        assert_eq!(scores.best(), 5);
    }

    #[test]
    fn test_failed_save_keeps_score_in_memory() {
        let mut scores = HighScores::load(Box::new(BrokenStore { load_error: false }));
        assert_eq!(scores.best(), 10);
        assert!(scores.is_persistent());
        assert!(scores.submit(20));
        assert!(!scores.is_persistent());
        assert!(scores.submit(30));
        assert_eq!(scores.best(), 30);
    }

    #[test]
    fn test_corrupt_value_starts_fresh() {
        let scores = HighScores::load(Box::new(CorruptStore));
        assert_eq!(scores.best(), 0);
        assert!(scores.is_persistent());
    }
}
