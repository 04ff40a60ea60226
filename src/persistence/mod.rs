//! High score storage backends
//!
//! The simulation only needs two calls: read the stored best once at
//! startup, and write it whenever it improves. Backends:
//! - `MemoryStore`: process-local, for tests and headless runs
//! - `JsonFileStore`: JSON file with atomic replace (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::error::StorageError;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "turboRush_highScore";

/// Persistence collaborator for the best score
pub trait HighScoreStore: Debug {
    /// Stored best score; 0 when nothing has been stored yet
    fn load(&mut self) -> Result<u64, StorageError>;
    /// Replace the stored best score
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same slot, so a test can keep one
/// handle and give the other away.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u64>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_score(score: u64) -> Self {
        let store = Self::new();
        store.value.set(score);
        store
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u64, StorageError> {
        Ok(self.value.get())
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
