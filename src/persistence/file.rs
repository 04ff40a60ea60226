//! JSON file backend for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::HighScoreStore;
use crate::error::StorageError;

/// On-disk layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredHighScore {
    high_score: u64,
}

/// Stores `{"high_score": n}` in a single file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u64, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredHighScore = serde_json::from_str(&json)?;
        Ok(stored.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let json = serde_json::to_string(&StoredHighScore { high_score: score })?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("turbo_rush_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let mut store = JsonFileStore::new(scratch_path("missing"));
        assert_eq!(store.load().expect("load"), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save(1234).expect("save");
        assert_eq!(JsonFileStore::new(&path).load().expect("load"), 1234);
        assert!(!store.tmp_path().exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = scratch_path("corrupt");
        fs::write(&path, "high score: lots").expect("write fixture");
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
        let _ = fs::remove_file(&path);
    }
}
