//! High score storage backends
//!
//! The game only needs a single integer kept between sessions:
//! - `MemoryStore`: in-process, used by tests and as a fallback
//! - `FileStore`: JSON document on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// LocalStorage key, shared with earlier builds of the game
pub const HIGH_SCORE_KEY: &str = "dodge_high";

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed high score data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable get/set for the best score
pub trait HighScoreStore {
    /// Stored high score, `Ok(None)` when nothing has been saved yet
    fn read_high_score(&self) -> StoreResult<Option<u32>>;

    fn write_high_score(&mut self, score: u32) -> StoreResult<()>;
}

/// Keeps the score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&self) -> StoreResult<Option<u32>> {
        Ok(self.value)
    }

    fn write_high_score(&mut self, score: u32) -> StoreResult<()> {
        self.value = Some(score);
        Ok(())
    }
}

/// On-disk document layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Stores the score as a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn read_high_score(&self) -> StoreResult<Option<u32>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: HighScoreFile = serde_json::from_str(&json)?;
        Ok(Some(file.high_score))
    }

    fn write_high_score(&mut self, score: u32) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score: score })?;
        // Atomic replace via a sibling temp file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Parse the plain integer format used in LocalStorage
pub fn parse_stored_score(raw: &str) -> StoreResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|err| StoreError::Malformed(format!("{raw:?}: {err}")))
}

/// Browser LocalStorage under `HIGH_SCORE_KEY`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> StoreResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read_high_score(&self) -> StoreResult<Option<u32>> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(HIGH_SCORE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        raw.map(|raw| parse_stored_score(&raw)).transpose()
    }

    fn write_high_score(&mut self, score: u32) -> StoreResult<()> {
        Self::storage()?
            .set_item(HIGH_SCORE_KEY, &score.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dodge-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_high_score().unwrap(), None);
        store.write_high_score(12).unwrap();
        assert_eq!(store.read_high_score().unwrap(), Some(12));
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = FileStore::new(temp_path("missing"));
        let _ = std::fs::remove_file(store.path());
        assert_eq!(store.read_high_score().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let mut store = FileStore::new(&path);
        store.write_high_score(41).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.read_high_score().unwrap(), Some(41));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_malformed() {
        let path = temp_path("malformed");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.read_high_score(), Err(StoreError::Malformed(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_stored_score() {
        assert_eq!(parse_stored_score("17").unwrap(), 17);
        assert_eq!(parse_stored_score(" 3\n").unwrap(), 3);
        assert!(parse_stored_score("").is_err());
        assert!(parse_stored_score("-4").is_err());
        assert!(parse_stored_score("abc").is_err());
    }
}
