//! High score storage backends
//!
//! The only value that outlives a session is a single integer. Backends:
//! - `MemoryStore`: in-process (tests, storage-less environments)
//! - `FileStore`: JSON scalar on disk, written via tmp file + rename (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Backends report failures; [`crate::HighScores`] is responsible for absorbing them.

use thiserror::Error;

/// Why a backend could not load or save
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored high score is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistence collaborator injected into the round controller
pub trait ScoreStore {
    /// Stored high score, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<u64>, StorageError>;
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        (**self).save(score)
    }
}

/// Keeps the score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.value = Some(score);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{ScoreStore, StorageError};

    /// High score kept as a JSON number in a single file
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

        fn tmp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            PathBuf::from(tmp)
        }
    }

    impl ScoreStore for FileStore {
        fn load(&self) -> Result<Option<u64>, StorageError> {
            match fs::read_to_string(&self.path) {
                Ok(text) => Ok(Some(serde_json::from_str(text.trim())?)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&mut self, score: u64) -> Result<(), StorageError> {
            let tmp = self.tmp_path();
            fs::write(&tmp, serde_json::to_string(&score)?)?;
            fs::rename(&tmp, &self.path)?;
            log::debug!("High score {} written to {}", score, self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{ScoreStore, StorageError};

    /// High score in browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStore;

    impl LocalStore {
        const STORAGE_KEY: &'static str = "stacker_high_score";

        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StorageError::Unavailable("no LocalStorage".to_string()))
        }
    }

    impl ScoreStore for LocalStore {
        fn load(&self) -> Result<Option<u64>, StorageError> {
            let storage = Self::storage()?;
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(text)) => Ok(Some(serde_json::from_str(text.trim())?)),
                Ok(None) => Ok(None),
                Err(_) => Err(StorageError::Unavailable("LocalStorage read denied".to_string())),
            }
        }

        fn save(&mut self, score: u64) -> Result<(), StorageError> {
            let storage = Self::storage()?;
            storage
                .set_item(Self::STORAGE_KEY, &score.to_string())
                .map_err(|_| StorageError::Unavailable("LocalStorage write denied".to_string()))
        }
    }
}
