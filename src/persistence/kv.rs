//! Key-value byte stores backing the persistence adapter

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

use crate::error::PersistenceResult;

/// Minimal string key-value storage. Each single-key write must be atomic.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

/// One file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the data directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        // Write beside the target then rename over it so readers never see half a value
        let tmp = self.dir.join(format!(".{}.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}
