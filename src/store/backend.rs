use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Abstract key-value backend for durable UI state
///
/// String keys, string values, no expiry. The dashboard talks only to this
/// trait, so alternate backends (file, embedded database, remote) can be
/// substituted without touching call sites.
pub trait StorageBackend: Send {
    /// Returns the stored value for `key`, or `None` if it was never written
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Backend persisting each key as `<key>.json` under a directory
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory backend, used by tests and available for embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct view of a stored value, for assertions
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_round_trip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.read("k").unwrap(), None);

        backend.write("k", "v1").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("v1"));

        backend.write("k", "v2").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_backend_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.read("absent").unwrap(), None);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());

        backend.write("state", "[\"a\"]").unwrap();
        assert_eq!(backend.read("state").unwrap().as_deref(), Some("[\"a\"]"));

        // A fresh backend over the same directory sees the same value.
        let reopened = FileBackend::new(dir.path());
        assert_eq!(reopened.read("state").unwrap().as_deref(), Some("[\"a\"]"));
    }

    #[test]
    fn test_file_backend_creates_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut backend = FileBackend::new(&nested);
        backend.write("state", "[]").unwrap();
        assert!(nested.join("state.json").is_file());
    }
}
