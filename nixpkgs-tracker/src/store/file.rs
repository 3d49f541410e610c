//! JSON-file backed store.

use super::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores all keys in a single JSON object on disk.
///
/// The file is read once on open and rewritten on every change. It is
/// created, together with its parent directories, on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or is
    /// not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "State file missing, starting empty");
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let values = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                context: path.display().to_string(),
                source,
            })?
        };

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents =
            serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Json {
                context: self.path.display().to_string(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(io_error)?;

        debug!(path = %self.path.display(), keys = self.values.len(), "Saved state");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("state.json")).unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn set_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();
        store
            .set("tracking_pull_requests", r#"[{"pullRequestNumber":1}]"#)
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(
            reopened.get("tracking_pull_requests").unwrap().as_deref(),
            Some(r#"[{"pullRequestNumber":1}]"#)
        );
    }

    #[test]
    fn remove_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();
        store.remove("token").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
