//! File-backed local storage for the native client

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{KeyValueStore, Result};

/// File name inside the data directory
pub const STORE_FILE: &str = "local_storage.json";

/// All keys in one JSON object, rewritten atomically on every change
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let data = fs::read(&path)?;
            match serde_json::from_slice(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Local store unreadable, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Store file inside a data directory
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::open(data_dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        fs::write(&tmp_path, bytes)?;

        if let Err(rename_err) = fs::rename(&tmp_path, &self.path) {
            if !self.path.exists() {
                return Err(rename_err.into());
            }
            fs::remove_file(&self.path)?;
            fs::rename(&tmp_path, &self.path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Memory must keep matching what is on disk
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries();
        let Some(old) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(&entries) {
            entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path()).unwrap();
        store.set("theme", "win11").unwrap();
        drop(store);

        let reopened = LocalStore::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("win11"));
        assert!(!dir.path().join("local_storage.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = LocalStore::in_dir(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join(STORE_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE), "garbage").unwrap();
        let store = LocalStore::in_dir(dir.path()).unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path()).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("never-set").unwrap();

        let reopened = LocalStore::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.get("k"), None);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let store = LocalStore::in_dir(&data_dir).unwrap();
        store.set("theme", "win11").unwrap();

        // A plain file where the data directory should be
        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "not a directory").unwrap();

        assert!(store.set("theme", "dracula").is_err());
        assert!(store.set("todos", "[]").is_err());
        assert!(store.remove("theme").is_err());

        assert_eq!(store.get("theme").as_deref(), Some("win11"));
        assert_eq!(store.get("todos"), None);
    }
}
