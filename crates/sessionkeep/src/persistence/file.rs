//! JSON file persistence.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, trace, warn};

use crate::error::PersistenceError;

use super::Persistence;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Persistence backed by a single JSON object file.
///
/// Every write is a locked read-modify-write of the whole file, replaced
/// atomically through a sibling `.tmp` file. The lock is advisory and taken on
/// a sibling `.lock` file: shared for reads, exclusive for writes. On Unix the
/// data file is created with mode `0600`.
///
/// A file that no longer parses is reported by [`Persistence::get`] and
/// overwritten by the next write.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

type Entries = BTreeMap<String, String>;

impl FilePersistence {
    /// Use the file at `path`; it is created on the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn create_parent(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    fn open_lock(&self) -> Result<File, PersistenceError> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))
    }

    fn read_entries(&self) -> Result<Entries, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| PersistenceError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write to a sibling temp file, then rename it over the data file.
    fn write_entries(&self, entries: &Entries) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| PersistenceError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.sync_data().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        trace!(path = %self.path.display(), keys = entries.len(), "Wrote store");
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Entries) -> bool) -> Result<(), PersistenceError> {
        self.create_parent()?;
        let lock_file = self.open_lock()?;
        lock_file.lock_exclusive().map_err(|e| self.io_error(e))?;

        let (mut entries, corrupt) = match self.read_entries() {
            Ok(entries) => (entries, false),
            Err(PersistenceError::Corrupt { reason, .. }) => {
                warn!(path = %self.path.display(), %reason, "Replacing unreadable store");
                (Entries::new(), true)
            }
            Err(e) => return Err(e),
        };

        if f(&mut entries) || corrupt {
            self.write_entries(&entries)?;
        }

        lock_file.unlock().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl Persistence for FilePersistence {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let lock_file = self.open_lock()?;
        lock_file.lock_shared().map_err(|e| self.io_error(e))?;
        let entries = self.read_entries();
        lock_file.unlock().map_err(|e| self.io_error(e))?;

        Ok(entries?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        debug!(key, "Persisting value");
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        debug!(key, "Removing persisted value");
        self.modify(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FilePersistence::new(dir.path().join("session.json"));
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = FilePersistence::new(&path);
        store.set("token", "t1").unwrap();
        store.set("user", r#"{"username":"alice"}"#).unwrap();

        let reopened = FilePersistence::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("t1"));
        assert_eq!(
            reopened.get("user").unwrap().as_deref(),
            Some(r#"{"username":"alice"}"#)
        );
    }

    #[test]
    fn delete_removes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePersistence::new(dir.path().join("session.json"));
        store.set("token", "t1").unwrap();
        store.set("user", "{}").unwrap();

        store.delete("user").unwrap();
        store.delete("user").unwrap();

        assert_eq!(store.get("user").unwrap(), None);
        assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FilePersistence::new(&path);
        assert!(matches!(
            store.get("token"),
            Err(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn write_replaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token":"t0","#).unwrap();

        let mut store = FilePersistence::new(&path);
        store.set("token", "t1").unwrap();

        let reopened = FilePersistence::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn delete_on_corrupt_file_leaves_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FilePersistence::new(&path);
        store.delete("token").unwrap();

        assert_eq!(store.get("token").unwrap(), None);
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut store = FilePersistence::new(&path);
        store.set("token", "t1").unwrap();

        assert!(path.exists());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn read_does_not_create_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("session.json");
        let store = FilePersistence::new(&path);

        assert_eq!(store.get("token").unwrap(), None);
        assert!(!dir.path().join("missing").exists());
    }

    #[cfg(unix)]
    #[test]
    fn data_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut store = FilePersistence::new(&path);
        store.set("token", "t1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
