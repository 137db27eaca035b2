// Snapshot persistence.
// Loads the cache snapshot on startup and writes it back after every mutation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::Result;

use super::snapshot::Snapshot;

/// Durable home for the cache snapshot.
///
/// `load` never fails: an absent or unreadable snapshot yields an empty one so
/// startup always succeeds.
pub trait SnapshotStore {
    fn load(&self) -> Snapshot;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot file, distinguishing a missing file from a broken one.
    pub fn read(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&contents)?;
        Ok(Some(snapshot))
    }

    /// Delete the snapshot file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            return Ok(true);
        }
        Ok(false)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Snapshot {
        match self.read() {
            Ok(Some(snapshot)) => {
                debug!(
                    path = %self.path.display(),
                    users = snapshot.users.len(),
                    repositories = snapshot.repositories.len(),
                    "loaded cache snapshot"
                );
                snapshot
            }
            Ok(None) => Snapshot::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable cache snapshot");
                Snapshot::default()
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// In-process snapshot storage. Clones share the same slot, so a second store
/// built from a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<Snapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// The last saved snapshot, if any.
    pub fn saved(&self) -> Option<Snapshot> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Snapshot {
        self.saved().unwrap_or_default()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(snapshot.clone());
        }
        Ok(())
    }
}

/// Discards writes and always loads empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotStore;

impl SnapshotStore for NoopSnapshotStore {
    fn load(&self) -> Snapshot {
        Snapshot::default()
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::snapshot::repo_key;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.users.insert(
            "octocat".to_string(),
            vec![serde_json::from_value(json!({ "name": "Hello-World", "id": 1296269 })).unwrap()],
        );
        snapshot.repositories.insert(
            repo_key("octocat", "Hello-World"),
            vec![serde_json::from_value(json!({ "name": "master" })).unwrap()],
        );
        snapshot
    }

    #[test]
    fn test_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp_dir.path().join("nested").join("snapshot.json"));

        let snapshot = sample_snapshot();
        store.save(&snapshot).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn test_file_missing_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp_dir.path().join("snapshot.json"));

        assert!(store.read().unwrap().is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_corrupt_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileSnapshotStore::new(&path);
        assert!(store.read().is_err());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp_dir.path().join("snapshot.json"));

        assert!(!store.clear().unwrap());
        store.save(&sample_snapshot()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_memory_clones_share_state() {
        let store = MemorySnapshotStore::new();
        let other = store.clone();
        assert!(other.saved().is_none());

        store.save(&sample_snapshot()).unwrap();
        assert_eq!(other.load(), sample_snapshot());
    }

    #[test]
    fn test_noop_discards() {
        let store = NoopSnapshotStore;
        store.save(&sample_snapshot()).unwrap();
        assert!(store.load().is_empty());
    }
}
