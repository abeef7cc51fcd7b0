//! Save store: durable keyed text records for the single save slot.
//!
//! The session layer owns the read/write contract; the medium is pluggable.
//! Production uses a sled tree under the data directory, tests use the
//! in-memory store. All writes are synchronous and flushed immediately so a
//! crash loses at most the record being written.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::engine::errors::GameError;

/// Record keys for the save slot.
pub mod keys {
    pub const LOCATION: &str = "location";
    pub const HEALTH: &str = "health";
    pub const INVENTORY: &str = "inventory";
    pub const INVENTORY_HISTORY: &str = "inventory_history";
    pub const SAVED_AT: &str = "saved_at";
}

/// Durable key/value persistence for player-visible state.
pub trait SaveStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError>;
    fn write(&self, key: &str, value: &str) -> Result<(), GameError>;
    fn remove(&self, key: &str) -> Result<(), GameError>;
}

const TREE_SAVE: &str = "save_slot";

/// Sled-backed save store rooted at a directory.
pub struct SledStore {
    _db: sled::Db,
    tree: sled::Tree,
}

impl SledStore {
    /// Open (or create) the save store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let tree = db.open_tree(TREE_SAVE)?;
        Ok(Self { _db: db, tree })
    }
}

impl SaveStore for SledStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError> {
        let value = self
            .tree
            .get(key.as_bytes())?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), GameError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GameError> {
        self.tree.remove(key.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
}

/// In-memory save store for tests. Clones share the same records, so a test
/// can keep a handle and inspect what the engine persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError> {
        let records = self
            .records
            .lock()
            .map_err(|_| GameError::StoreUnavailable("lock poisoned".into()))?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), GameError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| GameError::StoreUnavailable("lock poisoned".into()))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GameError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| GameError::StoreUnavailable("lock poisoned".into()))?;
        records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sled_store_round_trips_records() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledStore::open(dir.path()).expect("store");
        store.write(keys::HEALTH, "20").expect("write");
        assert_eq!(store.read(keys::HEALTH).expect("read").as_deref(), Some("20"));
        store.remove(keys::HEALTH).expect("remove");
        assert_eq!(store.read(keys::HEALTH).expect("read"), None);
    }

    #[test]
    fn sled_store_persists_across_reopen() {
        let dir = TempDir::new().expect("tempdir");
        {
            let store = SledStore::open(dir.path()).expect("store");
            store.write(keys::LOCATION, "v1:tutorial:1,1").expect("write");
        }
        let store = SledStore::open(dir.path()).expect("reopen");
        assert_eq!(
            store.read(keys::LOCATION).expect("read").as_deref(),
            Some("v1:tutorial:1,1")
        );
    }

    #[test]
    fn poisoned_lock_reports_the_store_unavailable() {
        let store = MemoryStore::new();
        let poisoner = store.clone();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = poisoner.records.lock().unwrap();
            panic!("poison the records lock");
        }));
        assert!(matches!(
            store.read(keys::HEALTH),
            Err(GameError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.write(keys::HEALTH, "1"),
            Err(GameError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn memory_store_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write(keys::INVENTORY, "Rusty Key").expect("write");
        assert_eq!(
            handle.read(keys::INVENTORY).expect("read").as_deref(),
            Some("Rusty Key")
        );
    }
}
