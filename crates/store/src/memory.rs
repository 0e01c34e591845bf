//! In-memory reference backend.
//!
//! `BTreeMap<Vec<u8>, Vec<u8>>` behind a `parking_lot::RwLock`. This is a
//! collaborator for the facade and for tests, not a storage engine: no
//! durability, no disk layout. Real deployments slot a disk-backed store
//! in through the same [`KvBackend`] trait.

use std::collections::BTreeMap;
use std::io;

use parking_lot::RwLock;

use tagdb_core::KvBackend;

/// In-memory byte store with lexicographic iteration order.
///
/// Thread-safe through `parking_lot::RwLock`; iteration snapshots the
/// entries under the read lock, so an iterator never observes writes made
/// after it was created.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &[u8]) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> io::Result<()> {
        self.entries.write().insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> io::Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + '_> {
        let pairs: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Box::new(pairs.into_iter())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
