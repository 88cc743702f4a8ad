//! Cache Index Adapters
//!
//! - `KvCacheIndex`: index persisted in the block key-value store under a
//!   reserved key, bincode-encoded.
//! - `StaticCacheIndex`: index held in memory, set by the caller.

use crate::domain::entities::{CacheEntry, CacheIndex, Hash};
use crate::domain::errors::StorageError;
use crate::domain::keys::{KeyLayout, DEFAULT_INDEX_KEY};
use crate::ports::outbound::{CacheIndexProvider, KeyValueStore};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cache index persisted in the shared key-value store.
pub struct KvCacheIndex<KV: KeyValueStore> {
    store: Arc<KV>,
    index_key: Vec<u8>,
}

impl<KV: KeyValueStore> KvCacheIndex<KV> {
    pub fn new(store: Arc<KV>) -> Self {
        Self::with_index_key(store, DEFAULT_INDEX_KEY)
    }

    pub fn with_index_key(store: Arc<KV>, index_key: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            index_key: index_key.into(),
        }
    }

    /// Persist a full index snapshot.
    pub fn save_index(&self, index: &CacheIndex) -> Result<(), StorageError> {
        let bytes = bincode::serialize(index)?;
        self.store.put(&self.index_key, &bytes)?;
        Ok(())
    }

    /// Pin a block, creating the index if none exists.
    pub fn pin_block(&self, block_hash: &Hash, entry: CacheEntry) -> Result<(), StorageError> {
        let mut index = self.get_index()?.unwrap_or_default();
        index.insert(KeyLayout::relative_block_key(block_hash), entry);
        self.save_index(&index)
    }

    /// Drop the persisted index entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.delete(&self.index_key)?;
        Ok(())
    }
}

impl<KV: KeyValueStore> CacheIndexProvider for KvCacheIndex<KV> {
    fn index_key(&self) -> &[u8] {
        &self.index_key
    }

    fn get_index(&self) -> Result<Option<CacheIndex>, StorageError> {
        let Some(bytes) = self.store.get(&self.index_key)? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(|e| StorageError::CacheIndexError {
                message: format!("Failed to decode cache index: {}", e),
            })
    }
}

/// Cache index held in memory.
pub struct StaticCacheIndex {
    index: RwLock<Option<CacheIndex>>,
    index_key: Vec<u8>,
}

impl StaticCacheIndex {
    /// Provider with no index (nothing pinned).
    pub fn empty() -> Self {
        Self {
            index: RwLock::new(None),
            index_key: DEFAULT_INDEX_KEY.to_vec(),
        }
    }

    /// Provider pinning the given blocks.
    pub fn pinning(hashes: &[Hash]) -> Self {
        let mut index = CacheIndex::new();
        for hash in hashes {
            index.insert(KeyLayout::relative_block_key(hash), CacheEntry::default());
        }
        let provider = Self::empty();
        provider.set(index);
        provider
    }

    /// Replace the snapshot.
    pub fn set(&self, index: CacheIndex) {
        *self.index.write() = Some(index);
    }

    /// Forget the snapshot.
    pub fn clear(&self) {
        *self.index.write() = None;
    }
}

impl Default for StaticCacheIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl CacheIndexProvider for StaticCacheIndex {
    fn index_key(&self) -> &[u8] {
        &self.index_key
    }

    fn get_index(&self) -> Result<Option<CacheIndex>, StorageError> {
        Ok(self.index.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKVStore;

    #[test]
    fn test_missing_index_is_none() {
        let index = KvCacheIndex::new(Arc::new(InMemoryKVStore::new()));
        assert_eq!(index.get_index().unwrap(), None);
    }

    #[test]
    fn test_pin_block_persists_under_reserved_key() {
        let kv = Arc::new(InMemoryKVStore::new());
        let index = KvCacheIndex::new(Arc::clone(&kv));

        index.pin_block(&[3; 32], CacheEntry { last_access: 10, size: 250 }).unwrap();

        assert!(kv.exists(b"cache_index").unwrap());
        let snapshot = index.get_index().unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.keys.get(&KeyLayout::relative_block_key(&[3; 32])),
            Some(&CacheEntry { last_access: 10, size: 250 })
        );
    }

    #[test]
    fn test_corrupt_index_is_an_error() {
        let kv = Arc::new(InMemoryKVStore::new());
        kv.put(b"cache_index", &[0xFF; 3]).unwrap();

        let result = KvCacheIndex::new(kv).get_index();
        assert!(matches!(result, Err(StorageError::CacheIndexError { .. })));
    }

    #[test]
    fn test_static_index_set_and_clear() {
        let provider = StaticCacheIndex::pinning(&[[1; 32]]);
        assert_eq!(provider.get_index().unwrap().map(|i| i.len()), Some(1));

        provider.clear();
        assert_eq!(provider.get_index().unwrap(), None);
    }
}
