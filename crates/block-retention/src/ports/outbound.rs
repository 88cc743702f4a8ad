//! # Outbound Ports (Driven Ports)
//!
//! Collaborators consumed by the retention reconciler. Header storage, block
//! storage and the cache policy live outside this crate; these traits are the
//! only surface the reconciler sees.
//!
//! All ports take `&self`: the same store is shared with block ingestion and
//! cache eviction, so implementations provide their own interior locking.

use crate::domain::entities::{CacheIndex, Hash, Header};
use crate::domain::errors::{KVStoreError, StorageError};

/// One `(key, value)` pair yielded by a store scan.
pub type KVPair = (Vec<u8>, Vec<u8>);

/// Lazy, single-pass iteration over store entries.
pub type StoreIter<'a> = Box<dyn Iterator<Item = Result<KVPair, KVStoreError>> + Send + 'a>;

/// Abstract interface for the ordered key-value engine.
///
/// Production: LevelDB/RocksDB adapter in the node runtime
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Iterate over every entry, in the engine's native order.
    ///
    /// The iterator is finite and not restartable.
    fn iter(&self) -> Result<StoreIter<'_>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Header chain accessor.
pub trait HeaderChain: Send + Sync {
    /// Header with the greatest height, if any header is stored.
    fn get_best_header(&self) -> Result<Option<Header>, StorageError>;

    /// Headers with `block_height >= height`, ordered by height.
    fn get_headers_since_height(&self, height: u64) -> Result<Vec<Header>, StorageError>;
}

/// Block store accessor. Owns writes and removals of block entries.
pub trait BlockStore: Send + Sync {
    /// Namespace prefix of every key this store writes.
    fn storage_name(&self) -> &[u8];

    /// Composite key for a block hash under `prefix` (`<prefix>.<hash>`).
    fn get_key(&self, block_hash: &Hash, prefix: &[u8]) -> Vec<u8>;

    /// Remove a block by hash.
    ///
    /// ## Errors
    ///
    /// - `BlockNotFound`: No block with this hash is stored
    fn remove_block(&self, block_hash: &Hash) -> Result<(), StorageError>;

    /// Remove several blocks in one write.
    ///
    /// The default removes them one at a time, counting `BlockNotFound`
    /// as already absent. Store-backed accessors override it with a single
    /// batch.
    fn remove_blocks(&self, block_hashes: &[Hash]) -> Result<RemovalOutcome, StorageError> {
        let mut outcome = RemovalOutcome::default();
        for hash in block_hashes {
            match self.remove_block(hash) {
                Ok(()) => outcome.removed += 1,
                Err(StorageError::BlockNotFound { .. }) => outcome.already_absent += 1,
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }
}

/// Result of a batched block removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Blocks deleted by this call.
    pub removed: u64,
    /// Blocks the accessor no longer knew about.
    pub already_absent: u64,
}

/// Provider of the cache index snapshot.
pub trait CacheIndexProvider: Send + Sync {
    /// Reserved store key the index is persisted under.
    fn index_key(&self) -> &[u8];

    /// Current snapshot; `None` when no index exists.
    fn get_index(&self) -> Result<Option<CacheIndex>, StorageError>;
}
