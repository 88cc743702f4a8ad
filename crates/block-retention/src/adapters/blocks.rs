//! Block Store Adapter
//!
//! Implements `BlockStore` on top of any `KeyValueStore`, using the
//! composite key layout `<namespace>.b.<hash>` for blocks and
//! `<namespace>.t.<txid>` for transactions.

use crate::domain::entities::Hash;
use crate::domain::errors::StorageError;
use crate::domain::keys::{KeyLayout, DEFAULT_INDEX_KEY, DEFAULT_STORAGE_NAME};
use crate::ports::outbound::{BatchOperation, BlockStore, KeyValueStore, RemovalOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Location of a transaction within a stored block.
///
/// Persisted as the value of a transaction entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLocation {
    /// Hash of the block containing this transaction.
    pub block_hash: Hash,
    /// Index of the transaction within the block.
    pub transaction_index: u32,
}

/// Block store accessor backed by a shared key-value store.
pub struct KvBlockStore<KV: KeyValueStore> {
    store: Arc<KV>,
    layout: KeyLayout,
}

impl<KV: KeyValueStore> KvBlockStore<KV> {
    /// Create a block store under the default `blockchain` namespace.
    pub fn new(store: Arc<KV>) -> Self {
        Self::with_storage_name(store, DEFAULT_STORAGE_NAME)
    }

    pub fn with_storage_name(store: Arc<KV>, storage_name: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            layout: KeyLayout::new(storage_name, DEFAULT_INDEX_KEY),
        }
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Write a raw block and its transaction entries in one batch.
    pub fn save_block(
        &self,
        block_hash: &Hash,
        raw_block: &[u8],
        txids: &[Hash],
    ) -> Result<(), StorageError> {
        let mut operations = Vec::with_capacity(txids.len() + 1);
        operations.push(BatchOperation::put(
            self.layout.block_key(block_hash),
            raw_block,
        ));
        for (index, txid) in txids.iter().enumerate() {
            let location = TransactionLocation {
                block_hash: *block_hash,
                transaction_index: index as u32,
            };
            operations.push(BatchOperation::put(
                self.layout.transaction_key(txid),
                bincode::serialize(&location)?,
            ));
        }

        self.store.atomic_batch_write(operations)?;
        Ok(())
    }

    /// Read a raw block.
    pub fn get_block(&self, block_hash: &Hash) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.store.get(&self.layout.block_key(block_hash))?)
    }

    pub fn contains_block(&self, block_hash: &Hash) -> Result<bool, StorageError> {
        Ok(self.store.exists(&self.layout.block_key(block_hash))?)
    }

    /// Look up where a transaction is stored.
    pub fn get_transaction(
        &self,
        txid: &Hash,
    ) -> Result<Option<TransactionLocation>, StorageError> {
        self.store
            .get(&self.layout.transaction_key(txid))?
            .map(|bytes| bincode::deserialize(&bytes).map_err(StorageError::from))
            .transpose()
    }
}

impl<KV: KeyValueStore> BlockStore for KvBlockStore<KV> {
    fn storage_name(&self) -> &[u8] {
        self.layout.storage_name()
    }

    fn get_key(&self, block_hash: &Hash, prefix: &[u8]) -> Vec<u8> {
        KeyLayout::key(prefix, block_hash)
    }

    fn remove_block(&self, block_hash: &Hash) -> Result<(), StorageError> {
        let key = self.layout.block_key(block_hash);
        if !self.store.exists(&key)? {
            return Err(StorageError::BlockNotFound { hash: *block_hash });
        }

        // Transaction entries stay: they are indexed independently of blocks
        self.store
            .atomic_batch_write(vec![BatchOperation::delete(key)])?;
        Ok(())
    }

    /// Delete every block key in one atomic batch, without reading first.
    fn remove_blocks(&self, block_hashes: &[Hash]) -> Result<RemovalOutcome, StorageError> {
        if block_hashes.is_empty() {
            return Ok(RemovalOutcome::default());
        }

        let operations = block_hashes
            .iter()
            .map(|hash| BatchOperation::delete(self.layout.block_key(hash)))
            .collect();
        self.store.atomic_batch_write(operations)?;

        Ok(RemovalOutcome {
            removed: block_hashes.len() as u64,
            already_absent: 0,
        })
    }
}
