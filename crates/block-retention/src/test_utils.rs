use crate::adapters::{InMemoryHeaderChain, InMemoryKVStore, KvBlockStore, KvCacheIndex};
use crate::domain::config::RetentionConfig;
use crate::domain::entities::{CacheEntry, Hash, Header};
use crate::service::{RetentionDependencies, RetentionReconciler};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Deterministic block hash for a height.
pub fn block_hash(height: u64) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"block");
    hasher.update(height.to_le_bytes());
    hasher.finalize().into()
}

/// Deterministic txid for the `index`-th transaction of a block.
pub fn txid(height: u64, index: u32) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"tx");
    hasher.update(height.to_le_bytes());
    hasher.update(index.to_le_bytes());
    hasher.finalize().into()
}

/// Header chain with every height from genesis to `best`.
pub fn make_chain(best: u64) -> InMemoryHeaderChain {
    InMemoryHeaderChain::with_headers((0..=best).map(|h| Header::new(h, block_hash(h))))
}

pub type TestReconciler =
    RetentionReconciler<InMemoryKVStore, InMemoryHeaderChain, KvBlockStore<InMemoryKVStore>>;

/// Shared store with the accessors a node would wire around it.
pub struct Fixture {
    pub kv: Arc<InMemoryKVStore>,
    pub headers: Arc<InMemoryHeaderChain>,
    pub blocks: Arc<KvBlockStore<InMemoryKVStore>>,
    pub cache: Arc<KvCacheIndex<InMemoryKVStore>>,
}

impl Fixture {
    pub fn new(best: u64) -> Self {
        let kv = Arc::new(InMemoryKVStore::new());
        Self {
            headers: Arc::new(make_chain(best)),
            blocks: Arc::new(KvBlockStore::new(Arc::clone(&kv))),
            cache: Arc::new(KvCacheIndex::new(Arc::clone(&kv))),
            kv,
        }
    }

    /// Store the block at `height` with `tx_count` transactions.
    pub fn store_block(&self, height: u64, tx_count: u32) {
        let txids: Vec<Hash> = (0..tx_count).map(|i| txid(height, i)).collect();
        self.blocks
            .save_block(&block_hash(height), &height.to_le_bytes(), &txids)
            .unwrap();
    }

    pub fn pin(&self, height: u64) {
        self.cache
            .pin_block(&block_hash(height), CacheEntry::default())
            .unwrap();
    }

    pub fn has_block(&self, height: u64) -> bool {
        self.blocks.contains_block(&block_hash(height)).unwrap()
    }

    /// Heights (out of `candidates`) whose block is still stored.
    pub fn remaining(&self, candidates: &[u64]) -> Vec<u64> {
        candidates
            .iter()
            .copied()
            .filter(|h| self.has_block(*h))
            .collect()
    }

    pub fn deps(
        &self,
    ) -> RetentionDependencies<InMemoryKVStore, InMemoryHeaderChain, KvBlockStore<InMemoryKVStore>>
    {
        RetentionDependencies {
            kv_store: Arc::clone(&self.kv),
            headers: Arc::clone(&self.headers),
            blocks: Arc::clone(&self.blocks),
        }
    }

    pub fn reconciler(&self, config: RetentionConfig) -> TestReconciler {
        RetentionReconciler::new(self.deps(), config)
    }
}
