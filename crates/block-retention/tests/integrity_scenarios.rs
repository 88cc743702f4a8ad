//! End-to-end integrity passes through the public API, with the cache index
//! persisted in the same store the reconciler scans.

use block_retention::{
    BlockRetentionApi, CacheEntry, CacheIndexState, Hash, Header, InMemoryHeaderChain,
    InMemoryKVStore, IntegrityReport, KeyValueStore, KvBlockStore, KvCacheIndex,
    RetentionConfig, RetentionDependencies, RetentionReconciler,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

fn hash_for(height: u64) -> Hash {
    Sha256::digest(height.to_be_bytes()).into()
}

struct Node {
    kv: Arc<InMemoryKVStore>,
    blocks: Arc<KvBlockStore<InMemoryKVStore>>,
    cache: Arc<KvCacheIndex<InMemoryKVStore>>,
    reconciler: RetentionReconciler<InMemoryKVStore, InMemoryHeaderChain, KvBlockStore<InMemoryKVStore>>,
}

impl Node {
    fn new(best: u64, stored: &[u64]) -> Self {
        let kv = Arc::new(InMemoryKVStore::new());
        let headers = Arc::new(InMemoryHeaderChain::with_headers(
            (0..=best).map(|h| Header::new(h, hash_for(h))),
        ));
        let blocks = Arc::new(KvBlockStore::new(Arc::clone(&kv)));
        let cache = Arc::new(KvCacheIndex::new(Arc::clone(&kv)));

        for &height in stored {
            let txid: Hash = Sha256::digest(hash_for(height)).into();
            blocks
                .save_block(&hash_for(height), b"block bytes", &[txid])
                .unwrap();
        }

        let reconciler = RetentionReconciler::new(
            RetentionDependencies {
                kv_store: Arc::clone(&kv),
                headers,
                blocks: Arc::clone(&blocks),
            },
            RetentionConfig::default(),
        );
        reconciler.set_cache(cache.clone());

        Self {
            kv,
            blocks,
            cache,
            reconciler,
        }
    }

    fn stored(&self, heights: &[u64]) -> Vec<u64> {
        heights
            .iter()
            .copied()
            .filter(|h| self.blocks.contains_block(&hash_for(*h)).unwrap())
            .collect()
    }

    async fn pass(&self) -> IntegrityReport {
        self.reconciler.ensure_integrity().await.unwrap()
    }
}

#[tokio::test]
async fn pinned_block_below_window_is_kept() {
    let heights = [50, 300, 499, 500];
    let node = Node::new(500, &heights);
    node.cache
        .pin_block(&hash_for(50), CacheEntry { last_access: 1, size: 11 })
        .unwrap();

    let report = node.pass().await;

    assert_eq!(node.stored(&heights), vec![50, 300, 499, 500]);
    assert_eq!(report.purged, 0);
    assert_eq!(report.blocks_seen(), 4);
    assert_eq!(report.retained(), report.total_entries);
}

#[tokio::test]
async fn absent_index_purges_block_below_window() {
    let heights = [50, 300, 499, 500];
    let node = Node::new(500, &heights);

    let report = node.pass().await;

    assert_eq!(node.stored(&heights), vec![300, 499, 500]);
    assert_eq!(report.cache_index, CacheIndexState::Missing);
    // Four blocks plus one transaction each
    assert_eq!(report.total_entries, 8);
    assert_eq!(report.transactions, 4);
    assert_eq!(report.retained(), 7);
    assert_eq!(node.kv.keys().len(), 7);
}

#[tokio::test]
async fn unpinning_makes_block_eligible_on_next_pass() {
    let heights = [10, 400];
    let node = Node::new(500, &heights);
    node.cache.pin_block(&hash_for(10), CacheEntry::default()).unwrap();

    assert_eq!(node.pass().await.purged, 0);

    node.cache.clear().unwrap();
    assert_eq!(node.pass().await.purged, 1);
    assert_eq!(node.stored(&heights), vec![400]);
    assert_eq!(node.pass().await.purged, 0);
}

#[tokio::test]
async fn report_serializes_for_api_consumers() {
    let node = Node::new(500, &[1, 499]);

    let report = node.pass().await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["purged"], 1);
    assert_eq!(json["cache_index"], "missing");
    assert!(node.kv.get(b"cache_index").unwrap().is_none());
}
