//! # Block Retention Reconciler
//!
//! Keeps the block store bounded. Every integrity pass scans the whole
//! key-value store once and removes each block entry that is neither inside
//! the recent retention window nor pinned by the cache index.
//!
//! ## Architecture
//!
//! ```text
//! Header Chain ──best header / headers since──→ ┐
//!                                                │
//! Cache Index ───────pinned snapshot───────────→ ├──→ Retention Reconciler
//!                                                │    [one pass at a time]
//! Key-Value Store ────full iteration───────────→ ┘
//!                                                ↓
//!                               Block Store.remove_blocks(stale hashes)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Retention | Every block left after a pass is in the window or the cache index |
//! | 2 | Non-block safety | Transaction entries and the reserved index key are never removed |
//! | 3 | Exclusivity | At most one integrity pass runs per reconciler |
//! | 4 | Taxonomy | Keys outside the known layout are never purged |
//! | 5 | Idempotence | A second pass without intervening writes removes nothing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key decoding, window computation, classification, reports
//! - `ports/` - Port traits (inbound API, outbound collaborators)
//! - `adapters/` - In-memory and KV-backed collaborator implementations
//! - `service/` - The reconciler orchestrating an integrity pass
//!
//! ## Usage
//!
//! ```ignore
//! use block_retention::{RetentionReconciler, RetentionDependencies, RetentionConfig};
//!
//! let reconciler = RetentionReconciler::new(deps, RetentionConfig::from_env());
//! reconciler.set_cache(cache);
//! let report = reconciler.ensure_integrity().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for convenience
pub use domain::classifier::{classify, Classification};
pub use domain::config::{RetentionConfig, UnknownKeyPolicy};
pub use domain::entities::{CacheEntry, CacheIndex, Hash, Header};
pub use domain::errors::{KVStoreError, RetentionError, RetentionResult, StorageError};
pub use domain::keys::{KeyLayout, RecordType, StoreKey};
pub use domain::metrics::ReconcilerMetrics;
pub use domain::report::{CacheIndexState, IntegrityReport};
pub use domain::window::RetentionWindow;
pub use ports::inbound::BlockRetentionApi;
pub use ports::outbound::{
    BatchOperation, BlockStore, CacheIndexProvider, HeaderChain, KeyValueStore, RemovalOutcome,
};
pub use service::{ReconcilerState, RetentionDependencies, RetentionReconciler};

// Re-export adapters
pub use adapters::{InMemoryHeaderChain, InMemoryKVStore, KvBlockStore, KvCacheIndex, StaticCacheIndex};
