//! # Retention Reconciler Service
//!
//! Orchestrates integrity passes over the block store.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `BlockRetentionApi` (`ensure_integrity`, `set_cache`)
//! 2. Serializes passes behind a per-instance async mutex
//! 3. Uses dependency injection for every collaborator

mod integrity;

use crate::domain::config::RetentionConfig;
use crate::domain::metrics::ReconcilerMetrics;
use crate::ports::outbound::{BlockStore, CacheIndexProvider, HeaderChain, KeyValueStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Whether an integrity pass currently holds the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Idle,
    Reconciling,
}

/// The Retention Reconciler.
///
/// Computes the purge set from the header chain and the cache index, then
/// removes stale blocks through the block store.
pub struct RetentionReconciler<KV, H, B>
where
    KV: KeyValueStore,
    H: HeaderChain,
    B: BlockStore,
{
    /// Key-value store scanned by each pass.
    pub(crate) kv_store: Arc<KV>,
    /// Header chain accessor (retention window).
    pub(crate) headers: Arc<H>,
    /// Block store accessor (key construction and removal).
    pub(crate) blocks: Arc<B>,
    /// Cache index provider, wired after construction.
    pub(crate) cache: RwLock<Option<Arc<dyn CacheIndexProvider>>>,
    /// Service configuration.
    pub(crate) config: RetentionConfig,
    /// Held for the whole duration of a pass.
    pub(crate) integrity_lock: Mutex<()>,
    /// Cumulative pass metrics.
    pub(crate) metrics: ReconcilerMetrics,
}

/// Dependencies for RetentionReconciler
pub struct RetentionDependencies<KV, H, B> {
    pub kv_store: Arc<KV>,
    pub headers: Arc<H>,
    pub blocks: Arc<B>,
}

impl<KV, H, B> RetentionReconciler<KV, H, B>
where
    KV: KeyValueStore,
    H: HeaderChain,
    B: BlockStore,
{
    /// Create a reconciler with no cache index wired.
    pub fn new(deps: RetentionDependencies<KV, H, B>, config: RetentionConfig) -> Self {
        Self {
            kv_store: deps.kv_store,
            headers: deps.headers,
            blocks: deps.blocks,
            cache: RwLock::new(None),
            config,
            integrity_lock: Mutex::new(()),
            metrics: ReconcilerMetrics::new(),
        }
    }

    pub fn headers(&self) -> &Arc<H> {
        &self.headers
    }

    pub fn blocks(&self) -> &Arc<B> {
        &self.blocks
    }

    pub fn config(&self) -> &RetentionConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ReconcilerMetrics {
        &self.metrics
    }

    /// Whether a cache index provider has been wired.
    pub fn has_cache(&self) -> bool {
        self.cache.read().is_some()
    }

    /// Current state of the pass guard.
    pub fn state(&self) -> ReconcilerState {
        match self.integrity_lock.try_lock() {
            Ok(_) => ReconcilerState::Idle,
            Err(_) => ReconcilerState::Reconciling,
        }
    }
}
