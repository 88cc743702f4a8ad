//! # Integrity Pass
//!
//! Implements `BlockRetentionApi` for the reconciler.
//!
//! ## Pass Steps
//!
//! 1. Acquire the guard (released on every exit path)
//! 2. Retention window -> full composite keys via `get_key`
//! 3. Cache index snapshot -> full composite keys via the namespace
//! 4. One scan of the store, classifying each entry once
//! 5. Stale blocks collected by the scan are removed through the block
//!    store in one batch, also when the scan aborts part way

use super::*;
use crate::domain::classifier::{Classification, Classifier};
use crate::domain::config::UnknownKeyPolicy;
use crate::domain::errors::{RetentionError, RetentionResult, StorageError};
use crate::domain::entities::Hash;
use crate::domain::keys::{KeyLayout, RecordType};
use crate::domain::report::{CacheIndexState, IntegrityReport};
use crate::domain::window::RetentionWindow;
use crate::ports::inbound::BlockRetentionApi;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl<KV, H, B> BlockRetentionApi for RetentionReconciler<KV, H, B>
where
    KV: KeyValueStore,
    H: HeaderChain,
    B: BlockStore,
{
    async fn ensure_integrity(&self) -> RetentionResult<IntegrityReport> {
        let _guard = self.integrity_lock.lock().await;
        self.metrics.start_pass();
        let started = Instant::now();

        match self.purge_stale_blocks() {
            Ok(mut report) => {
                report.duration_ms = elapsed_millis(started.elapsed());
                self.metrics.record_success(report.purged, report.duration_ms);
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "[retention] Integrity pass aborted");
                self.metrics.record_failure();
                Err(e)
            }
        }
    }

    fn set_cache(&self, cache: Arc<dyn CacheIndexProvider>) {
        *self.cache.write() = Some(cache);
    }
}

impl<KV, H, B> RetentionReconciler<KV, H, B>
where
    KV: KeyValueStore,
    H: HeaderChain,
    B: BlockStore,
{
    /// Run one classification pass. Callers must hold `integrity_lock`.
    pub(crate) fn purge_stale_blocks(&self) -> RetentionResult<IntegrityReport> {
        let storage_name = self.blocks.storage_name().to_vec();
        tracing::debug!(
            "[retention] Ensuring no stale blocks in {}",
            String::from_utf8_lossy(&storage_name)
        );

        let cache = self.cache.read().clone();
        let index_key = match &cache {
            Some(provider) => provider.index_key().to_vec(),
            None => self.config.index_key.clone(),
        };
        let layout = KeyLayout::new(storage_name, index_key);

        let window = RetentionWindow::compute(self.headers.as_ref(), self.config.depth)?;
        let block_prefix = layout.record_prefix(RecordType::Block).to_vec();
        let keep_keys: HashSet<Vec<u8>> = window
            .hashes
            .iter()
            .map(|hash| self.blocks.get_key(hash, &block_prefix))
            .collect();

        let (cache_state, cached_keys) = Self::snapshot_cache_index(cache.as_deref(), &layout)?;
        let classifier = Classifier::new(layout, keep_keys, cached_keys);

        let mut report = IntegrityReport {
            window_size: window.len() as u64,
            tracked: classifier.tracked() as u64,
            cache_index: cache_state,
            ..IntegrityReport::default()
        };

        let mut stale = Vec::new();
        let scanned = self.scan(&classifier, &mut report, &mut stale);
        // Entries classified before an abort are still removed
        let removed = self.purge_blocks(&stale, &mut report);
        if let (Err(_), Err(e)) = (&scanned, &removed) {
            tracing::warn!(error = %e, "[retention] Stale block removal failed after abort");
        }
        scanned?;
        removed?;

        tracing::info!(
            purged = report.purged,
            tracked = report.tracked,
            protected = report.protected,
            cached = report.cached,
            entries = report.total_entries,
            transactions = report.transactions,
            "[retention] Purged {} elements not tracked by cache",
            report.purged
        );

        Ok(report)
    }

    /// Snapshot the cache index as full composite keys.
    ///
    /// A missing provider or index pins nothing; it is not an error.
    fn snapshot_cache_index(
        cache: Option<&dyn CacheIndexProvider>,
        layout: &KeyLayout,
    ) -> Result<(CacheIndexState, HashSet<Vec<u8>>), StorageError> {
        let index = match cache {
            Some(provider) => provider.get_index()?,
            None => {
                tracing::debug!("[retention] No cache index provider wired");
                None
            }
        };

        match index {
            None => {
                tracing::debug!("[retention] Cache index not found");
                Ok((CacheIndexState::Missing, HashSet::new()))
            }
            Some(index) if index.is_empty() => {
                tracing::debug!("[retention] Empty cache index found");
                Ok((CacheIndexState::Empty, HashSet::new()))
            }
            Some(index) => {
                let keys = index.keys.keys().map(|k| layout.qualify(k)).collect();
                Ok((CacheIndexState::Loaded, keys))
            }
        }
    }

    /// Classify every store entry, collecting stale block hashes.
    fn scan(
        &self,
        classifier: &Classifier,
        report: &mut IntegrityReport,
        stale: &mut Vec<Hash>,
    ) -> RetentionResult<()> {
        for entry in self.kv_store.iter()? {
            let (key, _) = entry?;
            report.total_entries += 1;

            match classifier.classify(&key) {
                Classification::Protected => report.protected += 1,
                Classification::Cached => report.cached += 1,
                Classification::Transaction => report.transactions += 1,
                Classification::Index => report.index_entries += 1,
                Classification::Stale(hash) => stale.push(hash),
                Classification::Unknown => match self.config.unknown_key_policy {
                    UnknownKeyPolicy::Abort => {
                        return Err(RetentionError::UnclassifiableEntry {
                            key: hex::encode(&key),
                        });
                    }
                    UnknownKeyPolicy::Skip => {
                        tracing::debug!(
                            key = %hex::encode(&key),
                            "[retention] Skipping unknown key"
                        );
                        report.unknown_skipped += 1;
                    }
                },
            }
        }
        Ok(())
    }

    /// Remove the collected stale blocks with a single block store call.
    fn purge_blocks(&self, stale: &[Hash], report: &mut IntegrityReport) -> RetentionResult<()> {
        if stale.is_empty() {
            return Ok(());
        }

        let outcome = self.blocks.remove_blocks(stale)?;
        report.purged += outcome.removed;
        report.already_absent += outcome.already_absent;
        tracing::debug!(
            removed = outcome.removed,
            already_absent = outcome.already_absent,
            "[retention] Removed stale blocks"
        );
        Ok(())
    }
}
