//! # Inbound Ports (Driving Ports)
//!
//! The API the node runtime drives.

use crate::domain::errors::RetentionResult;
use crate::domain::report::IntegrityReport;
use crate::ports::outbound::CacheIndexProvider;
use async_trait::async_trait;
use std::sync::Arc;

/// Primary API of the retention reconciler.
#[async_trait]
pub trait BlockRetentionApi: Send + Sync {
    /// Run one integrity pass.
    ///
    /// Passes are serialized: a second caller suspends until the running
    /// pass releases the guard. A failed pass can be re-run from scratch.
    ///
    /// ## Errors
    ///
    /// - `UnclassifiableEntry`: A key outside the known layout (abort policy)
    /// - `Storage`: Any store, header chain or cache index failure
    async fn ensure_integrity(&self) -> RetentionResult<IntegrityReport>;

    /// Wire the cache index provider.
    ///
    /// Until called, every block outside the retention window is stale.
    fn set_cache(&self, cache: Arc<dyn CacheIndexProvider>);
}
