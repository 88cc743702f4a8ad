//! # Reconciler Metrics
//!
//! Cumulative counters across integrity passes.
//!
//! ## Metrics Exported
//!
//! - Passes completed / failed
//! - Blocks purged
//! - Passes in progress
//! - Last pass duration

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for integrity passes
#[derive(Debug, Default)]
pub struct ReconcilerMetrics {
    /// Passes that ran to completion
    pub passes_completed: AtomicU64,
    /// Passes aborted by an error
    pub passes_failed: AtomicU64,
    /// Total blocks removed across all passes
    pub blocks_purged: AtomicU64,
    /// Passes currently running (0 or 1)
    pub in_progress: AtomicU64,
    /// Duration of the last completed pass (milliseconds)
    pub last_duration_ms: AtomicU64,
}

impl ReconcilerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pass as started
    pub fn start_pass(&self) {
        self.in_progress.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed pass
    pub fn record_success(&self, purged: u64, duration_ms: u64) {
        self.in_progress.fetch_sub(1, Ordering::Relaxed);
        self.passes_completed.fetch_add(1, Ordering::Relaxed);
        self.blocks_purged.fetch_add(purged, Ordering::Relaxed);
        self.last_duration_ms.store(duration_ms, Ordering::Relaxed);
    }

    /// Record an aborted pass
    pub fn record_failure(&self) {
        self.in_progress.fetch_sub(1, Ordering::Relaxed);
        self.passes_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn completed_count(&self) -> u64 {
        self.passes_completed.load(Ordering::Relaxed)
    }

    pub fn failed_count(&self) -> u64 {
        self.passes_failed.load(Ordering::Relaxed)
    }

    pub fn purged_total(&self) -> u64 {
        self.blocks_purged.load(Ordering::Relaxed)
    }

    pub fn in_progress_count(&self) -> u64 {
        self.in_progress.load(Ordering::Relaxed)
    }

    /// Export as Prometheus-style metrics string
    pub fn export_prometheus(&self) -> String {
        format!(
            "# HELP retention_passes_completed Integrity passes completed\n\
             # TYPE retention_passes_completed counter\n\
             retention_passes_completed {}\n\
             # HELP retention_passes_failed Integrity passes aborted\n\
             # TYPE retention_passes_failed counter\n\
             retention_passes_failed {}\n\
             # HELP retention_blocks_purged Stale blocks removed\n\
             # TYPE retention_blocks_purged counter\n\
             retention_blocks_purged {}\n\
             # HELP retention_pass_in_progress Integrity passes running\n\
             # TYPE retention_pass_in_progress gauge\n\
             retention_pass_in_progress {}\n\
             # HELP retention_last_pass_duration_ms Duration of the last pass\n\
             # TYPE retention_last_pass_duration_ms gauge\n\
             retention_last_pass_duration_ms {}\n",
            self.completed_count(),
            self.failed_count(),
            self.purged_total(),
            self.in_progress_count(),
            self.last_duration_ms.load(Ordering::Relaxed),
        )
    }
}
