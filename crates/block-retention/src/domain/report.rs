//! # Integrity Report
//!
//! Counters accumulated during one integrity pass.

use serde::Serialize;

/// What the cache index snapshot looked like when the pass started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheIndexState {
    /// No provider wired or no index persisted. Nothing is pinned.
    #[default]
    Missing,
    /// Index present but pinning nothing.
    Empty,
    /// Index present with at least one pinned key.
    Loaded,
}

/// Result of an integrity pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Entries visited by the store iterator
    pub total_entries: u64,
    /// Blocks removed through the block store
    pub purged: u64,
    /// Blocks kept because they are inside the retention window
    pub protected: u64,
    /// Blocks kept because the cache index pins them
    pub cached: u64,
    /// Transaction entries skipped
    pub transactions: u64,
    /// Reserved index entries skipped
    pub index_entries: u64,
    /// Unknown keys skipped (only with `UnknownKeyPolicy::Skip`)
    pub unknown_skipped: u64,
    /// Stale blocks the block store no longer knew about
    pub already_absent: u64,
    /// Keys pinned by the cache index snapshot
    pub tracked: u64,
    /// Hashes in the retention window
    pub window_size: u64,
    /// Cache index snapshot state
    pub cache_index: CacheIndexState,
    /// Duration of the pass in milliseconds
    pub duration_ms: u64,
}

impl IntegrityReport {
    /// Block entries seen, whatever their fate.
    pub fn blocks_seen(&self) -> u64 {
        self.purged + self.already_absent + self.protected + self.cached
    }

    /// Entries left in place.
    pub fn retained(&self) -> u64 {
        self.total_entries - self.purged - self.already_absent
    }
}
