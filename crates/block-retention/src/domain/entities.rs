//! # Domain Entities
//!
//! Snapshots read from the header chain and the cache component. The
//! reconciler never mutates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 32-byte block hash.
pub type Hash = [u8; 32];

/// A block header as exposed by the header chain accessor.
///
/// Only the fields the reconciler needs: headers are ordered by height and
/// immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Height in the best chain (genesis = 0).
    pub block_height: u64,
    /// Hash of the block.
    pub block_hash: Hash,
}

impl Header {
    pub fn new(block_height: u64, block_hash: Hash) -> Self {
        Self {
            block_height,
            block_hash,
        }
    }
}

/// Opaque metadata the cache component keeps for a pinned entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Last time the entry was accessed (seconds since epoch).
    pub last_access: u64,
    /// Size of the cached value in bytes.
    pub size: u64,
}

/// Snapshot of the cache index.
///
/// Keys are namespace-relative identifiers (`b.<hash>`); the reconciler
/// prefixes them with the block store namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIndex {
    pub keys: BTreeMap<Vec<u8>, CacheEntry>,
}

impl CacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin an identifier with the given metadata.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, entry: CacheEntry) {
        self.keys.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
