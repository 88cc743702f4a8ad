//! # Store Classifier
//!
//! ## Decision Order
//!
//! 1. Decode the raw key once (`KeyLayout::decode`)
//! 2. Non-block keys: transaction, reserved index, or unknown
//! 3. Block keys: protected (retention window) before cached (index)
//! 4. Any other block key is stale

use crate::domain::entities::Hash;
use crate::domain::keys::{KeyLayout, StoreKey};
use std::collections::HashSet;

/// Outcome of classifying a single store entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Block inside the retention window.
    Protected,
    /// Block pinned by the cache index.
    Cached,
    /// Transaction entry, never touched.
    Transaction,
    /// The reserved cache index entry, never touched.
    Index,
    /// Block to purge, carrying the hash handed to `remove_block`.
    Stale(Hash),
    /// Key outside the known layout.
    Unknown,
}

/// Classify a decoded key against the protected and cached key sets.
///
/// Both sets hold full composite keys.
pub fn classify(
    raw: &[u8],
    decoded: StoreKey,
    keep_keys: &HashSet<Vec<u8>>,
    cached_keys: &HashSet<Vec<u8>>,
) -> Classification {
    match decoded {
        StoreKey::Transaction => Classification::Transaction,
        StoreKey::Index => Classification::Index,
        StoreKey::Unknown => Classification::Unknown,
        StoreKey::Block(_) if keep_keys.contains(raw) => Classification::Protected,
        StoreKey::Block(_) if cached_keys.contains(raw) => Classification::Cached,
        StoreKey::Block(hash) => Classification::Stale(hash),
    }
}

/// Key sets for one integrity pass.
#[derive(Debug, Clone)]
pub struct Classifier {
    layout: KeyLayout,
    keep_keys: HashSet<Vec<u8>>,
    cached_keys: HashSet<Vec<u8>>,
}

impl Classifier {
    pub fn new(
        layout: KeyLayout,
        keep_keys: HashSet<Vec<u8>>,
        cached_keys: HashSet<Vec<u8>>,
    ) -> Self {
        Self {
            layout,
            keep_keys,
            cached_keys,
        }
    }

    /// Classify one raw store key.
    pub fn classify(&self, raw: &[u8]) -> Classification {
        classify(
            raw,
            self.layout.decode(raw),
            &self.keep_keys,
            &self.cached_keys,
        )
    }

    /// Number of composite keys the cache index pins.
    pub fn tracked(&self) -> usize {
        self.cached_keys.len()
    }
}
