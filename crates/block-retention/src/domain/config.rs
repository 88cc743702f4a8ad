//! # Reconciler Configuration
//!
//! All values have defaults suitable for a pruned node. `from_env` lets the
//! node runtime override them without a config file.

use crate::domain::keys::DEFAULT_INDEX_KEY;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Default number of blocks below the best header that stay protected.
pub const DEFAULT_RETENTION_DEPTH: u64 = 200;

/// What to do with a key outside the known layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Abort the pass with `UnclassifiableEntry` (default).
    #[default]
    Abort,
    /// Leave the entry in place and count it.
    Skip,
}

impl FromStr for UnknownKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(UnknownKeyPolicy::Abort),
            "skip" => Ok(UnknownKeyPolicy::Skip),
            other => Err(format!("unknown key policy: {}", other)),
        }
    }
}

impl fmt::Display for UnknownKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownKeyPolicy::Abort => write!(f, "abort"),
            UnknownKeyPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Configuration for the retention reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Blocks below the best header that are never evicted (default: 200).
    pub depth: u64,

    /// Handling of keys the decoder does not recognize.
    pub unknown_key_policy: UnknownKeyPolicy,

    /// Reserved index key used when no cache provider is wired.
    ///
    /// A wired provider's own index key takes precedence.
    pub index_key: Vec<u8>,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_RETENTION_DEPTH,
            unknown_key_policy: UnknownKeyPolicy::Abort,
            index_key: DEFAULT_INDEX_KEY.to_vec(),
        }
    }
}

impl RetentionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_RETENTION_DEPTH`: Protected depth (default: 200)
    /// - `QC_RETENTION_UNKNOWN_KEYS`: `abort` or `skip` (default: abort)
    /// - `QC_RETENTION_INDEX_KEY`: Reserved index key (default: cache_index)
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let depth = match env::var("QC_RETENTION_DEPTH") {
            Ok(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!("[retention] Invalid QC_RETENTION_DEPTH={}, using default", v);
                defaults.depth
            }),
            Err(_) => defaults.depth,
        };

        let unknown_key_policy = match env::var("QC_RETENTION_UNKNOWN_KEYS") {
            Ok(v) => v.parse().unwrap_or_else(|e| {
                tracing::warn!("[retention] {}, using default", e);
                defaults.unknown_key_policy
            }),
            Err(_) => defaults.unknown_key_policy,
        };

        let index_key = env::var("QC_RETENTION_INDEX_KEY")
            .map(String::into_bytes)
            .unwrap_or(defaults.index_key);

        Self {
            depth,
            unknown_key_policy,
            index_key,
        }
    }

    /// Set the protected depth.
    pub fn with_depth(mut self, depth: u64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the unknown key policy.
    pub fn with_unknown_key_policy(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_key_policy = policy;
        self
    }

    /// Set the fallback reserved index key.
    pub fn with_index_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.index_key = key.into();
        self
    }
}
