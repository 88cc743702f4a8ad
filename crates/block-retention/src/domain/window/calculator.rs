//! # Retention Window Calculator
//!
//! ## Algorithm
//!
//! 1. Read the best header (height `H`)
//! 2. Clamp the lower bound: `max(0, H - depth)`
//! 3. Collect the hashes of every header in `[lower, H]`
//!
//! No best header yields an empty window, meaning nothing is protected.

use crate::domain::entities::Hash;
use crate::domain::errors::StorageError;
use crate::ports::outbound::HeaderChain;

/// Lowest protected height for a best height and depth.
pub fn lower_bound(best_height: u64, depth: u64) -> u64 {
    best_height.saturating_sub(depth)
}

/// Block hashes protected from pruning for one integrity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionWindow {
    /// Best height the window was computed against (None when no header).
    pub best_height: Option<u64>,
    /// Lowest protected height.
    pub lower_height: u64,
    /// Protected hashes, ordered by height.
    pub hashes: Vec<Hash>,
}

impl RetentionWindow {
    /// Compute the window from the header chain.
    pub fn compute<H>(headers: &H, depth: u64) -> Result<Self, StorageError>
    where
        H: HeaderChain + ?Sized,
    {
        let Some(best) = headers.get_best_header()? else {
            tracing::debug!("[retention] No best header, retention window is empty");
            return Ok(Self::default());
        };

        let lower_height = lower_bound(best.block_height, depth);
        let hashes = headers
            .get_headers_since_height(lower_height)?
            .into_iter()
            .filter(|h| h.block_height <= best.block_height)
            .map(|h| h.block_hash)
            .collect();

        Ok(Self {
            best_height: Some(best.block_height),
            lower_height,
            hashes,
        })
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
