//! In-Memory Header Chain Adapter
//!
//! Implements `HeaderChain` over a height-ordered map. The node runtime
//! wires its persistent header repository instead.

use crate::domain::entities::Header;
use crate::domain::errors::StorageError;
use crate::ports::outbound::HeaderChain;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Header chain held in memory, keyed by height.
#[derive(Default)]
pub struct InMemoryHeaderChain {
    headers: RwLock<BTreeMap<u64, Header>>,
}

impl InMemoryHeaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from existing headers.
    pub fn with_headers(headers: impl IntoIterator<Item = Header>) -> Self {
        let chain = Self::new();
        for header in headers {
            chain.insert(header);
        }
        chain
    }

    /// Store a header, replacing any header at the same height (reorg).
    pub fn insert(&self, header: Header) {
        self.headers.write().insert(header.block_height, header);
    }

    pub fn len(&self) -> usize {
        self.headers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.read().is_empty()
    }
}

impl HeaderChain for InMemoryHeaderChain {
    fn get_best_header(&self) -> Result<Option<Header>, StorageError> {
        Ok(self.headers.read().values().next_back().copied())
    }

    fn get_headers_since_height(&self, height: u64) -> Result<Vec<Header>, StorageError> {
        Ok(self.headers.read().range(height..).map(|(_, h)| *h).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(height: u64) -> Header {
        Header::new(height, [height as u8; 32])
    }

    #[test]
    fn test_best_header_is_highest() {
        let chain = InMemoryHeaderChain::with_headers([header(3), header(1), header(2)]);

        assert_eq!(chain.get_best_header().unwrap(), Some(header(3)));
    }

    #[test]
    fn test_empty_chain_has_no_best_header() {
        let chain = InMemoryHeaderChain::new();
        assert_eq!(chain.get_best_header().unwrap(), None);
    }

    #[test]
    fn test_headers_since_height_is_ordered_and_inclusive() {
        let chain = InMemoryHeaderChain::with_headers((0..10).map(header));

        let heights: Vec<_> = chain
            .get_headers_since_height(7)
            .unwrap()
            .iter()
            .map(|h| h.block_height)
            .collect();
        assert_eq!(heights, vec![7, 8, 9]);
    }
}
