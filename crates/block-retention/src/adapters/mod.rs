//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: Ordered in-memory key-value engine
//! - `headers`: In-memory header chain
//! - `blocks`: Block store accessor over any `KeyValueStore`
//! - `cache`: Cache index providers (persisted and static)

pub mod blocks;
pub mod cache;
pub mod headers;
pub mod storage;

pub use blocks::{KvBlockStore, TransactionLocation};
pub use cache::{KvCacheIndex, StaticCacheIndex};
pub use headers::InMemoryHeaderChain;
pub use storage::InMemoryKVStore;
