//! # Domain Errors
//!
//! Error types for the retention reconciler.
//!
//! ## Propagation
//!
//! - Expected conditions (no best header, no cache index) are not errors.
//! - A key outside the known layout aborts the pass (`UnclassifiableEntry`).
//! - Collaborator failures surface unchanged as `Storage`.

use crate::domain::entities::Hash;
use thiserror::Error;

/// Errors raised by an integrity pass.
#[derive(Debug, Error)]
pub enum RetentionError {
    /// A store key matched none of the known namespaces or record types.
    #[error("Unclassifiable store entry: {key}")]
    UnclassifiableEntry { key: String },

    /// Error from the store or one of its accessors.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<KVStoreError> for RetentionError {
    fn from(err: KVStoreError) -> Self {
        RetentionError::Storage(err.into())
    }
}

/// Result type for reconciler operations
pub type RetentionResult<T> = Result<T, RetentionError>;

/// Errors reported by the collaborators the reconciler consumes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Block with this hash was not found.
    #[error("Block not found: {}", hex::encode(.hash))]
    BlockNotFound { hash: Hash },

    /// Database I/O error.
    #[error("Database error: {message}")]
    DatabaseError { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Header chain could not be read.
    #[error("Header chain error: {message}")]
    HeaderChainError { message: String },

    /// Cache index could not be read.
    #[error("Cache index error: {message}")]
    CacheIndexError { message: String },
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
    /// Key not found.
    #[error("Key not found in KV store")]
    NotFound,
}

impl From<KVStoreError> for StorageError {
    fn from(err: KVStoreError) -> Self {
        StorageError::DatabaseError {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::SerializationError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_not_found_display_is_hex() {
        let err = StorageError::BlockNotFound { hash: [0xAB; 32] };
        assert_eq!(err.to_string(), format!("Block not found: {}", "ab".repeat(32)));
    }

    #[test]
    fn test_kv_error_conversion() {
        let kv_err = KVStoreError::IOError {
            message: "disk failure".to_string(),
        };
        let err: RetentionError = kv_err.into();

        match err {
            RetentionError::Storage(StorageError::DatabaseError { message }) => {
                assert!(message.contains("disk failure"));
            }
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err: RetentionError = StorageError::HeaderChainError {
            message: "sqlite locked".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Header chain error: sqlite locked");
    }
}
