use crate::domain::entities::Hash;

/// Separator between key components.
pub const KEY_SEPARATOR: u8 = b'.';

/// Default namespace of the block store.
pub const DEFAULT_STORAGE_NAME: &[u8] = b"blockchain";

/// Default reserved key holding the persisted cache index.
pub const DEFAULT_INDEX_KEY: &[u8] = b"cache_index";

/// Record types stored under the block store namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// Block data: `<ns>.b.{hash}`
    Block,
    /// Transaction data: `<ns>.t.{txid}`
    Transaction,
}

impl RecordType {
    /// Get the byte prefix for this record type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            RecordType::Block => b"b",
            RecordType::Transaction => b"t",
        }
    }
}

/// A raw store key decoded into the reconciler's taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    /// Block entry carrying its hash.
    Block(Hash),
    /// Transaction entry.
    Transaction,
    /// The reserved cache index entry.
    Index,
    /// Anything outside the known layout.
    Unknown,
}

/// Composite key layout shared by the block store and the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    storage_name: Vec<u8>,
    index_key: Vec<u8>,
    block_prefix: Vec<u8>,
    transaction_prefix: Vec<u8>,
}

impl KeyLayout {
    pub fn new(storage_name: impl Into<Vec<u8>>, index_key: impl Into<Vec<u8>>) -> Self {
        let storage_name = storage_name.into();
        let block_prefix = Self::join(&storage_name, RecordType::Block.as_bytes());
        let transaction_prefix = Self::join(&storage_name, RecordType::Transaction.as_bytes());
        Self {
            storage_name,
            index_key: index_key.into(),
            block_prefix,
            transaction_prefix,
        }
    }

    fn join(left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(left.len() + 1 + right.len());
        key.extend_from_slice(left);
        key.push(KEY_SEPARATOR);
        key.extend_from_slice(right);
        key
    }

    pub fn storage_name(&self) -> &[u8] {
        &self.storage_name
    }

    pub fn index_key(&self) -> &[u8] {
        &self.index_key
    }

    /// `<namespace>.<record type>`, the prefix handed to `get_key`.
    pub fn record_prefix(&self, record: RecordType) -> &[u8] {
        match record {
            RecordType::Block => &self.block_prefix,
            RecordType::Transaction => &self.transaction_prefix,
        }
    }

    /// Build `<prefix>.<identifier>`.
    pub fn key(prefix: &[u8], identifier: &[u8]) -> Vec<u8> {
        Self::join(prefix, identifier)
    }

    /// Build the full block key for a hash.
    pub fn block_key(&self, hash: &Hash) -> Vec<u8> {
        Self::key(&self.block_prefix, hash)
    }

    /// Build the full transaction key for a txid.
    pub fn transaction_key(&self, txid: &Hash) -> Vec<u8> {
        Self::key(&self.transaction_prefix, txid)
    }

    /// Namespace-relative identifier of a block (`b.<hash>`), as kept in
    /// the cache index.
    pub fn relative_block_key(hash: &Hash) -> Vec<u8> {
        Self::key(RecordType::Block.as_bytes(), hash)
    }

    /// Prefix a namespace-relative identifier with the namespace.
    pub fn qualify(&self, relative: &[u8]) -> Vec<u8> {
        Self::join(&self.storage_name, relative)
    }

    /// Decode a raw key.
    ///
    /// Block keys must carry exactly one 32-byte hash after the prefix;
    /// anything else under the block prefix decodes as `Unknown`.
    pub fn decode(&self, raw: &[u8]) -> StoreKey {
        if raw == self.index_key.as_slice() {
            return StoreKey::Index;
        }
        if let Some(rest) = Self::strip(raw, &self.block_prefix) {
            return match Hash::try_from(rest) {
                Ok(hash) => StoreKey::Block(hash),
                Err(_) => StoreKey::Unknown,
            };
        }
        if Self::strip(raw, &self.transaction_prefix).is_some() {
            return StoreKey::Transaction;
        }
        StoreKey::Unknown
    }

    fn strip<'a>(raw: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
        raw.strip_prefix(prefix)?.strip_prefix(&[KEY_SEPARATOR])
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_NAME, DEFAULT_INDEX_KEY)
    }
}
