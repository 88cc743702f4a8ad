//! # Key Layout Module
//!
//! Composite store keys and the tagged decoder that classifies a raw key
//! once per entry.
//!
//! ## Layout
//!
//! ```text
//! <namespace>.b.<block hash>     block data
//! <namespace>.t.<txid>           transaction data
//! <index key>                    reserved cache index entry
//! ```

mod layout;


pub use layout::{
    KeyLayout, RecordType, StoreKey, DEFAULT_INDEX_KEY, DEFAULT_STORAGE_NAME, KEY_SEPARATOR,
};
