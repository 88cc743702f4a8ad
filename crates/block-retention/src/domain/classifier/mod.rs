//! # Classifier Module
//!
//! Sorts every store entry into exactly one bucket. Only `Stale` entries
//! are ever handed to the block store for removal.

mod service;

#[cfg(test)]
mod tests;

pub use service::{classify, Classification, Classifier};
