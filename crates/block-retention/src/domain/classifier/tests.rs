//! # Classifier Tests

use super::*;
use crate::domain::keys::KeyLayout;
use std::collections::HashSet;

fn classifier_with(keep: &[[u8; 32]], cached: &[[u8; 32]]) -> Classifier {
    let layout = KeyLayout::default();
    let keep_keys = keep.iter().map(|h| layout.block_key(h)).collect();
    let cached_keys = cached
        .iter()
        .map(|h| layout.qualify(&KeyLayout::relative_block_key(h)))
        .collect();
    Classifier::new(layout, keep_keys, cached_keys)
}

#[test]
fn test_protected_block() {
    let classifier = classifier_with(&[[1; 32]], &[]);
    let key = KeyLayout::default().block_key(&[1; 32]);

    assert_eq!(classifier.classify(&key), Classification::Protected);
}

#[test]
fn test_cached_block() {
    let classifier = classifier_with(&[], &[[2; 32]]);
    let key = KeyLayout::default().block_key(&[2; 32]);

    assert_eq!(classifier.classify(&key), Classification::Cached);
}

#[test]
fn test_protected_wins_over_cached() {
    let classifier = classifier_with(&[[3; 32]], &[[3; 32]]);
    let key = KeyLayout::default().block_key(&[3; 32]);

    assert_eq!(classifier.classify(&key), Classification::Protected);
}

#[test]
fn test_stale_block_carries_hash() {
    let classifier = classifier_with(&[[1; 32]], &[[2; 32]]);
    let key = KeyLayout::default().block_key(&[9; 32]);

    assert_eq!(classifier.classify(&key), Classification::Stale([9; 32]));
}

#[test]
fn test_non_block_entries() {
    let classifier = classifier_with(&[], &[]);
    let tx_key = KeyLayout::default().transaction_key(&[4; 32]);

    assert_eq!(classifier.classify(&tx_key), Classification::Transaction);
    assert_eq!(classifier.classify(b"cache_index"), Classification::Index);
    assert_eq!(classifier.classify(b"peers.p.1"), Classification::Unknown);
}

#[test]
fn test_transaction_never_stale_even_when_unpinned() {
    let layout = KeyLayout::default();
    let raw = layout.transaction_key(&[5; 32]);

    let result = classify(&raw, layout.decode(&raw), &HashSet::new(), &HashSet::new());
    assert_eq!(result, Classification::Transaction);
}

#[test]
fn test_tracked_counts_cached_keys() {
    let classifier = classifier_with(&[], &[[1; 32], [2; 32]]);
    assert_eq!(classifier.tracked(), 2);
}
