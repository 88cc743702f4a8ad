//! # Retention Window Module
//!
//! Hashes of the most recent headers, which no pass may evict.

mod calculator;


pub use calculator::{lower_bound, RetentionWindow};
