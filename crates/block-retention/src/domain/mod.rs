//! # Domain Layer
//!
//! Pure domain logic for the retention reconciler. Nothing here touches a
//! store directly except through the outbound port traits.
//!
//! ## Modules
//!
//! - `entities` - Headers, hashes and the cache index snapshot
//! - `keys` - Composite key layout and the tagged key decoder
//! - `window` - Retention window calculation
//! - `classifier` - Per-entry classification
//! - `report` - Per-pass statistics
//! - `metrics` - Cumulative counters across passes
//! - `config` - Reconciler configuration
//! - `errors` - Domain error types

pub mod classifier;
pub mod config;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod metrics;
pub mod report;
pub mod window;
