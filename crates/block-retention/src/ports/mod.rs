//! # Ports Layer
//!
//! - `inbound` - API this crate exposes to the node runtime
//! - `outbound` - Collaborators the reconciler consumes

pub mod inbound;
pub mod outbound;
