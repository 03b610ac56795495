//! Data models
//!
//! Snapshots published by the POS API for the customer display.
//! Every snapshot is rebuilt from scratch on each poll and never mutated.

pub mod cart;
pub mod payment;

// Re-exports
pub use cart::*;
pub use payment::*;
