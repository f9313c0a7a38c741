//! # tombstone-merge
//!
//! Tombstone bookkeeping for a replicated key-value store:
//! - Per-member ordered storage of delete markers
//! - Rejection of a version recorded twice by one member
//! - Extraction of the globally next tombstone without a full merge sort
//! - Batched reclamation sweeps
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Replication layer (creates tombstones)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ insert / insert_tag
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  OrderedTombstoneMap                         │
//! │        member ──► BTreeMap<(seq, timestamp), entry>          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ take / take_batch / drain
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Reclamation sweep (garbage collector)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `OrderedTombstoneMap` is single-threaded; [`SharedTombstoneMap`] wraps it
//! in a mutex for callers that share it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod tombstone;
pub mod simulation;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TombstoneError, Result};
pub use config::Config;
pub use tombstone::{OrderKey, OrderedTombstoneMap, SharedTombstoneMap, TakenTombstone, VersionTag};
pub use simulation::{Simulation, SimulationReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tombstone-merge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
