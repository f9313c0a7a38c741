//! Error types for tombstone-merge
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::tombstone::OrderKey;

/// Result type alias using TombstoneError
pub type Result<T> = std::result::Result<T, TombstoneError>;

/// Unified error type for tombstone-merge operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TombstoneError {
    // -------------------------------------------------------------------------
    // Consistency Errors
    // -------------------------------------------------------------------------
    /// The same version was recorded twice for one member. Each version is
    /// produced exactly once per member, so this is a bug in the caller.
    #[error("Duplicate tombstone version {key} for member {member}")]
    DuplicateVersion { member: String, key: OrderKey },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
