//! Tombstone ordering keys
//!
//! Defines the version stamp attached to every tombstone.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort key of a tombstone within its member's stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderKey {
    /// Member-local version number, strictly increasing per member
    pub local_sequence: i64,

    /// Wall-clock-like stamp (unix millis) assigned when the tombstone was created
    pub timestamp: i64,
}

impl OrderKey {
    pub fn new(local_sequence: i64, timestamp: i64) -> Self {
        Self {
            local_sequence,
            timestamp,
        }
    }
}

impl Ord for OrderKey {
    // Plain three-way comparison; subtracting the fields would overflow near i64::MIN/MAX.
    fn cmp(&self, other: &Self) -> Ordering {
        self.local_sequence
            .cmp(&other.local_sequence)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(seq={}, ts={})", self.local_sequence, self.timestamp)
    }
}

/// Version stamp of a tombstone as produced by the replication layer
///
/// Carries the id of the member that performed the delete, so the map can
/// file the tombstone without a separate member argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionTag<M> {
    /// Member that produced this version
    pub member: M,

    /// Region version assigned by that member
    pub region_version: i64,

    /// Creation timestamp (unix millis)
    pub timestamp: i64,
}

impl<M> VersionTag<M> {
    pub fn new(member: M, region_version: i64, timestamp: i64) -> Self {
        Self {
            member,
            region_version,
            timestamp,
        }
    }

    /// The key this tag sorts under inside its member's stream
    pub fn order_key(&self) -> OrderKey {
        OrderKey::new(self.region_version, self.timestamp)
    }
}
