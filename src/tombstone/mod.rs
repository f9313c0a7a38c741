//! Tombstone Module
//!
//! Ordered bookkeeping of deleted-but-not-yet-reclaimed records.
//!
//! ## Responsibilities
//! - Keep each member's tombstones sorted by version
//! - Reject a version recorded twice for the same member
//! - Hand out the globally next tombstone for reclamation
//! - Drop a member's storage the moment it runs empty
//!
//! ## Layout
//! ```text
//!   member A ──► [ (1,100) (2,140) (3,150) ]
//!   member B ──► [ (1, 90) (4,160) ]
//!   member C ──► [ (2,120) ]
//!                   ▲
//!                   └── take() compares only these heads
//! ```
//!
//! Keys are ordered by `(local_sequence, timestamp)`. That order is exact
//! within one member and only a best-effort heuristic across members, since
//! members share no clock.

mod key;
mod map;
mod shared;

pub use key::{OrderKey, VersionTag};
pub use map::{Drain, OrderedTombstoneMap, TakenTombstone};
pub use shared::SharedTombstoneMap;
