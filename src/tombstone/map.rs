//! Ordered tombstone map
//!
//! Per-member sorted storage with "take lowest across all members" extraction.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::error::{Result, TombstoneError};

use super::{OrderKey, VersionTag};

/// Tombstones grouped by the member that produced them
///
/// Each member owns a `BTreeMap` sorted by [`OrderKey`]. A member's map is
/// created on its first insert and removed as soon as its last tombstone is
/// taken, so every member present holds at least one entry.
///
/// There is no global index. [`take`](Self::take) scans the first key of
/// every member and removes the lowest one, comparing `local_sequence`
/// first and `timestamp` second. Keys from different members are not truly
/// comparable, so the resulting sequence is exact per member and only
/// approximately chronological overall. Exact ties between members go to
/// the smallest member id.
///
/// ## Concurrency
/// Not thread-safe. Callers sharing one map between threads must serialize
/// every call themselves, for example through
/// [`SharedTombstoneMap`](super::SharedTombstoneMap).
pub struct OrderedTombstoneMap<M, T> {
    /// member id → (order key → tombstone)
    members: HashMap<M, BTreeMap<OrderKey, T>>,

    /// Total tombstones across all members
    len: usize,
}

/// A tombstone removed from the map by [`OrderedTombstoneMap::take`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakenTombstone<M, T> {
    /// Member that produced the tombstone
    pub member: M,

    /// Version key it was stored under
    pub key: OrderKey,

    /// Caller payload, returned as inserted
    pub entry: T,
}

impl<M, T> TakenTombstone<M, T> {
    pub fn into_parts(self) -> (M, OrderKey, T) {
        (self.member, self.key, self.entry)
    }
}

impl<M, T> OrderedTombstoneMap<M, T> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
            len: 0,
        }
    }

    /// Total number of tombstones held
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of members with at least one tombstone
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl<M, T> OrderedTombstoneMap<M, T>
where
    M: Eq + Hash + Ord + Clone + fmt::Debug,
{
    /// Record a tombstone for `member` under `key`
    ///
    /// Fails with [`TombstoneError::DuplicateVersion`] if the member already
    /// has a tombstone with the same key. The map is left untouched in
    /// that case.
    pub fn insert(&mut self, key: OrderKey, member: M, entry: T) -> Result<()> {
        match self.members.get_mut(&member) {
            Some(store) => match store.entry(key) {
                btree_map::Entry::Occupied(_) => {
                    tracing::error!(
                        "Tombstone version {} recorded twice for member {:?}",
                        key,
                        member
                    );
                    return Err(TombstoneError::DuplicateVersion {
                        member: format!("{:?}", member),
                        key,
                    });
                }
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                    tracing::trace!("Recorded tombstone {} for member {:?}", key, member);
                }
            },
            None => {
                tracing::trace!("Recorded tombstone {} for new member {:?}", key, member);
                let mut store = BTreeMap::new();
                store.insert(key, entry);
                self.members.insert(member, store);
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Record a tombstone under the member and key carried by `tag`
    pub fn insert_tag(&mut self, tag: VersionTag<M>, entry: T) -> Result<()> {
        let key = tag.order_key();
        self.insert(key, tag.member, entry)
    }

    /// The tombstone the next [`take`](Self::take) would return
    pub fn peek(&self) -> Option<(&M, &OrderKey, &T)> {
        self.members
            .iter()
            .filter_map(|(member, store)| {
                store
                    .first_key_value()
                    .map(|(key, entry)| (member, key, entry))
            })
            .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
    }

    /// Remove and return the lowest tombstone across all members
    ///
    /// Returns `None` once the map is empty.
    pub fn take(&mut self) -> Option<TakenTombstone<M, T>> {
        let member = self.peek()?.0.clone();

        let store = self.members.get_mut(&member)?;
        let (key, entry) = store.pop_first()?;

        if store.is_empty() {
            self.members.remove(&member);
            tracing::trace!("Member {:?} has no tombstones left", member);
        }
        self.len -= 1;

        Some(TakenTombstone { member, key, entry })
    }

    /// Take up to `limit` tombstones in extraction order
    pub fn take_batch(&mut self, limit: usize) -> Vec<TakenTombstone<M, T>> {
        let mut batch = Vec::with_capacity(limit.min(self.len));
        while batch.len() < limit {
            match self.take() {
                Some(taken) => batch.push(taken),
                None => break,
            }
        }
        batch
    }

    /// Iterator that takes tombstones until the map is empty
    pub fn drain(&mut self) -> Drain<'_, M, T> {
        Drain { map: self }
    }

    /// Number of tombstones held for `member` (0 if absent)
    pub fn member_len(&self, member: &M) -> usize {
        self.members.get(member).map_or(0, BTreeMap::len)
    }

    pub fn contains_member(&self, member: &M) -> bool {
        self.members.contains_key(member)
    }
}

impl<M, T> Default for OrderedTombstoneMap<M, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: fmt::Debug, T> fmt::Debug for OrderedTombstoneMap<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_member: BTreeMap<String, usize> = self
            .members
            .iter()
            .map(|(member, store)| (format!("{:?}", member), store.len()))
            .collect();
        f.debug_struct("OrderedTombstoneMap")
            .field("len", &self.len)
            .field("members", &per_member)
            .finish()
    }
}

/// Draining iterator over an [`OrderedTombstoneMap`]
///
/// Yields tombstones in extraction order. Dropping it early leaves the
/// remaining tombstones in the map.
pub struct Drain<'a, M, T> {
    map: &'a mut OrderedTombstoneMap<M, T>,
}

impl<M, T> Iterator for Drain<'_, M, T>
where
    M: Eq + Hash + Ord + Clone + fmt::Debug,
{
    type Item = TakenTombstone<M, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.map.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<M, T> ExactSizeIterator for Drain<'_, M, T>
where
    M: Eq + Hash + Ord + Clone + fmt::Debug,
{
}
