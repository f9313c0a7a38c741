//! Shared tombstone map
//!
//! Mutex-serialized wrapper for callers that touch one map from several threads.

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::error::Result;

use super::{OrderKey, OrderedTombstoneMap, TakenTombstone, VersionTag};

/// An [`OrderedTombstoneMap`] behind a mutex
///
/// ## Concurrency:
/// - Every call takes the lock for its whole duration
/// - Multi-step work (peek then take, conditional drains) goes through
///   [`with_map`](Self::with_map) so it runs under a single lock hold
/// - All methods use `&self`; share it with `Arc`
pub struct SharedTombstoneMap<M, T> {
    inner: Mutex<OrderedTombstoneMap<M, T>>,
}

impl<M, T> SharedTombstoneMap<M, T> {
    pub fn new() -> Self {
        Self::from_map(OrderedTombstoneMap::new())
    }

    /// Wrap an existing map
    pub fn from_map(map: OrderedTombstoneMap<M, T>) -> Self {
        Self {
            inner: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.inner.lock().member_count()
    }

    /// Run `f` with exclusive access to the map
    pub fn with_map<R>(&self, f: impl FnOnce(&mut OrderedTombstoneMap<M, T>) -> R) -> R {
        let mut map = self.inner.lock();
        f(&mut map)
    }

    /// Unwrap the inner map
    pub fn into_inner(self) -> OrderedTombstoneMap<M, T> {
        self.inner.into_inner()
    }
}

impl<M, T> SharedTombstoneMap<M, T>
where
    M: Eq + Hash + Ord + Clone + fmt::Debug,
{
    pub fn insert(&self, key: OrderKey, member: M, entry: T) -> Result<()> {
        self.inner.lock().insert(key, member, entry)
    }

    pub fn insert_tag(&self, tag: VersionTag<M>, entry: T) -> Result<()> {
        self.inner.lock().insert_tag(tag, entry)
    }

    pub fn take(&self) -> Option<TakenTombstone<M, T>> {
        self.inner.lock().take()
    }

    pub fn take_batch(&self, limit: usize) -> Vec<TakenTombstone<M, T>> {
        self.inner.lock().take_batch(limit)
    }
}

impl<M, T> Default for SharedTombstoneMap<M, T> {
    fn default() -> Self {
        Self::new()
    }
}
