//! Property tests for OrderedTombstoneMap
//!
//! Random workloads over a handful of members, checking that inserts of
//! distinct versions always succeed, duplicates never change the map, a
//! drain returns every tombstone exactly once and each member's tombstones
//! leave in key order.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use tombstone_merge::{OrderKey, OrderedTombstoneMap, TombstoneError};

fn workload() -> impl Strategy<Value = Vec<(u8, i64, i64)>> {
    prop::collection::vec((0u8..6, -50i64..50, -1000i64..1000), 0..200)
}

proptest! {
  #[test]
  fn inserts_drain_completely_and_in_member_order(ops in workload()) {
    let mut map = OrderedTombstoneMap::new();
    let mut expected: BTreeSet<(u8, OrderKey)> = BTreeSet::new();

    for (i, (member, seq, ts)) in ops.iter().copied().enumerate() {
      let key = OrderKey::new(seq, ts);
      let before = map.len();
      let result = map.insert(key, member, i);

      if expected.insert((member, key)) {
        prop_assert!(result.is_ok());
        prop_assert_eq!(map.len(), before + 1);
      } else {
        let is_duplicate = matches!(result, Err(TombstoneError::DuplicateVersion { .. }));
        prop_assert!(is_duplicate);
        prop_assert_eq!(map.len(), before);
      }
    }

    let total = map.len();
    prop_assert_eq!(total, expected.len());

    let mut seen: BTreeSet<(u8, OrderKey)> = BTreeSet::new();
    let mut last: HashMap<u8, OrderKey> = HashMap::new();
    let mut taken_count = 0usize;
    while let Some(taken) = map.take() {
      taken_count += 1;
      prop_assert!(seen.insert((taken.member, taken.key)));
      if let Some(prev) = last.insert(taken.member, taken.key) {
        prop_assert!(prev < taken.key);
      }
    }

    prop_assert_eq!(taken_count, total);
    prop_assert_eq!(seen, expected);
    prop_assert!(map.take().is_none());
    prop_assert_eq!(map.member_count(), 0);
  }

  #[test]
  fn member_count_tracks_non_empty_members(ops in workload(), takes in 0usize..250) {
    let mut map = OrderedTombstoneMap::new();
    for (member, seq, ts) in ops {
      let _ = map.insert(OrderKey::new(seq, ts), member, ());
    }

    for _ in 0..takes {
      if map.take().is_none() {
        break;
      }
      let non_empty = (0u8..6).filter(|m| map.member_len(m) > 0).count();
      prop_assert_eq!(map.member_count(), non_empty);
      let total: usize = (0u8..6).map(|m| map.member_len(&m)).sum();
      prop_assert_eq!(map.len(), total);
    }
  }

  #[test]
  fn peek_always_predicts_take(ops in workload()) {
    let mut map = OrderedTombstoneMap::new();
    for (i, (member, seq, ts)) in ops.into_iter().enumerate() {
      let _ = map.insert(OrderKey::new(seq, ts), member, i);
    }

    loop {
      let predicted = map.peek().map(|(m, k, e)| (*m, *k, *e));
      let actual = map.take().map(|t| t.into_parts());
      prop_assert_eq!(predicted, actual);
      if actual.is_none() {
        break;
      }
    }
  }
}
