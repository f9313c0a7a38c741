//! SharedTombstoneMap Tests
//!
//! Tests verify:
//! - Serialized access from many threads loses nothing
//! - Per-member order survives concurrent producers
//! - with_map runs multi-step work under one lock

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use tombstone_merge::{OrderKey, OrderedTombstoneMap, SharedTombstoneMap, VersionTag};

#[test]
fn test_concurrent_producers() {
    let shared = Arc::new(SharedTombstoneMap::new());

    let mut handles = vec![];
    for member in 0..8u32 {
        let map = Arc::clone(&shared);
        handles.push(thread::spawn(move || {
            for seq in 1..=250i64 {
                map.insert_tag(VersionTag::new(member, seq, seq * 10), (member, seq))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.len(), 2000);
    assert_eq!(shared.member_count(), 8);

    let mut last_seq: HashMap<u32, i64> = HashMap::new();
    while let Some(taken) = shared.take() {
        let (member, seq) = taken.entry;
        if let Some(prev) = last_seq.insert(member, seq) {
            assert!(prev < seq, "member {} went {} -> {}", member, prev, seq);
        }
    }
    assert!(shared.is_empty());
    assert_eq!(last_seq.len(), 8);
}

#[test]
fn test_concurrent_sweepers_take_each_once() {
    let mut map = OrderedTombstoneMap::new();
    for member in 0..4u32 {
        for seq in 1..=500i64 {
            map.insert(OrderKey::new(seq, seq), member, (member, seq)).unwrap();
        }
    }
    let shared = Arc::new(SharedTombstoneMap::from_map(map));

    let mut handles = vec![];
    for _ in 0..4 {
        let map = Arc::clone(&shared);
        handles.push(thread::spawn(move || {
            let mut mine = Vec::new();
            loop {
                let batch = map.take_batch(17);
                if batch.is_empty() {
                    break;
                }
                mine.extend(batch.into_iter().map(|t| t.entry));
            }
            mine
        }));
    }

    let mut all: Vec<(u32, i64)> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort();

    assert_eq!(all.len(), 2000);
    all.dedup();
    assert_eq!(all.len(), 2000);
}

#[test]
fn test_with_map_conditional_take() {
    let shared = SharedTombstoneMap::new();
    shared.insert(OrderKey::new(1, 100), "m1", "old").unwrap();
    shared.insert(OrderKey::new(2, 900), "m1", "new").unwrap();

    // Reclaim only tombstones created before the cutoff
    let cutoff = 500;
    let reclaimed = shared.with_map(|map| {
        let mut out = Vec::new();
        while map.peek().map_or(false, |(_, key, _)| key.timestamp < cutoff) {
            if let Some(taken) = map.take() {
                out.push(taken.entry);
            }
        }
        out
    });

    assert_eq!(reclaimed, vec!["old"]);
    assert_eq!(shared.len(), 1);
}

#[test]
fn test_duplicate_rejected_through_wrapper() {
    let shared = SharedTombstoneMap::new();
    shared.insert(OrderKey::new(1, 1), 9u64, ()).unwrap();

    assert!(shared.insert(OrderKey::new(1, 1), 9u64, ()).is_err());
    assert_eq!(shared.len(), 1);

    let map = shared.into_inner();
    assert_eq!(map.member_len(&9), 1);
}
