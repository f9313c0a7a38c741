//! Key type Tests
//!
//! Version keys travel between members inside replication messages; the
//! ordering must survive a trip through the wire format.

use tombstone_merge::{OrderKey, VersionTag};

#[test]
fn test_tag_survives_bincode() {
    let tag = VersionTag::new("member-a".to_string(), 12, -4);

    let bytes = bincode::serialize(&tag).unwrap();
    let decoded: VersionTag<String> = bincode::deserialize(&bytes).unwrap();

    assert_eq!(decoded, tag);
    assert_eq!(decoded.order_key(), OrderKey::new(12, -4));
}

#[test]
fn test_sorting_keys_uses_sequence_then_timestamp() {
    let mut keys = vec![
        OrderKey::new(2, 1),
        OrderKey::new(1, 9),
        OrderKey::new(1, -3),
        OrderKey::new(i64::MIN, i64::MAX),
    ];
    keys.sort();

    assert_eq!(
        keys,
        vec![
            OrderKey::new(i64::MIN, i64::MAX),
            OrderKey::new(1, -3),
            OrderKey::new(1, 9),
            OrderKey::new(2, 1),
        ]
    );
}

#[test]
fn test_display() {
    assert_eq!(OrderKey::new(3, 40).to_string(), "(seq=3, ts=40)");
}
