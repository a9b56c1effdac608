use conmap::{ConMap, ConMapBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Animal {
    name: u16,
}

#[test]
fn test_json_object_members() {
    let map = ConMapBuilder::new()
        .shard_count(2)
        .unwrap()
        .build::<u16, i32>()
        .unwrap();

    map.insert(1, 1);
    map.insert(2, 2);

    // Member order depends on shard traversal; compare as parsed values
    let json = map.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({"1": 1, "2": 2}));
}

#[test]
fn test_json_round_trip() {
    let map = ConMap::new();
    for i in 0..100u16 {
        map.insert(i, Animal { name: i });
    }

    let json = map.to_json().unwrap();
    let restored: ConMap<u16, Animal> = ConMap::from_json(&json).unwrap();

    assert_eq!(restored.len(), map.len());
    for i in 0..100u16 {
        assert_eq!(*restored.get(&i).unwrap(), Animal { name: i });
    }
}

#[test]
fn test_serde_trait_impls() {
    let map = ConMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);

    // The map participates in serde directly, not only via the helpers
    let json = serde_json::to_string(&map).unwrap();
    let restored: ConMap<String, i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), 2);
    assert_eq!(*restored.get(&"a".to_string()).unwrap(), 1);
    assert_eq!(*restored.get(&"b".to_string()).unwrap(), 2);
}

#[test]
fn test_shard_layout_invisible_in_output() {
    let small = ConMapBuilder::new()
        .shard_count(2)
        .unwrap()
        .build::<u16, i32>()
        .unwrap();
    let large = ConMapBuilder::new()
        .shard_count(64)
        .unwrap()
        .build::<u16, i32>()
        .unwrap();

    for i in 0..20 {
        small.insert(i, i as i32);
        large.insert(i, i as i32);
    }

    let a: serde_json::Value = serde_json::from_str(&small.to_json().unwrap()).unwrap();
    let b: serde_json::Value = serde_json::from_str(&large.to_json().unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_malformed_input_is_recoverable_error() {
    assert!(ConMap::<String, i32>::from_json("not json").is_err());
    assert!(ConMap::<String, i32>::from_json("{\"truncated\":").is_err());

    // Type mismatch on the value
    assert!(ConMap::<String, i32>::from_json("{\"a\": \"string\"}").is_err());

    // A top-level array is not a map
    assert!(ConMap::<String, i32>::from_json("[1, 2, 3]").is_err());
}

#[test]
fn test_deserialize_builds_fresh_default_map() {
    let restored: ConMap<u16, i32> = ConMap::from_json("{\"7\": 7}").unwrap();

    assert_eq!(restored.shard_count(), 32);
    assert_eq!(restored.len(), 1);
    assert_eq!(*restored.get(&7).unwrap(), 7);
}
