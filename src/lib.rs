//! # ConMap
//!
//! A concurrent sharded map with atomic check-then-act operations.
//!
//! ConMap splits your data across multiple shards, each with its own lock.
//! This means operations on different shards don't block each other, giving
//! you much better performance under contention than a single global lock.
//! Values are stored behind `Arc<T>` so you can share them without copying.
//!
//! ## Features
//!
//! - **High Performance**: Sharded design minimizes lock contention
//! - **Thread-Safe**: All operations are safe for concurrent access
//! - **Zero-Copy Reads**: Values stored as `Arc<T>` for efficient sharing
//! - **Atomic Composites**: `insert_if_absent`, `pop` and `upsert` are single
//!   critical sections, so check-then-act races are impossible
//! - **Deterministic**: Same key always maps to the same shard
//! - **Two Iteration Modes**: backpressured per-shard streaming or a
//!   fully-buffered snapshot
//! - **JSON Round-Tripping**: serde `Serialize`/`Deserialize` plus
//!   `to_json`/`from_json` helpers
//!
//! ## Example
//!
//! ```rust
//! use conmap::ConMap;
//!
//! let map = ConMap::new();
//!
//! // Insert values
//! map.insert("key1", 1);
//! map.insert("key2", 2);
//!
//! // Read values (zero-copy via Arc)
//! if let Some(value) = map.get(&"key1") {
//!     println!("Found: {}", *value);
//! }
//!
//! // Atomic check-then-act
//! map.insert_if_absent("key3", 3);
//! let popped = map.pop(&"key2");
//! assert_eq!(*popped.unwrap(), 2);
//!
//! // Iterate over a snapshot of the entries
//! for (key, value) in map.iter_snapshot() {
//!     println!("{}: {}", key, *value);
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use conmap::{ConMapBuilder, HashFunction};
//!
//! let map = ConMapBuilder::new()
//!     .shard_count(64)?  // Must be power of two
//!     .hash_function(HashFunction::Fnv)
//!     .build::<String, i32>()?;
//! # Ok::<(), conmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Main ConMap implementation.
pub mod conmap;
/// Error types.
pub mod error;
/// Hash function implementations.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Serde impls and JSON helpers.
pub mod json;
/// Internal shard implementation.
pub mod shard;
/// Load statistics collection.
pub mod stats;

// Re-export main types
pub use config::{Config, ConMapBuilder, HashFunction};
pub use conmap::ConMap;
pub use error::Error;
pub use stats::Stats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let map = ConMap::new();

        // Insert
        assert!(map.insert("key1", "value1").is_none());
        assert_eq!(map.insert("key1", "value2").unwrap().as_ref(), &"value1");

        // Get
        assert_eq!(map.get(&"key1").unwrap().as_ref(), &"value2");
        assert!(map.get(&"nonexistent").is_none());

        // Pop
        assert_eq!(map.pop(&"key1").unwrap().as_ref(), &"value2");
        assert!(map.get(&"key1").is_none());
    }

    #[test]
    fn test_insert_if_absent() {
        let map = ConMap::new();

        assert!(map.insert_if_absent("key", 1));
        assert!(!map.insert_if_absent("key", 2));
        assert_eq!(*map.get(&"key").unwrap(), 1);
    }

    #[test]
    fn test_upsert() {
        let map = ConMap::new();
        let combine = |_exists, current: Option<&i32>, new| current.copied().unwrap_or(0) + new;

        assert_eq!(*map.upsert("counter", 1, combine), 1);
        assert_eq!(*map.upsert("counter", 10, combine), 11);
        assert_eq!(*map.get(&"counter").unwrap(), 11);
    }

    #[test]
    fn test_stats() {
        let map = ConMap::new();
        map.insert("key1", "value1");
        map.insert("key2", "value2");

        let stats = map.stats();
        assert_eq!(stats.len, 2);
    }

    #[test]
    fn test_builder() {
        let map = ConMapBuilder::new()
            .shard_count(8)
            .unwrap()
            .build::<String, i32>()
            .unwrap();

        map.insert("test".to_string(), 42);
        assert_eq!(*map.get(&"test".to_string()).unwrap(), 42);
    }
}
