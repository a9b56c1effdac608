use crate::config::{create_hasher, Config};
use crate::error::Error;
use crate::hash::ShardHasher;
use crate::iter::{Iter, SnapshotIter};
use crate::shard::Shard;
use crate::stats::Stats;
use hashbrown::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Concurrent sharded map.
///
/// Splits your data across a fixed number of shards, each with its own
/// read-write lock. Operations on different shards don't block each other,
/// and no operation ever holds more than one shard's lock at a time. Values
/// are wrapped in `Arc<T>` so you can share them without copying.
///
/// # Example
///
/// ```rust
/// use conmap::ConMap;
///
/// let map = ConMap::new();
/// map.insert("key1", "value1");
///
/// if let Some(value) = map.get(&"key1") {
///     println!("Found: {}", *value);
/// }
/// ```
pub struct ConMap<K, V> {
    shards: Arc<[Shard<K, V>]>,
    shard_mask: usize,
    hash: ShardHasher,
}

impl<K, V> ConMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a new map with defaults (32 shards, ahash).
    pub fn new() -> Self {
        Self::with_config(Config::default()).unwrap()
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        if config.shard_count == 0 || !config.shard_count.is_power_of_two() {
            return Err(Error::InvalidShardCount);
        }

        let shard_count = config.shard_count;
        let mut shards = Vec::with_capacity(shard_count);
        for _ in 0..shard_count {
            shards.push(Shard::new(config.capacity_per_shard));
        }

        Ok(Self {
            shards: shards.into(),
            shard_mask: shard_count - 1,
            hash: create_hasher(config.hash_function),
        })
    }

    /// Figure out which shard this key belongs to.
    #[inline]
    fn shard_index(&self, key: &K) -> usize {
        let hash = self.hash.hash_key(key);
        (hash as usize) & self.shard_mask
    }

    /// Insert a key-value pair. Returns the old value if the key existed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// assert!(map.insert("key", "value").is_none());
    /// assert_eq!(map.insert("key", "new_value").unwrap().as_ref(), &"value");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let shard_idx = self.shard_index(&key);
        self.shards[shard_idx].insert(key, value)
    }

    /// Insert a key-value pair only if the key is absent. Returns `true` if
    /// the value was inserted.
    ///
    /// Check and insert are one atomic critical section: of any number of
    /// racing callers on the same absent key, exactly one returns `true` and
    /// its value is the one stored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// assert!(map.insert_if_absent("key", "first"));
    /// assert!(!map.insert_if_absent("key", "second"));
    /// assert_eq!(*map.get(&"key").unwrap(), "first");
    /// ```
    pub fn insert_if_absent(&self, key: K, value: V) -> bool {
        let shard_idx = self.shard_index(&key);
        self.shards[shard_idx].insert_if_absent(key, value)
    }

    /// Get a value by key. Returns an `Arc<V>` so you can share it without
    /// copying. A missing key is a normal outcome, answered with `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert("key", "value");
    ///
    /// if let Some(value) = map.get(&"key") {
    ///     assert_eq!(*value, "value");
    /// }
    /// assert!(map.get(&"missing").is_none());
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let shard_idx = self.shard_index(key);
        self.shards[shard_idx].get(key)
    }

    /// Check if a key exists without cloning the value.
    pub fn contains_key(&self, key: &K) -> bool {
        let shard_idx = self.shard_index(key);
        self.shards[shard_idx].contains_key(key)
    }

    /// Remove a key-value pair, discarding the value. Removing a missing key
    /// is a no-op. Use [`pop`](Self::pop) to get the value back.
    pub fn remove(&self, key: &K) {
        let shard_idx = self.shard_index(key);
        self.shards[shard_idx].remove(key);
    }

    /// Remove a key-value pair, returning the value if it existed.
    ///
    /// Lookup and removal are one atomic critical section. Of any number of
    /// racing callers on the same key, exactly one gets the value; separate
    /// `get` + `remove` calls would let another writer slip in between.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert(2, "monkey");
    /// assert_eq!(*map.pop(&2).unwrap(), "monkey");
    /// assert!(map.pop(&2).is_none());
    /// ```
    pub fn pop(&self, key: &K) -> Option<Arc<V>> {
        let shard_idx = self.shard_index(key);
        self.shards[shard_idx].remove(key)
    }

    /// Insert or update a value through a caller-supplied combine function,
    /// returning the value actually stored.
    ///
    /// If the key is absent, `combine(false, None, new_value)` is stored; if
    /// present, `combine(true, Some(current), new_value)`. The whole exchange
    /// is one critical section, so racing upserts on the same key serialize
    /// cleanly.
    ///
    /// `combine` executes while the shard lock is held: it must not call back
    /// into the map, and it should not block. If it panics, the panic
    /// propagates to the caller and the shard lock is released as the stack
    /// unwinds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// let combine = |_exists, current: Option<&i32>, new| current.copied().unwrap_or(0) + new;
    ///
    /// assert_eq!(*map.upsert("hits", 1, combine), 1);
    /// assert_eq!(*map.upsert("hits", 1, combine), 2);
    /// ```
    pub fn upsert<F>(&self, key: K, new_value: V, combine: F) -> Arc<V>
    where
        F: FnOnce(bool, Option<&V>, V) -> V,
    {
        let shard_idx = self.shard_index(&key);
        self.shards[shard_idx].upsert(key, new_value, combine)
    }

    /// Insert multiple key-value pairs.
    ///
    /// Implemented as repeated [`insert`](Self::insert) calls: entries land
    /// in their shards one by one, and a concurrent reader may observe a
    /// partially-applied batch. No cross-shard atomicity is promised.
    pub fn insert_many<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    /// Get the total number of entries across all shards.
    ///
    /// Each shard is counted under its own read lock, released before the
    /// next shard is visited. Under concurrent mutation the total is
    /// best-effort, not a single consistent snapshot.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Check if the map is empty. Short-circuits on the first nonempty shard.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.is_empty())
    }

    /// Copy out all keys, one shard lock at a time.
    ///
    /// Not an atomic snapshot across the whole map, and the order is
    /// unspecified.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        for shard in self.shards.iter() {
            let map = shard.read_lock();
            keys.extend(map.keys().cloned());
        }
        keys
    }

    /// Materialize a full copy of the map, one shard lock at a time.
    ///
    /// Not an atomic snapshot across the whole map.
    pub fn items(&self) -> HashMap<K, Arc<V>>
    where
        K: Clone,
    {
        let mut items = HashMap::with_capacity(self.len());
        for shard in self.shards.iter() {
            let map = shard.read_lock();
            for (key, value) in map.iter() {
                items.insert(key.clone(), Arc::clone(value));
            }
        }
        items
    }

    /// Invoke `callback` once per entry, shard by shard.
    ///
    /// The callback runs while the visited shard's read lock is held, and the
    /// lock is released before moving to the next shard. The callback must
    /// not call back into the map: a write to the shard it executes under
    /// would deadlock.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let mut sum = 0;
    /// map.for_each(|_key, value| sum += **value);
    /// assert_eq!(sum, 3);
    /// ```
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &Arc<V>),
    {
        for shard in self.shards.iter() {
            let map = shard.read_lock();
            for (key, value) in map.iter() {
                callback(key, value);
            }
        }
    }

    /// Create an unbuffered iterator fed by one producer thread per shard.
    ///
    /// Each producer holds its shard's read lock only while pushing that
    /// shard's entries into a rendezvous channel, so a slow consumer
    /// backpressures producers instead of growing a buffer. Ordering across
    /// shards is interleaved and unspecified. Do not mutate the map from the
    /// consuming thread while draining; see [`Iter`] for details.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert("key1", 1);
    /// map.insert("key2", 2);
    ///
    /// let sum: i32 = map.iter().map(|(_key, value)| *value).sum();
    /// assert_eq!(sum, 3);
    /// ```
    pub fn iter(&self) -> Iter<K, V>
    where
        K: Clone + 'static,
        V: 'static,
    {
        Iter::new(Arc::clone(&self.shards))
    }

    /// Create a buffered iterator over a point-in-time copy of the map.
    ///
    /// All entries are copied out up front, one shard lock at a time, then
    /// iterated with no locking at all. It won't see modifications made after
    /// the snapshot is taken. Use this when the consumer is slow or
    /// unpredictable, to avoid holding any lock open while it works.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert("key1", "value1");
    /// map.insert("key2", "value2");
    ///
    /// assert_eq!(map.iter_snapshot().count(), 2);
    /// ```
    pub fn iter_snapshot(&self) -> SnapshotIter<K, V>
    where
        K: Clone,
    {
        SnapshotIter::new(&self.shards)
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Current number of entries in each shard, counted one lock at a time.
    pub fn shard_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Get a load statistics snapshot for the map and its shards.
    pub fn stats(&self) -> Stats {
        Stats::from_shard_lens(self.shard_loads())
    }
}

impl<K, V> Default for ConMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
