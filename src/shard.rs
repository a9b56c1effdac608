use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::hash::Hash;
use std::sync::Arc;

/// A single shard containing a HashMap protected by a read-write lock.
///
/// Every method is one critical section: the lock is taken, the map is read
/// or mutated, the lock is released. No method touches another shard.
pub(crate) struct Shard<K, V> {
    map: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    pub fn new(capacity: Option<usize>) -> Self {
        let map = match capacity {
            Some(capacity) => HashMap::with_capacity(capacity),
            None => HashMap::new(),
        };
        Self {
            map: RwLock::new(map),
        }
    }

    /// Insert a key-value pair, returning the previous value if any.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut map = self.map.write();
        map.insert(key, Arc::new(value))
    }

    /// Insert only if the key is absent. Returns `true` if the value was
    /// inserted. Check and insert happen under one lock acquisition, so
    /// exactly one of any number of racing callers wins.
    pub fn insert_if_absent(&self, key: K, value: V) -> bool {
        let mut map = self.map.write();
        match map.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(value));
                true
            }
        }
    }

    /// Get a value by key, returning an Arc to enable zero-copy access.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let map = self.map.read();
        map.get(key).cloned()
    }

    /// Remove a key-value pair, returning the value if it existed.
    ///
    /// Lookup and removal are one critical section, so of any number of
    /// racing callers exactly one observes the value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut map = self.map.write();
        map.remove(key)
    }

    /// Insert-or-update through a caller-supplied combine function, returning
    /// the value actually stored.
    ///
    /// `combine` runs while the shard lock is held. If it panics, the lock is
    /// released during unwind and the entry is left as it was.
    pub fn upsert<F>(&self, key: K, new_value: V, combine: F) -> Arc<V>
    where
        F: FnOnce(bool, Option<&V>, V) -> V,
    {
        let mut map = self.map.write();
        match map.entry(key) {
            Entry::Occupied(mut entry) => {
                let stored = Arc::new(combine(true, Some(entry.get().as_ref()), new_value));
                entry.insert(Arc::clone(&stored));
                stored
            }
            Entry::Vacant(entry) => {
                let stored = Arc::new(combine(false, None, new_value));
                entry.insert(Arc::clone(&stored));
                stored
            }
        }
    }

    /// Get the number of entries in this shard.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Check if this shard is empty.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Check if a key exists without cloning the value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.read().contains_key(key)
    }

    /// Get a read lock for iteration purposes.
    pub fn read_lock(&self) -> parking_lot::RwLockReadGuard<'_, HashMap<K, Arc<V>>> {
        self.map.read()
    }
}
