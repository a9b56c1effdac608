use crate::shard::Shard;
use crossbeam_channel::{bounded, Receiver};
use std::hash::Hash;
use std::sync::Arc;
use std::thread;

/// Buffered iterator over a fully-materialized copy of the map.
///
/// All entries are copied out shard-by-shard up front (one shard read lock at
/// a time, never two), then iterated with no further locking. Use this when
/// the consumer is slow or unpredictable: no lock is held while it works
/// through the entries.
pub struct SnapshotIter<K, V> {
    entries: std::vec::IntoIter<(K, Arc<V>)>,
}

impl<K, V> SnapshotIter<K, V>
where
    K: Hash + Eq + Send + Sync + Clone,
    V: Send + Sync,
{
    pub(crate) fn new(shards: &[Shard<K, V>]) -> Self {
        let mut entries = Vec::new();

        for shard in shards {
            let map = shard.read_lock();
            for (key, value) in map.iter() {
                entries.push((key.clone(), Arc::clone(value)));
            }
        }

        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for SnapshotIter<K, V> {
    type Item = (K, Arc<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for SnapshotIter<K, V> {}

/// Unbuffered iterator fed by one producer thread per shard.
///
/// Each producer acquires its shard's read lock, pushes that shard's entries
/// into a rendezvous channel, then releases the lock and exits. The channel
/// has no buffer, so a slow consumer backpressures producers: a shard's lock
/// stays held until the consumer has taken all of that shard's entries.
/// Ordering across shards is interleaved and unspecified.
///
/// Dropping the iterator early disconnects the channel; producers observe the
/// failed send, release their locks and exit.
///
/// The consuming thread must not call back into the map while draining: a
/// write to a shard whose producer still holds its read lock would deadlock
/// against the consumer it is waiting on.
pub struct Iter<K, V> {
    rx: Receiver<(K, Arc<V>)>,
}

impl<K, V> Iter<K, V>
where
    K: Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + 'static,
{
    pub(crate) fn new(shards: Arc<[Shard<K, V>]>) -> Self {
        let (tx, rx) = bounded(0);

        for index in 0..shards.len() {
            let shards = Arc::clone(&shards);
            let tx = tx.clone();
            // Producers are detached; they exit once their shard is drained
            // or the receiver is dropped.
            let _ = thread::spawn(move || {
                let map = shards[index].read_lock();
                for (key, value) in map.iter() {
                    if tx.send((key.clone(), Arc::clone(value))).is_err() {
                        break;
                    }
                }
            });
        }

        Self { rx }
    }
}

impl<K, V> Iterator for Iter<K, V> {
    type Item = (K, Arc<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}
