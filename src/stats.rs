//! Load statistics and diagnostics types.

/// Snapshot of map load, taken one shard at a time.
///
/// Counts are best-effort under concurrent mutation: each shard is counted
/// under its own read lock, but no lock spans two shards.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub len: usize,
    /// Number of entries in each shard.
    pub shard_lens: Vec<usize>,
    /// Average load (entries) per shard.
    pub avg_load_per_shard: f64,
    /// Max load / avg load ratio. User interprets (e.g. threshold 2.0 for imbalance).
    pub max_load_ratio: f64,
}

impl Stats {
    pub(crate) fn from_shard_lens(shard_lens: Vec<usize>) -> Self {
        let len: usize = shard_lens.iter().sum();
        let avg_load_per_shard = len as f64 / shard_lens.len() as f64;
        let max_load = shard_lens.iter().copied().max().unwrap_or(0);
        let max_load_ratio = if avg_load_per_shard > 0.0 {
            max_load as f64 / avg_load_per_shard
        } else {
            0.0
        };

        Self {
            len,
            shard_lens,
            avg_load_per_shard,
            max_load_ratio,
        }
    }
}
