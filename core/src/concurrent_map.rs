//! Score accumulator shared by ranking workers.
//!
//! Keys are spread over a fixed number of shards (`key mod shard_count`), each behind
//! its own mutex, so workers touching different shards never wait on each other.

use crate::document::DocId;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

pub struct ConcurrentMap<V> {
    shards: Vec<Mutex<BTreeMap<DocId, V>>>,
}

impl<V: Default + Clone> ConcurrentMap<V> {
    /// A `shard_count` of zero is treated as one shard.
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self { shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect() }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_of(&self, key: DocId) -> usize {
        (key as i64).rem_euclid(self.shards.len() as i64) as usize
    }

    /// Lock the shard owning `key` and return its value, inserting `V::default()` first
    /// if absent. The shard stays locked until the returned guard is dropped.
    pub fn access(&self, key: DocId) -> MappedMutexGuard<'_, V> {
        let guard = self.shards[self.shard_of(key)].lock();
        MutexGuard::map(guard, |shard| shard.entry(key).or_default())
    }

    /// Merge every shard into one ordered map. Call once writers have finished.
    pub fn build_ordinary_map(&self) -> BTreeMap<DocId, V> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            result.extend(shard.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }
}
