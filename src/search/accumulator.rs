//! Concurrent score accumulator.
//!
//! [`ConcurrentAccumulator`] is a map from integer keys to values split into
//! a fixed number of shards. Each shard owns an ordered map behind its own
//! lock and a key always lives in shard `key mod shard_count`, so updates to
//! keys in different shards never contend. At most one shard lock is held at
//! any time.
//!
//! # Examples
//!
//! ```
//! use pilum::search::accumulator::ConcurrentAccumulator;
//! use rayon::prelude::*;
//!
//! let accumulator = ConcurrentAccumulator::<i64, f64>::new(4).unwrap();
//! (0..100i64).into_par_iter().for_each(|i| {
//!     *accumulator.access(i % 10) += 1.0;
//! });
//! accumulator.erase(&3);
//!
//! let map = accumulator.into_map();
//! assert_eq!(map.len(), 9);
//! assert_eq!(map[&0], 10.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::error::{PilumError, Result};

/// Integer keys that can be routed to a shard.
pub trait ShardKey: Copy + Ord {
    /// Value reduced modulo the shard count to pick a shard.
    fn shard_hash(self) -> u64;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_hash(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Fixed-shard, lock-partitioned map.
pub struct ConcurrentAccumulator<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentAccumulator<K, V> {
    /// Create an accumulator with `shard_count` shards.
    pub fn new(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(PilumError::invalid_config(
                "accumulator shard count must be greater than zero",
            ));
        }
        let shards = (0..shard_count)
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        Ok(Self { shards })
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    #[inline]
    fn shard(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        let index = key.shard_hash() % self.shards.len() as u64;
        &self.shards[index as usize]
    }

    /// Lock the shard owning `key` and return its value slot, created with
    /// `V::default()` if absent. The shard stays locked until the guard drops.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard(key).lock(), |map| map.entry(key).or_default())
    }

    /// Remove `key`, locking only its shard.
    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(*key).lock().remove(key)
    }

    /// Copy all entries into one ordered map, locking shards one at a time.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let map = shard.lock();
            result.extend(map.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }

    /// Merge all shards into one ordered map.
    pub fn into_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards {
            result.append(&mut shard.into_inner());
        }
        result
    }

    /// Total number of entries, locking shards one at a time.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Whether no shard holds an entry.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }
}

impl<K, V> fmt::Debug for ConcurrentAccumulator<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentAccumulator")
            .field("shards", &self.shards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_zero_shards_rejected() {
        assert!(ConcurrentAccumulator::<i64, f64>::new(0).is_err());
    }

    #[test]
    fn test_access_creates_default() {
        let accumulator = ConcurrentAccumulator::<i64, f64>::new(3).unwrap();
        assert!(accumulator.is_empty());
        {
            let slot = accumulator.access(5);
            assert_eq!(*slot, 0.0);
        }
        *accumulator.access(5) += 2.5;
        assert_eq!(accumulator.len(), 1);
        assert_eq!(accumulator.snapshot()[&5], 2.5);
    }

    #[test]
    fn test_erase() {
        let accumulator = ConcurrentAccumulator::<u32, i32>::new(2).unwrap();
        *accumulator.access(1) += 1;
        *accumulator.access(2) += 2;
        assert_eq!(accumulator.erase(&1), Some(1));
        assert_eq!(accumulator.erase(&1), None);
        assert_eq!(accumulator.into_map().into_iter().collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn test_keys_spread_across_shards_merge_in_order() {
        let accumulator = ConcurrentAccumulator::<i64, u64>::new(7).unwrap();
        for key in (0..50).rev() {
            *accumulator.access(key) += 1;
        }
        let keys: Vec<i64> = accumulator.snapshot().into_keys().collect();
        assert_eq!(keys, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_accumulation() {
        let accumulator = ConcurrentAccumulator::<usize, u64>::new(16).unwrap();
        (0..10_000usize).into_par_iter().for_each(|i| {
            *accumulator.access(i % 100) += 1;
        });
        (0..100usize)
            .into_par_iter()
            .filter(|i| i % 2 == 1)
            .for_each(|i| {
                accumulator.erase(&i);
            });

        let map = accumulator.into_map();
        assert_eq!(map.len(), 50);
        assert!(map.values().all(|&count| count == 100));
    }
}
