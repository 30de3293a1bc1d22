//! Direct-mapped memoization of binary set operations.
//!
//! Each of the four set operations owns one fixed-capacity cache. A record
//! stores the two operand handles and the result handle; a key hashes to
//! exactly one slot and collisions overwrite the previous record
//! (last-writer-wins, no chaining, no LRU).
//!
//! # Characteristics
//!
//! - **O(1) lookup and insert**: a single slot access
//! - **High collision rate**: one slot per hash bucket
//! - **Correctness independent of collisions**: a hit requires identity
//!   equality on both stored operands, never the hash alone
//!
//! Records own their handles, so cached operands and results stay alive
//! until the slot is overwritten or the cache is cleared. Overwriting a
//! slot drops the old record's handles, which may reclaim nodes.

use std::cell::Cell;

use crate::reference::Ydd;
use crate::types::Key;
use crate::utils::pair_ids;

struct Record<K: Key> {
    left: Ydd<K>,
    right: Ydd<K>,
    result: Ydd<K>,
}

/// Aggregated lookup counters for one operation cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Misses caused by a slot being occupied by a different operand pair.
    pub faults: usize,
}

/// A fixed-capacity, direct-mapped cache of `(left, right) -> result`.
pub struct OpCache<K: Key> {
    slots: Vec<Option<Record<K>>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
    faults: Cell<usize>,
}

impl<K: Key> OpCache<K> {
    /// Creates a cache with the given number of slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "Cache capacity must be at least 1");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            hits: Cell::new(0),
            misses: Cell::new(0),
            faults: Cell::new(0),
        }
    }

    /// Number of slots in the cache.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Lookup counters accumulated since construction or `clear`.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            faults: self.faults.get(),
        }
    }

    /// Drops every record, releasing the handles it held.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.hits.set(0);
        self.misses.set(0);
        self.faults.set(0);
    }

    fn index(&self, left: &Ydd<K>, right: &Ydd<K>) -> usize {
        (pair_ids(left.id(), right.id()) % self.slots.len() as u64) as usize
    }

    /// Looks up the memoized result for an ordered operand pair.
    ///
    /// Hits require both stored operands to match by handle identity.
    pub fn get(&self, left: &Ydd<K>, right: &Ydd<K>) -> Option<Ydd<K>> {
        let index = self.index(left, right);
        match &self.slots[index] {
            Some(record) if record.left == *left && record.right == *right => {
                self.hits.set(self.hits.get() + 1);
                Some(record.result.clone())
            }
            Some(_) => {
                self.faults.set(self.faults.get() + 1);
                self.misses.set(self.misses.get() + 1);
                None
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Stores a result, overwriting whatever occupied the slot.
    pub fn insert(&mut self, left: Ydd<K>, right: Ydd<K>, result: Ydd<K>) {
        let index = self.index(&left, &right);
        // Build the record before the old one is dropped, so nodes shared
        // between the two never see their count reach zero in between.
        let record = Record { left, right, result };
        self.slots[index] = Some(record);
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    use super::*;

    #[test]
    fn test_insert_get() {
        let engine: Engine<i32> = Engine::new();
        let a = engine.subset_of([1]);
        let b = engine.subset_of([2]);
        let u = engine.family_of([vec![1], vec![2]]);

        let mut cache = OpCache::new(8);
        assert_eq!(cache.get(&a, &b), None);

        cache.insert(a.clone(), b.clone(), u.clone());
        assert_eq!(cache.get(&a, &b), Some(u.clone()));

        // Ordered pairs: the swapped pair is a separate slot.
        assert_eq!(cache.get(&b, &a), None);
    }

    #[test]
    fn test_overwrite() {
        let engine: Engine<i32> = Engine::new();
        let a = engine.subset_of([1]);
        let b = engine.subset_of([2]);

        let mut cache = OpCache::new(8);
        cache.insert(a.clone(), a.clone(), a.clone());
        cache.insert(a.clone(), a.clone(), b.clone());
        assert_eq!(cache.get(&a, &a), Some(b));
    }

    #[test]
    fn test_single_slot_collisions() {
        let engine: Engine<i32> = Engine::new();
        let handles: Vec<_> = (1..=4).map(|k| engine.subset_of([k])).collect();

        // One slot: every insert evicts the previous record.
        let mut cache = OpCache::new(1);
        for h in &handles {
            cache.insert(h.clone(), h.clone(), h.clone());
        }

        let survivors = handles.iter().filter(|h| cache.get(h, h).is_some()).count();
        assert_eq!(survivors, 1);
        assert!(cache.stats().faults > 0);
    }

    #[test]
    fn test_eviction_releases_handles() {
        let engine: Engine<i32> = Engine::new();
        let mut cache = OpCache::new(1);

        let a = engine.subset_of([1]);
        cache.insert(a.clone(), a.clone(), a.clone());
        drop(a);
        // The record still pins the nodes of {{1}}: ⊤ and one branch.
        assert_eq!(engine.num_nodes(), 2);

        let b = engine.subset_of([2]);
        cache.insert(b.clone(), b.clone(), b.clone());
        // The evicted record released {{1}}; ⊤ is shared with {{2}}.
        assert_eq!(engine.num_nodes(), 2);
        assert!(b.contains([2]));
    }

    #[test]
    fn test_stats() {
        let engine: Engine<i32> = Engine::new();
        let a = engine.subset_of([1]);

        let mut cache = OpCache::new(4);
        cache.get(&a, &a);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);

        cache.insert(a.clone(), a.clone(), a.clone());
        cache.get(&a, &a);
        assert_eq!(cache.stats().hits, 1);

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.get(&a, &a), None);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_zero_capacity_panics() {
        OpCache::<i32>::new(0);
    }
}
