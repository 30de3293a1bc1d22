//! Exact subset counting.
//!
//! [`Ydd::size`] stores cardinality as a `u64` computed at construction,
//! which saturates for powerset-scale families. This module walks the
//! shared diagram with a per-call memo table and exact big-integer
//! arithmetic instead.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::Ydd;
use crate::types::Key;

impl<K: Key> Ydd<K> {
    /// The exact number of subsets in the family.
    pub fn count(&self) -> BigUint {
        let mut cache = HashMap::new();
        self.count_rec(&mut cache)
    }

    fn count_rec(&self, cache: &mut HashMap<u64, BigUint>) -> BigUint {
        if self.is_zero() {
            return BigUint::ZERO;
        }
        if self.is_one() {
            return BigUint::from(1u32);
        }

        if let Some(count) = cache.get(&self.id()) {
            return count.clone();
        }

        let count = self.then_().count_rec(cache) + self.else_().count_rec(cache);
        cache.insert(self.id(), count.clone());
        count
    }
}
