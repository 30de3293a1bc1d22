//! The engine: owner of the unique table and the operation caches.
//!
//! All families belonging to one engine share a single canonical diagram,
//! so family equality is handle identity and common substructure is stored
//! once. The engine is the only source of handles: terminals and interior
//! nodes come from its factory methods, and the four set-algebra operations
//! derive new families from existing ones.
//!
//! # Quick Start
//!
//! ```
//! use ydd_rs::engine::Engine;
//!
//! let engine: Engine<u32> = Engine::new();
//!
//! // {{1}, {2}} and {{1}}
//! let a = engine.family_of([vec![1], vec![2]]);
//! let b = engine.subset_of([1]);
//!
//! assert_eq!(engine.intersection(&a, &b), b);
//! assert_eq!(engine.union(&a, &b), a);
//! assert!(b < a);
//! assert_eq!(engine.difference(&a, &b).size(), 1);
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use log::debug;

use crate::cache::{CacheStats, OpCache};
use crate::node::NodeData;
use crate::reference::Ydd;
use crate::table::UniqueTable;
use crate::types::Key;

/// Per-operation cache capacities, in slots.
///
/// Every capacity must be at least 1. Small caches stay correct (hits
/// require identity matches on both operands) but recompute more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSizes {
    pub union: usize,
    pub intersection: usize,
    pub difference: usize,
    pub symmetric_difference: usize,
}

impl CacheSizes {
    /// The same capacity for all four operations.
    pub const fn uniform(size: usize) -> Self {
        Self {
            union: size,
            intersection: size,
            difference: size,
            symmetric_difference: size,
        }
    }
}

impl Default for CacheSizes {
    fn default() -> Self {
        Self::uniform(512)
    }
}

/// Lookup counters for all four operation caches.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    pub union: CacheStats,
    pub intersection: CacheStats,
    pub difference: CacheStats,
    pub symmetric_difference: CacheStats,
}

/// A manager for canonical families of sets over the key type `K`.
///
/// The engine owns the unique table and one direct-mapped cache per binary
/// operation. Operations take `&self`; internal state lives behind
/// `RefCell`, and no borrow is held across a recursive call. The engine is
/// single-threaded and not clonable; handles from different engines must
/// not be mixed.
pub struct Engine<K: Key> {
    union_cache: RefCell<OpCache<K>>,
    intersection_cache: RefCell<OpCache<K>>,
    difference_cache: RefCell<OpCache<K>>,
    symmetric_difference_cache: RefCell<OpCache<K>>,
    // Declared after the caches: cache records unregister their nodes
    // through the table during engine teardown.
    table: Rc<RefCell<UniqueTable<K>>>,
}

impl<K: Key> Engine<K> {
    /// Creates an engine with the default cache sizes.
    pub fn new() -> Self {
        Self::with_cache_sizes(CacheSizes::default())
    }

    /// Creates an engine with explicit per-operation cache sizes.
    ///
    /// # Panics
    ///
    /// Panics if any capacity is zero.
    pub fn with_cache_sizes(sizes: CacheSizes) -> Self {
        Self {
            union_cache: RefCell::new(OpCache::new(sizes.union)),
            intersection_cache: RefCell::new(OpCache::new(sizes.intersection)),
            difference_cache: RefCell::new(OpCache::new(sizes.difference)),
            symmetric_difference_cache: RefCell::new(OpCache::new(sizes.symmetric_difference)),
            table: Rc::new(RefCell::new(UniqueTable::new())),
        }
    }
}

impl<K: Key> Default for Engine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Debug for Engine<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("num_nodes", &self.num_nodes())
            .field("union_cache", &self.union_cache.borrow().capacity())
            .field("intersection_cache", &self.intersection_cache.borrow().capacity())
            .field("difference_cache", &self.difference_cache.borrow().capacity())
            .field(
                "symmetric_difference_cache",
                &self.symmetric_difference_cache.borrow().capacity(),
            )
            .finish()
    }
}

impl<K: Key> Engine<K> {
    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    /// The empty family **0**. No node is allocated.
    pub fn zero(&self) -> Ydd<K> {
        Ydd::default()
    }

    /// The family **1** = {∅}, materialized on first call.
    pub fn one(&self) -> Ydd<K> {
        UniqueTable::intern(&self.table, NodeData::One)
    }

    /// `make_terminal(true)` is **1**; `make_terminal(false)` is **0**.
    pub fn make_terminal(&self, one: bool) -> Ydd<K> {
        if one {
            self.one()
        } else {
            self.zero()
        }
    }

    /// Returns the canonical handle for the family
    /// `{ {key} ∪ s | s ∈ then } ∪ else`.
    ///
    /// Applies zero-suppression: a 0 then-child collapses the construction
    /// to `else_` without allocating. Child keys must be strictly greater
    /// than `key`; violating the ordering is a programmer error.
    pub fn make_node(&self, key: K, then: Ydd<K>, else_: Ydd<K>) -> Ydd<K> {
        if then.is_zero() {
            return else_;
        }
        debug_assert!(
            then.is_terminal() || *then.key() > key,
            "then-child key must be greater than the node key"
        );
        debug_assert!(
            else_.is_terminal() || *else_.key() > key,
            "else-child key must be greater than the node key"
        );
        UniqueTable::intern(&self.table, NodeData::Branch { key, then, else_ })
    }

    /// The family containing exactly the one given subset.
    ///
    /// Duplicates and ordering in the input are irrelevant. An empty input
    /// yields **1** = {∅}.
    pub fn subset_of(&self, keys: impl IntoIterator<Item = K>) -> Ydd<K> {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();

        let mut family = self.one();
        for key in keys.into_iter().rev() {
            family = self.make_node(key, family, self.zero());
        }
        family
    }

    /// The family containing exactly the given subsets.
    ///
    /// An empty input yields **0**; `family_of([[]])` yields **1**.
    pub fn family_of(
        &self,
        subsets: impl IntoIterator<Item = impl IntoIterator<Item = K>>,
    ) -> Ydd<K> {
        let mut family = self.zero();
        for subset in subsets {
            let single = self.subset_of(subset);
            family = self.union(&family, &single);
        }
        family
    }

    // ------------------------------------------------------------------
    // Set-algebra operations
    // ------------------------------------------------------------------

    /// Union: subsets in either family.
    pub fn union(&self, left: &Ydd<K>, right: &Ydd<K>) -> Ydd<K> {
        debug!("union({}, {})", left, right);

        if left.is_zero() {
            return right.clone();
        }
        if right.is_zero() || left == right {
            return left.clone();
        }

        if let Some(result) = self.union_cache.borrow().get(left, right) {
            return result;
        }

        let result = if left.is_one() {
            // right is interior here: a terminal right was handled above.
            self.make_node(right.key().clone(), right.then_(), self.union(&right.else_(), left))
        } else if right.is_one() {
            self.make_node(left.key().clone(), left.then_(), self.union(&left.else_(), right))
        } else {
            match left.key().cmp(right.key()) {
                Ordering::Less => {
                    // right holds no subset containing left's root key.
                    self.make_node(left.key().clone(), left.then_(), self.union(&left.else_(), right))
                }
                Ordering::Equal => {
                    let then = self.union(&left.then_(), &right.then_());
                    let else_ = self.union(&left.else_(), &right.else_());
                    self.make_node(left.key().clone(), then, else_)
                }
                Ordering::Greater => {
                    self.make_node(right.key().clone(), right.then_(), self.union(&right.else_(), left))
                }
            }
        };

        self.union_cache
            .borrow_mut()
            .insert(left.clone(), right.clone(), result.clone());
        result
    }

    /// Intersection: subsets in both families.
    pub fn intersection(&self, left: &Ydd<K>, right: &Ydd<K>) -> Ydd<K> {
        debug!("intersection({}, {})", left, right);

        if left.is_zero() || right.is_zero() {
            return self.zero();
        }
        if left == right {
            return left.clone();
        }

        if let Some(result) = self.intersection_cache.borrow().get(left, right) {
            return result;
        }

        let result = if left.is_one() {
            // Only ∅ can survive: 1 if ∅ ∈ right, else 0.
            right.else_most()
        } else if right.is_one() {
            left.else_most()
        } else {
            match left.key().cmp(right.key()) {
                Ordering::Less => self.intersection(&left.else_(), right),
                Ordering::Equal => {
                    let then = self.intersection(&left.then_(), &right.then_());
                    let else_ = self.intersection(&left.else_(), &right.else_());
                    self.make_node(left.key().clone(), then, else_)
                }
                Ordering::Greater => self.intersection(left, &right.else_()),
            }
        };

        self.intersection_cache
            .borrow_mut()
            .insert(left.clone(), right.clone(), result.clone());
        result
    }

    /// Difference: subsets in `left` but not in `right`.
    pub fn difference(&self, left: &Ydd<K>, right: &Ydd<K>) -> Ydd<K> {
        debug!("difference({}, {})", left, right);

        if left.is_zero() || left == right {
            return self.zero();
        }
        if right.is_zero() {
            return left.clone();
        }

        if let Some(result) = self.difference_cache.borrow().get(left, right) {
            return result;
        }

        let result = if left.is_one() {
            if right.contains_empty() {
                self.zero()
            } else {
                left.clone()
            }
        } else if right.is_one() {
            // Remove ∅ from left.
            let else_ = self.difference(&left.else_(), right);
            self.make_node(left.key().clone(), left.then_(), else_)
        } else {
            match left.key().cmp(right.key()) {
                Ordering::Less => {
                    let else_ = self.difference(&left.else_(), right);
                    self.make_node(left.key().clone(), left.then_(), else_)
                }
                Ordering::Equal => {
                    let then = self.difference(&left.then_(), &right.then_());
                    let else_ = self.difference(&left.else_(), &right.else_());
                    self.make_node(left.key().clone(), then, else_)
                }
                Ordering::Greater => self.difference(left, &right.else_()),
            }
        };

        self.difference_cache
            .borrow_mut()
            .insert(left.clone(), right.clone(), result.clone());
        result
    }

    /// Symmetric difference: subsets in exactly one of the two families.
    pub fn symmetric_difference(&self, left: &Ydd<K>, right: &Ydd<K>) -> Ydd<K> {
        debug!("symmetric_difference({}, {})", left, right);

        if left.is_zero() {
            return right.clone();
        }
        if right.is_zero() {
            return left.clone();
        }
        if left == right {
            return self.zero();
        }

        if let Some(result) = self.symmetric_difference_cache.borrow().get(left, right) {
            return result;
        }

        let result = if left.is_one() {
            let else_ = self.symmetric_difference(left, &right.else_());
            self.make_node(right.key().clone(), right.then_(), else_)
        } else if right.is_one() {
            let else_ = self.symmetric_difference(&left.else_(), right);
            self.make_node(left.key().clone(), left.then_(), else_)
        } else {
            match left.key().cmp(right.key()) {
                Ordering::Less => {
                    let else_ = self.symmetric_difference(&left.else_(), right);
                    self.make_node(left.key().clone(), left.then_(), else_)
                }
                Ordering::Equal => {
                    let then = self.symmetric_difference(&left.then_(), &right.then_());
                    let else_ = self.symmetric_difference(&left.else_(), &right.else_());
                    self.make_node(left.key().clone(), then, else_)
                }
                Ordering::Greater => {
                    let else_ = self.symmetric_difference(left, &right.else_());
                    self.make_node(right.key().clone(), right.then_(), else_)
                }
            }
        };

        self.symmetric_difference_cache
            .borrow_mut()
            .insert(left.clone(), right.clone(), result.clone());
        result
    }

    /// Returns true if the two families share no subset.
    pub fn is_disjoint(&self, left: &Ydd<K>, right: &Ydd<K>) -> bool {
        self.intersection(left, right).is_zero()
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of live nodes in the unique table (terminal included, once
    /// materialized).
    pub fn num_nodes(&self) -> usize {
        self.table.borrow().len()
    }

    /// Lookup counters of the four operation caches.
    pub fn cache_stats(&self) -> EngineStats {
        EngineStats {
            union: self.union_cache.borrow().stats(),
            intersection: self.intersection_cache.borrow().stats(),
            difference: self.difference_cache.borrow().stats(),
            symmetric_difference: self.symmetric_difference_cache.borrow().stats(),
        }
    }

    /// Drops every cache record, releasing the nodes pinned only by caches.
    pub fn clear_caches(&self) {
        self.union_cache.borrow_mut().clear();
        self.intersection_cache.borrow_mut().clear();
        self.difference_cache.borrow_mut().clear();
        self.symmetric_difference_cache.borrow_mut().clear();
    }
}
