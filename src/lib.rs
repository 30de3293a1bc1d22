//! # ydd-rs: Yet-another Decision Diagrams in Rust
//!
//! **`ydd-rs`** is a manager-centric library for manipulating **families of
//! sets** encoded as canonical decision diagrams: a zero-suppressed (ZDD)
//! variant where every distinct family is represented by exactly one shared
//! DAG node.
//!
//! ## What is a YDD?
//!
//! A YDD encodes a finite family F ⊆ 2^K over a totally ordered key type K
//! as a rooted DAG. An interior node `(key, then, else)` denotes the family
//! `{ {key} ∪ s | s ∈ then } ∪ else`; the 1 terminal denotes `{∅}` and the
//! null handle denotes the empty family. Two reduction mechanisms make the
//! representation **canonical**: zero-suppression (a node whose then-child
//! is empty collapses away) and hash consing through a unique table. As a
//! consequence, family equality is a pointer comparison.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: all operations go through the
//!   [`Engine`][crate::engine::Engine], which owns the unique table and the
//!   per-operation caches and guarantees maximal sharing.
//! - **Ownership-Driven Liveness**: [`Ydd`][crate::reference::Ydd] handles
//!   are reference-counted owners; dropping the last handle to a family
//!   reclaims its nodes and unregisters them from the unique table.
//! - **Cached Set Algebra**: union, intersection, difference, and symmetric
//!   difference are memoized in direct-mapped caches, making them
//!   polynomial in diagram size rather than exponential in path count.
//! - **Parametric Keys**: any `Clone + Ord + Hash` type works as the
//!   ground-set element via the [`Key`][crate::types::Key] contract.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ydd_rs::engine::Engine;
//!
//! // 1. Create an engine for integer keys
//! let engine: Engine<u32> = Engine::new();
//!
//! // 2. Build families: {{1, 2}, {1, 3}} and {{1, 2}, {4}}
//! let a = engine.family_of([vec![1, 2], vec![1, 3]]);
//! let b = engine.family_of([vec![1, 2], vec![4]]);
//!
//! // 3. Set algebra over whole families
//! let common = engine.intersection(&a, &b);
//! assert_eq!(common, engine.subset_of([1, 2]));
//!
//! let either = engine.union(&a, &b);
//! assert_eq!(either.size(), 3);
//!
//! // 4. Queries: membership, inclusion, iteration
//! assert!(either.contains([1, 3]));
//! assert!(common <= a);
//! assert_eq!(either.subsets().count(), 3);
//! ```
//!
//! ## Core Components
//!
//! - **[`engine`]**: the [`Engine`][crate::engine::Engine] façade with node
//!   factories, family builders, and the four cached set operations.
//! - **[`reference`]**: the [`Ydd`][crate::reference::Ydd] handle with
//!   identity equality, structural inclusion as `PartialOrd`, and
//!   membership queries.
//! - **[`table`]**: the unique table enforcing one-family-one-node.
//! - **[`cache`]**: fixed-size direct-mapped operation caches.
//! - **[`iter`]**: iteration over the subsets of a family.
//! - **[`count`]**: exact big-integer cardinality.
//!
//! The engine is single-threaded by design: handles and internal state are
//! neither `Send` nor `Sync`.

pub mod cache;
pub mod count;
pub mod engine;
pub mod iter;
mod node;
pub mod reference;
pub mod table;
pub mod types;
pub mod utils;
