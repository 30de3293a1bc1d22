//! The key contract for diagram elements.
//!
//! Keys are the ground-set elements that families of sets are built from.
//! The engine is parametric in the key type and relies only on the
//! capabilities captured by [`Key`]: value semantics, a total order (which
//! induces the top-down branching order of the diagram), structural
//! equality, and a stable hash.

use std::hash::Hash;

/// Capabilities required of a ground-set element type.
///
/// Blanket-implemented for every type with value semantics, a total order,
/// and a stable hash. Integers, strings, and ordered tuples all qualify out
/// of the box.
///
/// The order on keys is load-bearing: keys strictly increase along every
/// branch of a canonical diagram, so two key types that compare differently
/// produce structurally different diagrams for the same abstract family.
pub trait Key: Clone + Ord + Hash {}

impl<T: Clone + Ord + Hash> Key for T {}
