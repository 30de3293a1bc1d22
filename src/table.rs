//! The unique table: a content-addressed store of diagram nodes.
//!
//! Interning a node description returns a handle to the canonical live
//! instance, installing the description on a miss. This is the hash-consing
//! mechanism behind the one-family-one-node invariant: no two live nodes
//! are ever structurally equal.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::node::{Node, NodeData};
use crate::reference::Ydd;
use crate::types::Key;

/// Structural identity of a node description.
///
/// Children are captured by handle identity, so signature equality and
/// hashing are O(1) regardless of diagram depth. Canonicity follows by
/// induction: structurally equal children are identical handles, so two
/// descriptions of the same family always collide here.
#[derive(Clone, PartialEq, Eq, Hash)]
enum Signature<K: Key> {
    One,
    Branch { key: K, then: u64, else_: u64 },
}

impl<K: Key> Signature<K> {
    fn of(data: &NodeData<K>) -> Self {
        match data {
            NodeData::One => Signature::One,
            NodeData::Branch { key, then, else_ } => Signature::Branch {
                key: key.clone(),
                then: then.id(),
                else_: else_.id(),
            },
        }
    }
}

/// A content-addressed store of live nodes.
///
/// The table holds weak references: it never keeps a node alive by itself.
/// Node addresses are stable under insertion (each node has its own `Rc`
/// allocation), and entries are removed eagerly: `forget` runs exactly
/// once per node, from `Node::drop`, when the last handle disappears.
///
/// The table is unbounded; it grows with the number of live distinct
/// families and reports no overflow.
pub struct UniqueTable<K: Key> {
    nodes: HashMap<Signature<K>, Weak<Node<K>>>,
}

impl<K: Key> UniqueTable<K> {
    pub(crate) fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Number of live nodes (terminal included, once materialized).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the canonical handle for `data`, installing a new node if no
    /// structurally equal live node exists.
    pub(crate) fn intern(table: &Rc<RefCell<Self>>, data: NodeData<K>) -> Ydd<K> {
        let signature = Signature::of(&data);

        if let Some(existing) = table.borrow().lookup(&signature) {
            return existing;
        }

        let node = Rc::new(Node::new(data, Rc::downgrade(table)));
        table.borrow_mut().nodes.insert(signature, Rc::downgrade(&node));
        Ydd(Some(node))
    }

    fn lookup(&self, signature: &Signature<K>) -> Option<Ydd<K>> {
        self.nodes
            .get(signature)
            .and_then(Weak::upgrade)
            .map(|node| Ydd(Some(node)))
    }

    /// Removes the entry for `node`. Called from `Node::drop`.
    pub(crate) fn forget(&mut self, node: &Node<K>) {
        self.nodes.remove(&Signature::of(&node.data));
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    #[test]
    fn test_intern_is_canonical() {
        let engine: Engine<i32> = Engine::new();
        let one = engine.one();

        let a = engine.make_node(1, one.clone(), engine.zero());
        let b = engine.make_node(1, one.clone(), engine.zero());
        assert_eq!(a, b);
        // ⊤ and the single branch node.
        assert_eq!(engine.num_nodes(), 2);
    }

    #[test]
    fn test_terminal_is_interned_once() {
        let engine: Engine<i32> = Engine::new();
        let one = engine.one();
        let again = engine.make_terminal(true);
        assert_eq!(one, again);
        assert_eq!(engine.num_nodes(), 1);
    }

    #[test]
    fn test_forget_on_last_drop() {
        let engine: Engine<i32> = Engine::new();
        let one = engine.one();

        let a = engine.make_node(2, one.clone(), engine.zero());
        let b = engine.make_node(1, a.clone(), engine.zero());
        assert_eq!(engine.num_nodes(), 3);

        // `b` still holds `a` as its then-child.
        drop(a);
        assert_eq!(engine.num_nodes(), 3);

        // Dropping `b` releases `a` transitively.
        drop(b);
        assert_eq!(engine.num_nodes(), 1);

        drop(one);
        assert_eq!(engine.num_nodes(), 0);
    }

    #[test]
    fn test_reinterned_after_death() {
        let engine: Engine<i32> = Engine::new();

        let a = engine.subset_of([1]);
        drop(a);
        assert_eq!(engine.num_nodes(), 0);

        // The same family is representable again after reclamation.
        let b = engine.subset_of([1]);
        assert!(b.contains([1]));
        assert_eq!(engine.num_nodes(), 2);
    }
}
