use std::cell::RefCell;
use std::rc::Weak;

use crate::reference::Ydd;
use crate::table::UniqueTable;
use crate::types::Key;

/// The payload of a diagram node.
///
/// # Semantics
///
/// A branch node represents the family:
/// ```text
/// F(node) = { {key} ∪ s | s ∈ F(then) } ∪ F(else)
/// ```
///
/// - `then` branch: subsets that contain `key` (stored without `key`)
/// - `else` branch: subsets that do not contain `key`
///
/// # Invariants
///
/// **Zero-suppression**: `then` is never the 0 family. Constructions where
/// `then` would be 0 collapse to the `else` child before a node exists.
///
/// **Ordering**: any branch child has a strictly greater key than its
/// parent, so keys strictly increase along every descent from a root.
pub(crate) enum NodeData<K: Key> {
    /// The 1 terminal: the family containing only the empty subset.
    One,
    /// An interior decision point on `key`.
    Branch {
        key: K,
        /// Subsets containing `key`, with `key` removed. Never the 0 family.
        then: Ydd<K>,
        /// Subsets not containing `key`.
        else_: Ydd<K>,
    },
}

/// A diagram node. Immutable once interned.
///
/// Nodes are created only by `UniqueTable::intern` and are co-owned by
/// every handle pointing at them: external `Ydd`s, cache records, and the
/// `then`/`else` fields of other nodes. The `Rc` strong count is the
/// node's reference count.
pub(crate) struct Node<K: Key> {
    pub(crate) data: NodeData<K>,
    /// Number of subsets in the family, saturating at `u64::MAX`.
    pub(crate) size: u64,
    /// The owning unique table, so the node can unregister itself when the
    /// last handle disappears.
    pub(crate) table: Weak<RefCell<UniqueTable<K>>>,
}

impl<K: Key> Node<K> {
    pub(crate) fn new(data: NodeData<K>, table: Weak<RefCell<UniqueTable<K>>>) -> Self {
        let size = match &data {
            NodeData::One => 1,
            NodeData::Branch { then, else_, .. } => {
                debug_assert!(!then.is_zero(), "branch node with a 0 then-child");
                then.size().saturating_add(else_.size())
            }
        };
        Self { data, size, table }
    }
}

impl<K: Key> Drop for Node<K> {
    fn drop(&mut self) {
        // The child handles held in `data` are released after this body,
        // which may in turn drop further nodes; by then the table borrow
        // taken here is already gone.
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().forget(self);
        }
    }
}
