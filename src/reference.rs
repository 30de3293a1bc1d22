//! The user-visible handle to a family of sets.
//!
//! A [`Ydd`] is an owning, possibly-null reference to a diagram node.
//! Cloning a handle keeps the node alive; dropping the last handle releases
//! the node, unregisters it from the unique table, and transitively
//! releases its children.
//!
//! Because the engine maintains maximal sharing, handle identity *is*
//! family equality: two handles compare equal exactly when they denote the
//! same family. Structural inclusion of families is exposed as
//! [`PartialOrd`], so `a <= b` asks whether every subset of `a`'s family is
//! a subset of `b`'s family.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::node::{Node, NodeData};
use crate::types::Key;

/// A handle to a family of sets.
///
/// The null handle (obtained from [`Default`] or
/// [`Engine::zero`][crate::engine::Engine::zero]) denotes the empty family
/// **0**; no node backs it. All other handles point at an interned node.
///
/// Handles may only be combined with handles produced by the same engine.
#[derive(Clone)]
pub struct Ydd<K: Key>(pub(crate) Option<Rc<Node<K>>>);

impl<K: Key> Default for Ydd<K> {
    /// The null handle: the empty family **0**.
    fn default() -> Self {
        Ydd(None)
    }
}

impl<K: Key> Ydd<K> {
    /// Returns true if this is the empty family **0**.
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if this is the family **1** = {∅}.
    pub fn is_one(&self) -> bool {
        matches!(self.0.as_deref(), Some(Node { data: NodeData::One, .. }))
    }

    /// Returns true if this is **0** or **1**.
    pub fn is_terminal(&self) -> bool {
        self.is_zero() || self.is_one()
    }

    /// The key at the root of the diagram.
    ///
    /// # Panics
    ///
    /// Panics if the handle is **0** or **1**.
    pub fn key(&self) -> &K {
        match self.branch() {
            Some((key, _, _)) => key,
            None => panic!("key() called on a terminal handle"),
        }
    }

    /// The then-child: subsets containing the root key, with it removed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is **0** or **1**.
    pub fn then_(&self) -> Ydd<K> {
        match self.branch() {
            Some((_, then, _)) => then.clone(),
            None => panic!("then_() called on a terminal handle"),
        }
    }

    /// The else-child: subsets not containing the root key.
    ///
    /// # Panics
    ///
    /// Panics if the handle is **0** or **1**.
    pub fn else_(&self) -> Ydd<K> {
        match self.branch() {
            Some((_, _, else_)) => else_.clone(),
            None => panic!("else_() called on a terminal handle"),
        }
    }

    /// The number of subsets in the family, saturating at `u64::MAX`.
    ///
    /// Exact counts beyond `u64` are available via [`count`][Ydd::count].
    pub fn size(&self) -> u64 {
        match self.0.as_deref() {
            Some(node) => node.size,
            None => 0,
        }
    }

    /// Identity of the underlying node; 0 for the null handle.
    pub(crate) fn id(&self) -> u64 {
        match &self.0 {
            Some(node) => Rc::as_ptr(node) as usize as u64,
            None => 0,
        }
    }

    fn branch(&self) -> Option<(&K, &Ydd<K>, &Ydd<K>)> {
        match self.0.as_deref() {
            Some(Node {
                data: NodeData::Branch { key, then, else_ },
                ..
            }) => Some((key, then, else_)),
            _ => None,
        }
    }

    /// Follows else-children down to a terminal.
    ///
    /// The result is **1** exactly when the family contains the empty
    /// subset, and **0** otherwise.
    pub(crate) fn else_most(&self) -> Ydd<K> {
        let mut node = self.clone();
        while !node.is_terminal() {
            node = node.else_();
        }
        node
    }

    /// Returns true if the empty subset ∅ belongs to the family.
    pub fn contains_empty(&self) -> bool {
        self.else_most().is_one()
    }

    /// Returns true if the given subset belongs to the family.
    ///
    /// Duplicate keys and ordering in the input are irrelevant.
    pub fn contains(&self, subset: impl IntoIterator<Item = K>) -> bool {
        let mut wanted: Vec<K> = subset.into_iter().collect();
        wanted.sort();
        wanted.dedup();

        let mut node = self.clone();
        let mut next = 0;
        while !node.is_terminal() {
            if next == wanted.len() {
                // All wanted keys matched; the rest must be absent.
                node = node.else_();
                continue;
            }
            match node.key().cmp(&wanted[next]) {
                // The root key is not in the subset.
                Ordering::Less => node = node.else_(),
                Ordering::Equal => {
                    node = node.then_();
                    next += 1;
                }
                // Keys only grow downward, so wanted[next] cannot appear.
                Ordering::Greater => return false,
            }
        }
        node.is_one() && next == wanted.len()
    }
}

/// Handle equality is node identity, which by canonicity coincides with
/// equality of the denoted families. Null handles compare equal.
impl<K: Key> PartialEq for Ydd<K> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<K: Key> Eq for Ydd<K> {}

impl<K: Key> Hash for Ydd<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.id());
    }
}

/// Structural inclusion of families.
///
/// `l ≤ r` holds when every subset in `l`'s family is also a subset in
/// `r`'s family, and `l < r` when additionally `l ≠ r`. Families that are
/// not comparable yield `None` from `partial_cmp`.
///
/// The walk mirrors the intersection co-recursion and is not cached.
impl<K: Key> PartialOrd for Ydd<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if subfamily(self, other) {
            Some(Ordering::Less)
        } else if subfamily(other, self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn le(&self, other: &Self) -> bool {
        subfamily(self, other)
    }

    fn lt(&self, other: &Self) -> bool {
        self != other && subfamily(self, other)
    }

    fn ge(&self, other: &Self) -> bool {
        subfamily(other, self)
    }

    fn gt(&self, other: &Self) -> bool {
        self != other && subfamily(other, self)
    }
}

/// Does every subset of `left`'s family belong to `right`'s family?
fn subfamily<K: Key>(left: &Ydd<K>, right: &Ydd<K>) -> bool {
    if left.is_zero() {
        return true;
    }
    if right.is_terminal() {
        // right = 0 admits only left = 0; right = {∅} admits only itself,
        // since an interior left holds some non-empty subset.
        return left == right;
    }
    if left.is_one() {
        // ∅ ∈ right iff it survives down the else-spine.
        return subfamily(left, &right.else_());
    }

    match left.key().cmp(right.key()) {
        // left holds a subset containing its root key, which no subset of
        // right can contain.
        Ordering::Less => false,
        Ordering::Equal => {
            left == right
                || (subfamily(&left.then_(), &right.then_())
                    && subfamily(&left.else_(), &right.else_()))
        }
        Ordering::Greater => subfamily(left, &right.else_()),
    }
}

impl<K: Key> Display for Ydd<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "⊥")
        } else if self.is_one() {
            write!(f, "⊤")
        } else {
            write!(f, "@{:x}", self.id())
        }
    }
}

impl<K: Key> Debug for Ydd<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
