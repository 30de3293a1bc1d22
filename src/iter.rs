//! Iteration over the subsets of a family.

use crate::reference::Ydd;
use crate::types::Key;

impl<K: Key> Ydd<K> {
    /// Iterates over the subsets of the family.
    ///
    /// Each subset is yielded as a vector of keys in ascending order. The
    /// order in which subsets appear is unspecified.
    pub fn subsets(&self) -> Subsets<K> {
        Subsets::new(self.clone())
    }
}

impl<'a, K: Key> IntoIterator for &'a Ydd<K> {
    type Item = Vec<K>;
    type IntoIter = Subsets<K>;

    fn into_iter(self) -> Subsets<K> {
        self.subsets()
    }
}

/// Iterator over the subsets of a family.
///
/// Walks the diagram depth-first with an explicit stack of
/// `(node, partial subset)` pairs; every path reaching the 1 terminal is
/// one subset. The iterator holds its own handles, so the family stays
/// alive for as long as the iteration does.
pub struct Subsets<K: Key> {
    stack: Vec<(Ydd<K>, Vec<K>)>,
}

impl<K: Key> Subsets<K> {
    fn new(root: Ydd<K>) -> Self {
        Self {
            stack: vec![(root, Vec::new())],
        }
    }
}

impl<K: Key> Iterator for Subsets<K> {
    type Item = Vec<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, subset)) = self.stack.pop() {
            if node.is_zero() {
                continue;
            }
            if node.is_one() {
                return Some(subset);
            }

            self.stack.push((node.else_(), subset.clone()));

            // Keys grow strictly downward, so pushing keeps the subset sorted.
            let mut with_key = subset;
            with_key.push(node.key().clone());
            self.stack.push((node.then_(), with_key));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::engine::Engine;

    #[test]
    fn test_terminal_subsets() {
        let engine: Engine<i32> = Engine::new();

        assert_eq!(engine.zero().subsets().count(), 0);

        let of_one: Vec<_> = engine.one().subsets().collect();
        assert_eq!(of_one, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_subsets_roundtrip() {
        let engine: Engine<i32> = Engine::new();
        let family = engine.family_of([vec![4], vec![4, 5], vec![4, 6, 9]]);

        let seen: BTreeSet<Vec<i32>> = family.subsets().collect();
        let expected: BTreeSet<Vec<i32>> =
            [vec![4], vec![4, 5], vec![4, 6, 9]].into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_subsets_are_sorted() {
        let engine: Engine<i32> = Engine::new();
        let family = engine.subset_of([9, 4, 6]);

        let subsets: Vec<_> = family.subsets().collect();
        assert_eq!(subsets, vec![vec![4, 6, 9]]);
    }

    #[test]
    fn test_count_matches_size() {
        let engine: Engine<i32> = Engine::new();
        let family = engine.family_of([vec![], vec![1], vec![1, 2], vec![3]]);
        assert_eq!(family.subsets().count() as u64, family.size());
    }

    #[test]
    fn test_for_loop_over_reference() {
        let engine: Engine<i32> = Engine::new();
        let family = engine.family_of([vec![1], vec![2]]);

        let mut total = 0;
        for subset in &family {
            assert_eq!(subset.len(), 1);
            total += 1;
        }
        assert_eq!(total, 2);
    }
}
