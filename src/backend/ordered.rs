use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

use super::{Backend, BidirectionalBackend, SortedBackend};

/// Balanced-tree backend: ascending iteration, `O(log n)` per operation.
///
/// Erasing an entry only invalidates cursors positioned at that entry;
/// since every mutation needs `&mut self`, no cursor survives it anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedBackend<I, V> {
    map: BTreeMap<I, V>,
}

impl<I: Ord, V> OrderedBackend<I, V> {
    /// Create an empty tree backend.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Give up the backend and return the underlying map.
    pub fn into_inner(self) -> BTreeMap<I, V> {
        self.map
    }
}

impl<I: Ord, V> Default for OrderedBackend<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Ord, V> From<BTreeMap<I, V>> for OrderedBackend<I, V> {
    fn from(map: BTreeMap<I, V>) -> Self {
        Self { map }
    }
}

impl<I: Ord, V> Backend for OrderedBackend<I, V> {
    type Index = I;
    type Value = V;
    type Iter<'a> = btree_map::Range<'a, I, V> where Self: 'a;

    const SORTED: bool = true;

    fn upsert(&mut self, index: I, value: V) -> Option<V> {
        self.map.insert(index, value)
    }

    fn lookup(&self, index: &I) -> Option<&V> {
        self.map.get(index)
    }

    fn erase(&mut self, index: &I) -> Option<V> {
        self.map.remove(index)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.map.range::<I, _>(..)
    }
}

impl<I: Ord, V> SortedBackend for OrderedBackend<I, V> {}

impl<I: Ord, V> BidirectionalBackend for OrderedBackend<I, V> {
    fn iter_after(&self, after: Option<&I>) -> Self::Iter<'_> {
        match after {
            Some(index) => self
                .map
                .range::<I, _>((Bound::Excluded(index), Bound::Unbounded)),
            None => self.iter(),
        }
    }

    fn last_before(&self, before: Option<&I>) -> Option<(&I, &V)> {
        match before {
            Some(index) => self.map.range::<I, _>(..index).next_back(),
            None => self.map.iter().next_back(),
        }
    }
}
