use std::collections::hash_map::{self, HashMap, RandomState};
use std::hash::{BuildHasher, Hash};

use super::Backend;

/// Hash-table backend: expected `O(1)` per operation, unspecified order.
///
/// The iteration order is stable as long as the table is not mutated. Any
/// insertion may rehash and reorder everything, which is why cursors cannot
/// outlive a mutation (enforced by the `&mut self` receivers).
#[derive(Debug, Clone)]
pub struct HashedBackend<I, V, S = RandomState> {
    map: HashMap<I, V, S>,
}

impl<I: Hash + Eq, V> HashedBackend<I, V> {
    /// Create an empty hash backend with the default hasher.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create an empty hash backend with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }
}

impl<I: Hash + Eq, V, S: BuildHasher> HashedBackend<I, V, S> {
    /// Create an empty hash backend using `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: HashMap::with_hasher(hasher),
        }
    }

    /// Give up the backend and return the underlying map.
    pub fn into_inner(self) -> HashMap<I, V, S> {
        self.map
    }
}

impl<I: Hash + Eq, V, S: BuildHasher + Default> Default for HashedBackend<I, V, S> {
    fn default() -> Self {
        Self {
            map: HashMap::default(),
        }
    }
}

impl<I: Hash + Eq, V, S: BuildHasher> From<HashMap<I, V, S>> for HashedBackend<I, V, S> {
    fn from(map: HashMap<I, V, S>) -> Self {
        Self { map }
    }
}

impl<I: Hash + Eq, V, S: BuildHasher> Backend for HashedBackend<I, V, S> {
    type Index = I;
    type Value = V;
    type Iter<'a> = hash_map::Iter<'a, I, V> where Self: 'a;

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
        self.map.iter()
    }
}
