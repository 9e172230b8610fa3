#![allow(dead_code)]

use std::collections::BTreeMap;

use infvec::{HashedVector, OrderedVector};

/// Build the same logical content on both stock backends.
pub fn both_backends<I, V>(entries: &[(I, V)]) -> (OrderedVector<I, V>, HashedVector<I, V>)
where
    I: Ord + std::hash::Hash + Clone,
    V: Default + PartialEq + Clone,
{
    let ordered = entries.iter().cloned().collect();
    let hashed = entries.iter().cloned().collect();
    (ordered, hashed)
}

/// Reference model: last write wins, default values dropped.
pub fn model<I: Ord + Clone, V: Default + PartialEq + Clone>(entries: &[(I, V)]) -> BTreeMap<I, V> {
    let mut map = BTreeMap::new();
    for (index, value) in entries {
        if *value == V::default() {
            map.remove(index);
        } else {
            map.insert(index.clone(), value.clone());
        }
    }
    map
}
