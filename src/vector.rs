//! The sparse sequence container.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::{debug, trace};

use crate::backend::{Backend, BidirectionalBackend, HashedBackend, OrderedBackend, SortedBackend};
use crate::iter::{Cursor, Entry, Iter};

/// Infinite-dimensional vector with finitely many non-default entries.
///
/// Every index not stored in the backend reads as `B::Value::default()`.
/// Default values are never stored: [`set`](Self::set) with the default
/// value prunes the entry, so [`size`](Self::size) is the size of the
/// support and equality only has to look at stored entries.
///
/// The backend is owned exclusively and only reachable through the
/// operations below plus a shared [`backend`](Self::backend) accessor.
pub struct InfiniteVector<B: Backend> {
    backend: B,
}

/// Sparse sequence over a balanced tree (ascending iteration).
pub type OrderedVector<I, V> = InfiniteVector<OrderedBackend<I, V>>;

/// Sparse sequence over a hash table (unspecified iteration order).
pub type HashedVector<I, V> = InfiniteVector<HashedBackend<I, V>>;

impl<B: Backend + Default> InfiniteVector<B> {
    /// Create the zero vector.
    pub fn new() -> Self {
        Self {
            backend: B::default(),
        }
    }
}

impl<B: Backend + Default> Default for InfiniteVector<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> InfiniteVector<B>
where
    B: Backend,
    B::Value: Default + PartialEq,
{
    /// Adopt an existing backend wholesale. Entries holding the default
    /// value are pruned on the way in.
    pub fn from_backend(mut backend: B) -> Self
    where
        B::Index: Clone,
    {
        let zero = B::Value::default();
        let defaults: Vec<B::Index> = backend
            .iter()
            .filter(|(_, value)| **value == zero)
            .map(|(index, _)| index.clone())
            .collect();
        for index in &defaults {
            backend.erase(index);
        }
        if !defaults.is_empty() {
            trace!(pruned = defaults.len(), "dropped default-valued entries on adoption");
        }
        Self { backend }
    }

    /// Value at `index`; the default value when nothing is stored there.
    ///
    /// Never inserts.
    pub fn get(&self, index: &B::Index) -> B::Value
    where
        B::Value: Clone,
    {
        self.backend.lookup(index).cloned().unwrap_or_default()
    }

    /// Stored value at `index`, if any.
    pub fn get_ref(&self, index: &B::Index) -> Option<&B::Value> {
        self.backend.lookup(index)
    }

    /// Whether an entry is stored at `index`.
    pub fn contains(&self, index: &B::Index) -> bool {
        self.backend.lookup(index).is_some()
    }

    /// Store `value` at `index`, returning the previously stored value.
    ///
    /// Setting the default value removes the entry.
    pub fn set(&mut self, index: B::Index, value: B::Value) -> Option<B::Value> {
        if value == B::Value::default() {
            let previous = self.backend.erase(&index);
            if previous.is_some() {
                trace!(stored = self.backend.len(), "pruned entry set to default");
            }
            previous
        } else {
            self.backend.upsert(index, value)
        }
    }

    /// Number of entries matching `predicate`.
    pub fn count_if<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&Entry<'_, B::Index, B::Value>) -> bool,
    {
        self.iter().filter(|entry| predicate(entry)).count()
    }

    /// Number of entries whose value equals `value`.
    pub fn count_value(&self, value: &B::Value) -> usize {
        self.count_if(|entry| entry.value() == value)
    }
}

impl<B: Backend> InfiniteVector<B> {
    /// Number of stored entries (not the dimension, which is infinite).
    pub fn size(&self) -> usize {
        self.backend.len()
    }

    /// Alias of [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Whether this is the zero vector.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Remove the entry at `index`, returning its value.
    pub fn erase(&mut self, index: &B::Index) -> Option<B::Value> {
        self.backend.erase(index)
    }

    /// Remove every entry, leaving the zero vector.
    pub fn clear(&mut self) {
        self.backend.clear();
    }

    /// Iterate the stored entries in the backend's natural order.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter::new(&self.backend)
    }

    /// Iterate the stored indices.
    pub fn support(&self) -> impl Iterator<Item = &B::Index> + '_ {
        self.iter().map(|entry| entry.index())
    }

    /// Cursor at the first entry (or at the end when empty).
    pub fn begin(&self) -> Cursor<'_, B> {
        Cursor::begin(self)
    }

    /// Past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, B> {
        Cursor::end(self)
    }

    /// Shared access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give up the container and return its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: SortedBackend> InfiniteVector<B> {
    /// Entry with the smallest index.
    pub fn first(&self) -> Option<Entry<'_, B::Index, B::Value>> {
        debug_assert!(B::SORTED, "SortedBackend implemented without SORTED = true");
        self.iter().next()
    }
}

impl<B: BidirectionalBackend> InfiniteVector<B> {
    /// Entry with the largest index.
    pub fn last(&self) -> Option<Entry<'_, B::Index, B::Value>> {
        debug_assert!(B::SORTED, "SortedBackend implemented without SORTED = true");
        self.backend.last_before(None).map(Entry::from)
    }
}

/// Two sequences are equal when they store the same entries.
///
/// If both backends declare [`Backend::SORTED`] the entry streams are
/// compared position by position. Otherwise every entry of `self` is looked
/// up in `other`; together with equal sizes this is exact regardless of
/// either side's iteration order.
impl<A, B> PartialEq<InfiniteVector<B>> for InfiniteVector<A>
where
    A: Backend,
    B: Backend<Index = A::Index, Value = A::Value>,
    A::Index: PartialEq,
    A::Value: PartialEq,
{
    fn eq(&self, other: &InfiniteVector<B>) -> bool {
        if self.size() != other.size() {
            return false;
        }
        if A::SORTED && B::SORTED {
            debug!(entries = self.size(), "positional comparison");
            self.iter().eq(other.iter())
        } else {
            debug!(entries = self.size(), "lookup comparison");
            self.iter()
                .all(|entry| other.backend.lookup(entry.index()) == Some(entry.value()))
        }
    }
}

impl<B> Eq for InfiniteVector<B>
where
    B: Backend,
    B::Index: Eq,
    B::Value: Eq,
{
}

/// Zero vector renders as `0`; otherwise one `<index>: <value>` line per
/// entry in iteration order.
impl<B> fmt::Display for InfiniteVector<B>
where
    B: Backend,
    B::Index: fmt::Display,
    B::Value: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "0");
        }
        for entry in self.iter() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<B> fmt::Debug for InfiniteVector<B>
where
    B: Backend,
    B::Index: fmt::Debug,
    B::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| entry.pair()))
            .finish()
    }
}

impl<B: Backend + Clone> Clone for InfiniteVector<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<I, V> From<BTreeMap<I, V>> for OrderedVector<I, V>
where
    I: Ord + Clone,
    V: Default + PartialEq,
{
    fn from(map: BTreeMap<I, V>) -> Self {
        Self::from_backend(OrderedBackend::from(map))
    }
}

impl<I, V, S> From<HashMap<I, V, S>> for InfiniteVector<HashedBackend<I, V, S>>
where
    I: Hash + Eq + Clone,
    V: Default + PartialEq,
    S: BuildHasher,
{
    fn from(map: HashMap<I, V, S>) -> Self {
        Self::from_backend(HashedBackend::from(map))
    }
}

impl<B> FromIterator<(B::Index, B::Value)> for InfiniteVector<B>
where
    B: Backend + Default,
    B::Value: Default + PartialEq,
{
    fn from_iter<T: IntoIterator<Item = (B::Index, B::Value)>>(iter: T) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<B> Extend<(B::Index, B::Value)> for InfiniteVector<B>
where
    B: Backend,
    B::Value: Default + PartialEq,
{
    fn extend<T: IntoIterator<Item = (B::Index, B::Value)>>(&mut self, iter: T) {
        for (index, value) in iter {
            self.set(index, value);
        }
    }
}

impl<'a, B: Backend> IntoIterator for &'a InfiniteVector<B> {
    type Item = Entry<'a, B::Index, B::Value>;
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
