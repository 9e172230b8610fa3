//! Traversal adapters over the stored entries of an [`InfiniteVector`].
//!
//! Two shapes are offered:
//!
//! - [`Iter`], a Rust [`Iterator`] yielding [`Entry`] views. It is
//!   [`ExactSizeIterator`] and [`FusedIterator`] for every backend, and
//!   [`DoubleEndedIterator`] only when the backend's native iterator is.
//!   Reversing a hash-backed vector is therefore a type error, not a
//!   runtime surprise.
//! - [`Cursor`], a positional begin/end cursor that can be advanced,
//!   retreated (bidirectional backends only) and compared by position.
//!
//! The item type is the concrete [`Entry`] so that adapters such as
//! [`Iterator::eq`] and `filter(..).count()` resolve against the same type
//! for every backend.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::backend::{Backend, BidirectionalBackend};
use crate::vector::InfiniteVector;

/// Read-only view of one stored entry.
pub struct Entry<'a, I, V> {
    index: &'a I,
    value: &'a V,
}

impl<'a, I, V> Entry<'a, I, V> {
    pub(crate) fn new(index: &'a I, value: &'a V) -> Self {
        Self { index, value }
    }

    /// Index of the entry.
    pub fn index(&self) -> &'a I {
        self.index
    }

    /// Stored value.
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// Entry as an `(index, value)` pair.
    pub fn pair(&self) -> (&'a I, &'a V) {
        (self.index, self.value)
    }
}

impl<I, V> Clone for Entry<'_, I, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, V> Copy for Entry<'_, I, V> {}

impl<'a, 'b, I: PartialEq, V: PartialEq> PartialEq<Entry<'b, I, V>> for Entry<'a, I, V> {
    fn eq(&self, other: &Entry<'b, I, V>) -> bool {
        self.index == other.index && self.value == other.value
    }
}

impl<I: Eq, V: Eq> Eq for Entry<'_, I, V> {}

impl<I: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<'_, I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(self.index)
            .field(self.value)
            .finish()
    }
}

impl<I: fmt::Display, V: fmt::Display> fmt::Display for Entry<'_, I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.value)
    }
}

impl<'a, I, V> From<(&'a I, &'a V)> for Entry<'a, I, V> {
    fn from((index, value): (&'a I, &'a V)) -> Self {
        Self::new(index, value)
    }
}

impl<'a, I, V> From<Entry<'a, I, V>> for (&'a I, &'a V) {
    fn from(entry: Entry<'a, I, V>) -> Self {
        entry.pair()
    }
}

/// Iterator over the stored entries of an [`InfiniteVector`], in the
/// backend's natural order.
pub struct Iter<'a, B: Backend + 'a> {
    inner: B::Iter<'a>,
    remaining: usize,
}

impl<'a, B: Backend + 'a> Iter<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self {
            inner: backend.iter(),
            remaining: backend.len(),
        }
    }
}

impl<'a, B: Backend + 'a> Iterator for Iter<'a, B> {
    type Item = Entry<'a, B::Index, B::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (index, value) = self.inner.next()?;
        self.remaining -= 1;
        Some(Entry::new(index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, B> DoubleEndedIterator for Iter<'a, B>
where
    B: Backend + 'a,
    B::Iter<'a>: DoubleEndedIterator,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (index, value) = self.inner.next_back()?;
        self.remaining -= 1;
        Some(Entry::new(index, value))
    }
}

impl<'a, B: Backend + 'a> ExactSizeIterator for Iter<'a, B> {}

impl<'a, B: Backend + 'a> FusedIterator for Iter<'a, B> {}

impl<'a, B: Backend + 'a> Clone for Iter<'a, B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, B: Backend + 'a> fmt::Debug for Iter<'a, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Positional cursor into an [`InfiniteVector`].
///
/// A cursor is either at an entry or at the past-the-end position. Two
/// cursors are equal when they belong to the same container instance and
/// sit at the same position; cursors of different containers are never
/// equal, and cursors have no ordering.
///
/// Dereferencing or advancing a past-the-end cursor, and retreating a cursor
/// at the first entry, are contract violations and panic.
pub struct Cursor<'a, B: Backend + 'a> {
    owner: &'a InfiniteVector<B>,
    inner: B::Iter<'a>,
    current: Option<(&'a B::Index, &'a B::Value)>,
    position: usize,
}

impl<'a, B: Backend + 'a> Cursor<'a, B> {
    pub(crate) fn begin(owner: &'a InfiniteVector<B>) -> Self {
        let mut inner = owner.backend().iter();
        let current = inner.next();
        Self {
            owner,
            inner,
            current,
            position: 0,
        }
    }

    pub(crate) fn end(owner: &'a InfiniteVector<B>) -> Self {
        let backend = owner.backend();
        Self {
            owner,
            inner: backend.iter(),
            current: None,
            position: backend.len(),
        }
    }

    /// Whether the cursor is at the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Number of entries before the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Entry under the cursor.
    ///
    /// # Panics
    ///
    /// If the cursor is past the end.
    pub fn entry(&self) -> Entry<'a, B::Index, B::Value> {
        match self.current {
            Some(pair) => pair.into(),
            None => panic!("dereferenced a past-the-end cursor"),
        }
    }

    /// Index of the entry under the cursor. Panics past the end.
    pub fn index(&self) -> &'a B::Index {
        self.entry().index()
    }

    /// Value of the entry under the cursor. Panics past the end.
    pub fn value(&self) -> &'a B::Value {
        self.entry().value()
    }

    /// Move to the next entry (prefix increment).
    ///
    /// # Panics
    ///
    /// If the cursor is already past the end.
    pub fn advance(&mut self) -> &mut Self {
        if self.current.is_none() {
            panic!("advanced a past-the-end cursor");
        }
        self.current = self.inner.next();
        self.position += 1;
        self
    }

    /// Move to the next entry and return the cursor as it was before
    /// (postfix increment).
    pub fn post_advance(&mut self) -> Self {
        let prior = self.clone();
        self.advance();
        prior
    }
}

impl<'a, B> Cursor<'a, B>
where
    B: BidirectionalBackend + 'a,
{
    /// Move to the previous entry (prefix decrement).
    ///
    /// # Panics
    ///
    /// If the cursor is at the first entry.
    pub fn retreat(&mut self) -> &mut Self {
        if self.position == 0 {
            panic!("retreated a cursor at the first entry");
        }
        let backend = self.owner.backend();
        let before = self.current.map(|(index, _)| index);
        let Some(previous) = backend.last_before(before) else {
            panic!("cursor position {} has no predecessor", self.position);
        };
        self.inner = backend.iter_after(Some(previous.0));
        self.current = Some(previous);
        self.position -= 1;
        self
    }

    /// Move to the previous entry and return the cursor as it was before
    /// (postfix decrement).
    pub fn post_retreat(&mut self) -> Self {
        let prior = self.clone();
        self.retreat();
        prior
    }
}

impl<'a, B: Backend + 'a> Clone for Cursor<'a, B> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            inner: self.inner.clone(),
            current: self.current,
            position: self.position,
        }
    }
}

impl<'a, B: Backend + 'a> PartialEq for Cursor<'a, B> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.owner, other.owner) && self.position == other.position
    }
}

impl<'a, B: Backend + 'a> Eq for Cursor<'a, B> {}

impl<'a, B: Backend + 'a> fmt::Debug for Cursor<'a, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("owner", &(self.owner as *const InfiniteVector<B>))
            .field("position", &self.position)
            .field("is_end", &self.is_end())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{HashedVector, OrderedVector};

    fn sample() -> OrderedVector<i32, f64> {
        [(3, 1.5), (1, 0.5), (7, 2.5)].into_iter().collect()
    }

    #[test]
    fn iter_is_exact_and_fused() {
        let v = sample();
        let mut it = v.iter();
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.size_hint(), (2, Some(2)));
        it.by_ref().for_each(drop);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn ordered_iter_runs_backwards() {
        let v = sample();
        let keys: Vec<i32> = v.iter().rev().map(|e| *e.index()).collect();
        assert_eq!(keys, vec![7, 3, 1]);
    }

    #[test]
    fn cursor_walks_forward_and_back() {
        let v = sample();
        let mut cursor = v.begin();
        assert_eq!(*cursor.index(), 1);
        cursor.advance().advance();
        assert_eq!(*cursor.value(), 2.5);
        cursor.advance();
        assert!(cursor.is_end());
        assert_eq!(cursor, v.end());

        cursor.retreat();
        assert_eq!(*cursor.index(), 7);
        let prior = cursor.post_retreat();
        assert_eq!(*prior.index(), 7);
        assert_eq!(*cursor.index(), 3);
        cursor.retreat();
        assert_eq!(cursor, v.begin());
    }

    #[test]
    fn cursor_resumes_forward_after_retreat() {
        let v = sample();
        let mut cursor = v.end();
        cursor.retreat().retreat();
        assert_eq!(*cursor.index(), 3);
        cursor.advance();
        assert_eq!(*cursor.index(), 7);
    }

    #[test]
    fn postfix_advance_returns_prior_position() {
        let v = sample();
        let mut cursor = v.begin();
        let prior = cursor.post_advance();
        assert_eq!(*prior.index(), 1);
        assert_eq!(*cursor.index(), 3);
        assert_ne!(prior, cursor);
    }

    #[test]
    fn cursors_of_distinct_containers_differ() {
        let a: HashedVector<i32, f64> = HashedVector::new();
        let b: HashedVector<i32, f64> = HashedVector::new();
        assert_eq!(a.begin(), a.end());
        assert_ne!(a.begin(), b.begin());
    }

    #[test]
    #[should_panic(expected = "past-the-end")]
    fn dereferencing_end_panics() {
        let v = sample();
        let _ = v.end().entry();
    }

    #[test]
    #[should_panic(expected = "first entry")]
    fn retreating_begin_panics() {
        let v = sample();
        v.begin().retreat();
    }
}
