//! Pluggable key-value stores behind [`InfiniteVector`](crate::InfiniteVector).
//!
//! A backend is the only place entries actually live. The container never
//! hands out the backend's own mutation surface; it talks to it exclusively
//! through the [`Backend`] capability set:
//!
//! - unique-key insert-or-update ([`Backend::upsert`])
//! - lookup without side effects ([`Backend::lookup`])
//! - erase by key ([`Backend::erase`])
//! - entry count and traversal ([`Backend::len`], [`Backend::iter`])
//!
//! There is intentionally no `Index`/`IndexMut` style accessor: a failed
//! lookup can never materialise a default entry.
//!
//! ## Iterator invalidation
//!
//! Tree backends invalidate only the cursor at an erased position, hash
//! backends invalidate every cursor on rehash. Both rules are subsumed by
//! borrowing: every mutation takes `&mut self`, so no cursor derived from
//! the backend can be alive across it.

mod hashed;
mod ordered;

pub use hashed::HashedBackend;
pub use ordered::OrderedBackend;

/// Capability set every store must provide.
pub trait Backend {
    /// Key type identifying a coordinate.
    type Index;
    /// Payload stored at a coordinate.
    type Value;
    /// Native traversal over stored entries.
    type Iter<'a>: Iterator<Item = (&'a Self::Index, &'a Self::Value)> + Clone
    where
        Self: 'a;

    /// Whether [`Backend::iter`] visits keys in strictly ascending order.
    ///
    /// This is the one declaration [`InfiniteVector`](crate::InfiniteVector)
    /// equality consults. Double-ended traversal is a separate capability,
    /// carried by `Self::Iter: DoubleEndedIterator`.
    const SORTED: bool = false;

    /// Insert or overwrite the entry for `index`, returning the previous value.
    fn upsert(&mut self, index: Self::Index, value: Self::Value) -> Option<Self::Value>;

    /// Look up the entry for `index`. Never mutates.
    fn lookup(&self, index: &Self::Index) -> Option<&Self::Value>;

    /// Remove the entry for `index`, returning its value.
    fn erase(&mut self, index: &Self::Index) -> Option<Self::Value>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    fn clear(&mut self);

    /// Traverse all stored entries in the backend's natural order.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Backends whose iteration is strictly ascending by index.
///
/// Implementors must also set [`Backend::SORTED`] to `true`; the marker
/// gates sorted-only accessors such as `first`, the const drives equality.
pub trait SortedBackend: Backend {}

/// Sorted backends that can restart traversal around an arbitrary key.
pub trait BidirectionalBackend: SortedBackend {
    /// Traverse entries strictly after `after`, or all entries for `None`.
    fn iter_after(&self, after: Option<&Self::Index>) -> Self::Iter<'_>;

    /// Greatest entry strictly before `before`, or the last entry for `None`.
    fn last_before(&self, before: Option<&Self::Index>) -> Option<(&Self::Index, &Self::Value)>;
}
