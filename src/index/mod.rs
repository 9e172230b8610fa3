//! Index types and their orderings.
//!
//! Any `Ord` (for tree backends) or `Hash + Eq` (for hash backends) type can
//! index an [`InfiniteVector`](crate::InfiniteVector). This module adds the
//! composite keys used for multi-dimensional sequences together with a
//! bijection onto the flat `u64` domain:
//!
//! - [`PairKey`] and [`TripleKey`] order lexicographically by field.
//! - [`FlatIndex`] enumerates them diagonal by diagonal (Cantor style).
//! - [`ByFlat`] reorders any [`FlatIndex`] key by its flat number.
//!
//! The lexicographic order and the flat order disagree (e.g. `(0,5)` sorts
//! before `(1,0)` lexicographically but after it diagonally); both are total
//! orders, so either may drive a tree backend.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

mod composite;

pub use composite::{PairKey, TripleKey};

/// Errors raised while mapping keys to and from the flat domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The flat number of a key does not fit into `u64`.
    #[error("flat index of key {key} overflows u64")]
    FlatOverflow {
        /// Rendered key that overflowed.
        key: String,
    },

    /// A flat number decodes to a key whose components do not fit.
    #[error("flat index {flat} is outside the key domain")]
    OutOfDomain {
        /// Flat number that could not be decoded.
        flat: u64,
    },
}

/// Bijection between a key type and (a prefix of) the flat `u64` domain.
pub trait FlatIndex: Sized {
    /// Flat number of this key.
    fn to_flat(&self) -> Result<u64, IndexError>;

    /// Key with the given flat number.
    fn from_flat(flat: u64) -> Result<Self, IndexError>;
}

impl FlatIndex for u64 {
    fn to_flat(&self) -> Result<u64, IndexError> {
        Ok(*self)
    }

    fn from_flat(flat: u64) -> Result<Self, IndexError> {
        Ok(flat)
    }
}

impl FlatIndex for u32 {
    fn to_flat(&self) -> Result<u64, IndexError> {
        Ok(u64::from(*self))
    }

    fn from_flat(flat: u64) -> Result<Self, IndexError> {
        u32::try_from(flat).map_err(|_| IndexError::OutOfDomain { flat })
    }
}

/// Key ordered (and hashed) by its flat number instead of its own `Ord`.
///
/// The flat number is computed once at construction, so comparisons inside
/// a tree backend cost a single integer comparison.
#[derive(Debug, Clone, Copy)]
pub struct ByFlat<K> {
    flat: u64,
    key: K,
}

impl<K: FlatIndex> ByFlat<K> {
    /// Wrap `key`, failing if its flat number overflows.
    pub fn new(key: K) -> Result<Self, IndexError> {
        let flat = key.to_flat()?;
        Ok(Self { flat, key })
    }

    /// Rebuild the key with flat number `flat`.
    pub fn from_flat(flat: u64) -> Result<Self, IndexError> {
        Ok(Self {
            flat,
            key: K::from_flat(flat)?,
        })
    }
}

impl<K> ByFlat<K> {
    /// Cached flat number.
    pub fn flat(&self) -> u64 {
        self.flat
    }

    /// Wrapped key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Unwrap the key.
    pub fn into_key(self) -> K {
        self.key
    }
}

// The flat map is a bijection, so comparing flat numbers alone is
// consistent with key equality.
impl<K> PartialEq for ByFlat<K> {
    fn eq(&self, other: &Self) -> bool {
        self.flat == other.flat
    }
}

impl<K> Eq for ByFlat<K> {}

impl<K> PartialOrd for ByFlat<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for ByFlat<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.flat.cmp(&other.flat)
    }
}

impl<K> Hash for ByFlat<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.flat.hash(state);
    }
}

impl<K: fmt::Display> fmt::Display for ByFlat<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

/// Triangular number `n(n+1)/2`.
pub(crate) fn triangular(n: u128) -> u128 {
    n * (n + 1) / 2
}

/// Tetrahedral number `n(n+1)(n+2)/6`.
pub(crate) fn tetrahedral(n: u128) -> u128 {
    n * (n + 1) * (n + 2) / 6
}

/// Largest `d` with `triangular(d) <= n`.
pub(crate) fn diagonal_of(n: u128) -> u128 {
    let mut d = (((8.0 * n as f64 + 1.0).sqrt() - 1.0) / 2.0) as u128;
    while d > 0 && triangular(d) > n {
        d -= 1;
    }
    while triangular(d + 1) <= n {
        d += 1;
    }
    d
}

/// Largest `s` with `tetrahedral(s) <= n`.
pub(crate) fn layer_of(n: u128) -> u128 {
    let mut s = (6.0 * n as f64).cbrt() as u128;
    while s > 0 && tetrahedral(s) > n {
        s -= 1;
    }
    while tetrahedral(s + 1) <= n {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_and_layer_bracket_their_input() {
        for n in [0u128, 1, 2, 3, 5, 6, 9, 10, 1_000, u64::MAX as u128] {
            let d = diagonal_of(n);
            assert!(triangular(d) <= n && n < triangular(d + 1), "n = {n}");
            let s = layer_of(n);
            assert!(tetrahedral(s) <= n && n < tetrahedral(s + 1), "n = {n}");
        }
    }

    #[test]
    fn narrow_scalar_rejects_wide_flat() {
        assert_eq!(u32::from_flat(7), Ok(7));
        assert_eq!(
            u32::from_flat(u64::from(u32::MAX) + 1),
            Err(IndexError::OutOfDomain {
                flat: u64::from(u32::MAX) + 1
            })
        );
    }

    #[test]
    fn by_flat_orders_by_diagonal() {
        let lex_small = ByFlat::new(PairKey::new(0, 5)).unwrap();
        let lex_large = ByFlat::new(PairKey::new(1, 0)).unwrap();
        assert!(PairKey::new(0, 5) < PairKey::new(1, 0));
        assert!(lex_large < lex_small);
        assert_eq!(lex_large.flat(), 2);
        assert_eq!(lex_small.to_string(), "(0,5)");
    }
}
