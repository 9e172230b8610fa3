use std::fmt;

use super::{diagonal_of, layer_of, tetrahedral, triangular, FlatIndex, IndexError};

/// Two-component index `(j, k)`, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PairKey {
    /// First component (primary sort key).
    pub j: u32,
    /// Second component.
    pub k: u32,
}

impl PairKey {
    /// Build the key `(j, k)`.
    pub const fn new(j: u32, k: u32) -> Self {
        Self { j, k }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.j, self.k)
    }
}

impl From<(u32, u32)> for PairKey {
    fn from((j, k): (u32, u32)) -> Self {
        Self::new(j, k)
    }
}

/// Diagonal enumeration: `nr(j,k) = (j+k)(j+k+1)/2 + j`.
///
/// `(0,0) -> 0`, `(0,1) -> 1`, `(1,0) -> 2`, `(0,2) -> 3`, ...
impl FlatIndex for PairKey {
    fn to_flat(&self) -> Result<u64, IndexError> {
        let diagonal = u128::from(self.j) + u128::from(self.k);
        let flat = triangular(diagonal) + u128::from(self.j);
        u64::try_from(flat).map_err(|_| IndexError::FlatOverflow {
            key: self.to_string(),
        })
    }

    fn from_flat(flat: u64) -> Result<Self, IndexError> {
        let (j, k) = split_pair(u128::from(flat)).ok_or(IndexError::OutOfDomain { flat })?;
        Ok(Self::new(j, k))
    }
}

/// Three-component index `(j, k, l)`, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TripleKey {
    /// First component (primary sort key).
    pub j: u32,
    /// Second component.
    pub k: u32,
    /// Third component.
    pub l: u32,
}

impl TripleKey {
    /// Build the key `(j, k, l)`.
    pub const fn new(j: u32, k: u32, l: u32) -> Self {
        Self { j, k, l }
    }
}

impl fmt::Display for TripleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.j, self.k, self.l)
    }
}

impl From<(u32, u32, u32)> for TripleKey {
    fn from((j, k, l): (u32, u32, u32)) -> Self {
        Self::new(j, k, l)
    }
}

/// Layered enumeration by `s = j+k+l`:
/// `nr(j,k,l) = s(s+1)(s+2)/6 + (j+k)(j+k+1)/2 + j`.
///
/// `(0,0,0) -> 0`, `(0,0,1) -> 1`, `(0,1,0) -> 2`, `(1,0,0) -> 3`, ...
impl FlatIndex for TripleKey {
    fn to_flat(&self) -> Result<u64, IndexError> {
        let (j, k, l) = (
            u128::from(self.j),
            u128::from(self.k),
            u128::from(self.l),
        );
        let flat = tetrahedral(j + k + l) + triangular(j + k) + j;
        u64::try_from(flat).map_err(|_| IndexError::FlatOverflow {
            key: self.to_string(),
        })
    }

    fn from_flat(flat: u64) -> Result<Self, IndexError> {
        let n = u128::from(flat);
        let layer = layer_of(n);
        let rest = n - tetrahedral(layer);
        let diagonal = diagonal_of(rest);
        let out_of_domain = IndexError::OutOfDomain { flat };
        let (j, k) = split_pair(rest).ok_or_else(|| out_of_domain.clone())?;
        let l = u32::try_from(layer - diagonal).map_err(|_| out_of_domain)?;
        Ok(Self::new(j, k, l))
    }
}

fn split_pair(n: u128) -> Option<(u32, u32)> {
    let diagonal = diagonal_of(n);
    let j = n - triangular(diagonal);
    let k = diagonal - j;
    Some((u32::try_from(j).ok()?, u32::try_from(k).ok()?))
}
