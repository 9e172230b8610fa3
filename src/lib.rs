//! # Finitely supported sparse sequences
//!
//! An [`InfiniteVector`] is a vector over an infinite index set that holds
//! the default value everywhere except at finitely many stored indices.
//! Storage is delegated to a pluggable [`Backend`]:
//!
//! 1. **Ordered** ([`OrderedBackend`]): balanced tree, ascending iteration,
//!    bidirectional cursors
//! 2. **Hashed** ([`HashedBackend`]): hash table, expected `O(1)` access,
//!    forward-only iteration in an unspecified order
//!
//! Reading a missing index returns the default value and never inserts.
//! Setting the default value prunes the entry, so [`InfiniteVector::size`]
//! always counts the support.
//!
//! ## Usage Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use infvec::{HashedVector, OrderedVector};
//!
//! let w = OrderedVector::from(BTreeMap::from([(42, 23.0), (123, 23.0)]));
//! assert_eq!(w.to_string(), "42: 23\n123: 23\n");
//! assert_eq!(w.get(&7), 0.0);
//! assert_eq!(w.count_value(&23.0), 2);
//!
//! // Equality does not depend on the backend's iteration order.
//! let h: HashedVector<i32, f64> = [(123, 23.0), (42, 23.0)].into_iter().collect();
//! assert!(w == h);
//! ```
//!
//! Traversal capabilities are part of the type. Ordered vectors can be
//! walked backwards, hashed vectors cannot:
//!
//! ```compile_fail
//! use infvec::HashedVector;
//!
//! let h: HashedVector<i32, f64> = HashedVector::new();
//! let _ = h.iter().rev();
//! ```
//!
//! ```compile_fail
//! use infvec::HashedVector;
//!
//! let h: HashedVector<i32, f64> = HashedVector::new();
//! h.end().retreat();
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod backend;    // Pluggable stores
pub mod index;      // Composite keys and flat encodings
pub mod iter;       // Entry views, iterators and cursors
pub mod vector;     // The sparse sequence container
pub mod primes;     // Prime sieve demo container
pub mod config;     // Timing-run configuration
pub mod keybench;   // Composite-key timing

// Re-exports for convenience
pub use backend::{Backend, BidirectionalBackend, HashedBackend, OrderedBackend, SortedBackend};
pub use index::{ByFlat, FlatIndex, IndexError, PairKey, TripleKey};
pub use iter::{Cursor, Entry, Iter};
pub use vector::{HashedVector, InfiniteVector, OrderedVector};
