//! Prime enumeration over a bit-packed sieve of Eratosthenes.
//!
//! A small stand-alone container with its own forward-only iterator, used by
//! the CLI to compare two prime sets with [`Iterator::eq`] the same way
//! sparse sequences are compared.

use std::fmt;

use bitvec::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Errors raised when building a sieve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// The sieve must cover at least the first prime.
    #[error("sieve limit {0} is smaller than 2")]
    LimitTooSmall(usize),
}

/// Primality table for `1..=limit`.
#[derive(Debug, Clone)]
pub struct PrimeSieve {
    limit: usize,
    bits: BitVec,
    count: usize,
}

impl PrimeSieve {
    /// Sieve all numbers up to and including `limit`.
    pub fn new(limit: usize) -> Result<Self, SieveError> {
        if limit < 2 {
            return Err(SieveError::LimitTooSmall(limit));
        }

        // bit n says whether n is prime
        let mut bits = bitvec![1; limit + 1];
        bits.set(0, false);
        bits.set(1, false);

        let mut k = 2;
        while k * k <= limit {
            if bits[k] {
                for multiple in (k * k..=limit).step_by(k) {
                    bits.set(multiple, false);
                }
            }
            k += 1;
        }

        let count = bits.count_ones();
        debug!(limit, primes = count, "built prime sieve");
        Ok(Self { limit, bits, count })
    }

    /// Upper bound of the sieve.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of primes up to the limit.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false: every valid sieve contains 2.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether `n` is prime. Numbers beyond the limit report `false`.
    pub fn is_prime(&self, n: usize) -> bool {
        n <= self.limit && self.bits[n]
    }

    /// Largest prime up to the limit.
    pub fn max_prime(&self) -> usize {
        self.bits.last_one().unwrap_or(2)
    }

    /// Primes in ascending order.
    pub fn iter(&self) -> Primes<'_> {
        Primes {
            sieve: self,
            next: 2,
        }
    }
}

impl<'a> IntoIterator for &'a PrimeSieve {
    type Item = usize;
    type IntoIter = Primes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the primes separated by single spaces.
impl fmt::Display for PrimeSieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut primes = self.iter();
        if let Some(first) = primes.next() {
            write!(f, "{first}")?;
        }
        for prime in primes {
            write!(f, " {prime}")?;
        }
        Ok(())
    }
}

/// Forward-only iterator over the primes of a [`PrimeSieve`].
#[derive(Debug, Clone)]
pub struct Primes<'a> {
    sieve: &'a PrimeSieve,
    next: usize,
}

impl Iterator for Primes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let bits = &self.sieve.bits;
        if self.next >= bits.len() {
            return None;
        }
        let prime = self.next + bits[self.next..].first_one()?;
        self.next = prime + 1;
        Some(prime)
    }
}

impl std::iter::FusedIterator for Primes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_up_to_23() {
        let sieve = PrimeSieve::new(23).unwrap();
        let primes: Vec<usize> = sieve.iter().collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
        assert_eq!(sieve.len(), 9);
        assert_eq!(sieve.max_prime(), 23);
        assert_eq!(sieve.to_string(), "2 3 5 7 11 13 17 19 23");
    }

    #[test]
    fn composite_limit() {
        let sieve = PrimeSieve::new(22).unwrap();
        assert_eq!(sieve.max_prime(), 19);
        assert!(!sieve.is_prime(21));
        assert!(!sieve.is_prime(23));
    }

    #[test]
    fn tiny_limits() {
        assert_eq!(PrimeSieve::new(1).unwrap_err(), SieveError::LimitTooSmall(1));
        let two = PrimeSieve::new(2).unwrap();
        assert_eq!(two.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn sets_compare_like_sequences() {
        let p = PrimeSieve::new(23).unwrap();
        let q = PrimeSieve::new(22).unwrap();
        let r = PrimeSieve::new(24).unwrap();
        assert!(!(p.len() == q.len() && p.iter().eq(q.iter())));
        assert!(p.len() == r.len() && p.iter().eq(r.iter()));
    }
}
