//! Primitive element search.
//!
//! A primitive element of GF(p^n) is represented by the companion matrix of
//! a primitive recurrence over Z/p. Two strategies are provided:
//!
//! - [`ExhaustiveFinder`] walks every seed tuple in `(Z/p)^n` and checks it
//!   against a [`RecurrenceModel`]. Slow, but needs nothing beyond modular
//!   arithmetic, which makes it the reference result.
//! - [`PolynomialEnumerationFinder`] converts the primitive polynomials of a
//!   [`PrimitivePolynomials`] source into companion matrices.
//!
//! Both keep every element they return in a cache that only grows, and both
//! resume where they stopped: `find_next` continues the underlying search,
//! and once that is exhausted it cycles through the cache.

mod enumeration;
mod exhaustive;
mod recurrence;
mod source;

pub use enumeration::PolynomialEnumerationFinder;
pub use exhaustive::ExhaustiveFinder;
pub use recurrence::{PowerFunction, RecurrenceModel};
pub use source::{PrimitivePolynomials, PrimitivePolys, RabinPolynomials};

use crate::error::{Error, Result};
use crate::structures::matrix::Matrix;
use crate::structures::ordered_set::OrderedSet;
use crate::structures::params::FieldParameters;

/// A strategy for producing primitive elements of GF(p^n).
pub trait PrimitiveFinder {
    /// The field this finder searches.
    fn params(&self) -> FieldParameters;

    /// The first primitive element in the finder's canonical order.
    ///
    /// Later calls return the cached value without searching again.
    fn find_first(&mut self) -> Result<Matrix>;

    /// The next primitive element not yet returned.
    ///
    /// Once the search is exhausted this cycles through the cache instead of
    /// failing.
    fn find_next(&mut self) -> Result<Matrix>;

    /// Every primitive element, searching to exhaustion on the first call.
    fn find_all(&mut self) -> Result<&OrderedSet<Matrix>>;
}

/// Cache of found elements shared by the finders.
#[derive(Clone, Debug, Default)]
struct PrimitiveCache {
    elements: OrderedSet<Matrix>,
    exhausted: bool,
    rotation: usize,
}

impl PrimitiveCache {
    /// Pull candidates until one is new to the cache.
    ///
    /// Returns `None` once `source` has run dry, and never touches it again.
    fn pull<I>(&mut self, source: I) -> Result<Option<Matrix>>
    where
        I: Iterator<Item = Result<Matrix>>,
    {
        if self.exhausted {
            return Ok(None);
        }
        for candidate in source {
            let candidate = candidate?;
            if self.elements.add(candidate.clone()) {
                return Ok(Some(candidate));
            }
        }
        self.exhausted = true;
        Ok(None)
    }

    fn first<I>(&mut self, source: I) -> Result<Matrix>
    where
        I: Iterator<Item = Result<Matrix>>,
    {
        if let Some(first) = self.elements.first() {
            tracing::debug!("primitive element is cached");
            return Ok(first.clone());
        }
        self.pull(source)?.ok_or(Error::NoPrimitiveElementFound)
    }

    fn next<I>(&mut self, source: I) -> Result<Matrix>
    where
        I: Iterator<Item = Result<Matrix>>,
    {
        if let Some(found) = self.pull(source)? {
            return Ok(found);
        }
        if self.elements.is_empty() {
            return Err(Error::NoPrimitiveElementFound);
        }
        let slot = self.rotation % self.elements.len();
        self.rotation = self.rotation.wrapping_add(1);
        Ok(self.elements[slot].clone())
    }

    fn all<I>(&mut self, mut source: I) -> Result<&OrderedSet<Matrix>>
    where
        I: Iterator<Item = Result<Matrix>>,
    {
        while self.pull(&mut source)?.is_some() {}
        Ok(&self.elements)
    }
}

/// Resumable lexicographic walk over `(Z/p)^len`.
///
/// The last position varies fastest, so tuples come out in the same order as
/// the base-`p` integers they spell.
#[derive(Clone, Debug)]
pub(crate) struct Tuples {
    p: u64,
    next: Option<Vec<u64>>,
}

impl Tuples {
    pub(crate) fn new(p: u64, len: usize) -> Self {
        Self {
            p,
            next: Some(vec![0; len]),
        }
    }
}

impl Iterator for Tuples {
    type Item = Vec<u64>;

    fn next(&mut self) -> Option<Vec<u64>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for i in (0..successor.len()).rev() {
            successor[i] += 1;
            if successor[i] < self.p {
                self.next = Some(successor);
                break;
            }
            successor[i] = 0;
        }
        Some(current)
    }
}
