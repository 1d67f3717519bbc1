use tracing::{debug, info};

use super::{PrimitiveCache, PrimitiveFinder, RecurrenceModel, Tuples};
use crate::error::Result;
use crate::structures::matrix::Matrix;
use crate::structures::ordered_set::OrderedSet;
use crate::structures::params::FieldParameters;

/// Brute-force search over every seed tuple in `(Z/p)^n`.
///
/// Seeds are visited in lexicographic order and tested with a
/// [`RecurrenceModel`]; each primitive seed becomes its shift companion
/// matrix. A full pass costs `O(p^n * p^n)` steps, so this finder exists to
/// cross-check faster strategies on small fields.
///
/// # Example
///
/// ```
/// use gfmatrix::{ExhaustiveFinder, PrimitiveFinder};
///
/// let mut finder = ExhaustiveFinder::new(2, 3).unwrap();
/// let a = finder.find_first().unwrap();
/// assert_eq!(a.multiplicative_order_mod(2, 7), Some(7));
/// assert_eq!(finder.find_all().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ExhaustiveFinder {
    model: RecurrenceModel,
    tuples: Tuples,
    cache: PrimitiveCache,
}

impl ExhaustiveFinder {
    /// Finder for GF(p^n).
    ///
    /// # Errors
    ///
    /// Parameter validation errors, and `InvalidDegree` when `n` is not prime.
    pub fn new(p: u64, n: u32) -> Result<Self> {
        Ok(Self::with_model(RecurrenceModel::new(p, n)?))
    }

    /// Finder driven by an existing model.
    pub fn with_model(model: RecurrenceModel) -> Self {
        let params = model.params();
        Self {
            tuples: Tuples::new(params.p(), params.dim()),
            model,
            cache: PrimitiveCache::default(),
        }
    }

    /// The recurrence model used to test seeds.
    pub fn model(&self) -> &RecurrenceModel {
        &self.model
    }

    /// Elements found so far.
    pub fn cached(&self) -> &OrderedSet<Matrix> {
        &self.cache.elements
    }

    /// `true` once every seed has been tested.
    pub fn is_exhausted(&self) -> bool {
        self.cache.exhausted
    }
}

/// Companion matrices of the primitive seeds left in `tuples`.
fn candidates<'a>(
    model: &'a RecurrenceModel,
    tuples: &'a mut Tuples,
) -> impl Iterator<Item = Result<Matrix>> + 'a {
    let p = model.params().p();
    tuples.filter_map(move |seeds| {
        if model.is_primitive_seed(&seeds) {
            debug!(?seeds, "primitive seed");
            Some(Ok(Matrix::shift_companion(&seeds, p)))
        } else {
            None
        }
    })
}

impl PrimitiveFinder for ExhaustiveFinder {
    fn params(&self) -> FieldParameters {
        self.model.params()
    }

    fn find_first(&mut self) -> Result<Matrix> {
        info!(params = %self.model.params(), "finding single primitive element");
        self.cache.first(candidates(&self.model, &mut self.tuples))
    }

    fn find_next(&mut self) -> Result<Matrix> {
        self.cache.next(candidates(&self.model, &mut self.tuples))
    }

    fn find_all(&mut self) -> Result<&OrderedSet<Matrix>> {
        if self.cache.exhausted {
            debug!("primitive elements are cached");
        } else {
            info!(params = %self.model.params(), "finding all primitive elements");
        }
        let all = self.cache.all(candidates(&self.model, &mut self.tuples))?;
        info!(count = all.len(), "found all primitive elements");
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rejects_composite_degree() {
        assert_eq!(
            ExhaustiveFinder::new(2, 4).unwrap_err(),
            Error::InvalidDegree(4)
        );
    }

    #[test]
    fn first_is_lexicographically_smallest() {
        // Seeds (0, 1, 1): A^3 = A + 1, i.e. x^3 + x + 1.
        let mut finder = ExhaustiveFinder::new(2, 3).unwrap();
        let first = finder.find_first().unwrap();
        assert_eq!(first, Matrix::shift_companion(&[0, 1, 1], 2));
        assert_eq!(finder.find_first().unwrap(), first);
        assert_eq!(finder.cached().len(), 1);
    }

    #[test]
    fn gf8_generator_has_order_seven() {
        let mut finder = ExhaustiveFinder::new(2, 3).unwrap();
        let m = finder.find_first().unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.pow_mod(7, 2), Matrix::identity(3));
        for k in 1..7 {
            assert_ne!(m.pow_mod(k, 2), Matrix::identity(3));
        }
    }

    #[test]
    fn find_all_is_cached() {
        let mut finder = ExhaustiveFinder::new(3, 2).unwrap();
        let all = finder.find_all().unwrap().clone();
        assert_eq!(all.len(), 2);
        assert!(finder.is_exhausted());
        assert_eq!(finder.find_all().unwrap().as_slice(), all.as_slice());
        for m in &all {
            assert_eq!(m.multiplicative_order_mod(3, 8), Some(8));
        }
    }

    #[test]
    fn first_then_all_keeps_first_in_front() {
        let mut finder = ExhaustiveFinder::new(5, 2).unwrap();
        let first = finder.find_first().unwrap();
        let all = finder.find_all().unwrap();
        assert_eq!(all.first(), Some(&first));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn next_resumes_then_cycles() {
        let mut finder = ExhaustiveFinder::new(2, 3).unwrap();
        let a = finder.find_next().unwrap();
        let b = finder.find_next().unwrap();
        assert_ne!(a, b);
        assert_eq!(finder.find_first().unwrap(), a);
        // Only two primitive elements exist; the third call exhausts the
        // search and starts cycling.
        assert_eq!(finder.find_next().unwrap(), a);
        assert_eq!(finder.find_next().unwrap(), b);
        assert_eq!(finder.find_next().unwrap(), a);
        assert_eq!(finder.cached().len(), 2);
    }
}
