use tracing::{debug, info};

use super::{PrimitiveCache, PrimitiveFinder, PrimitivePolynomials, RabinPolynomials};
use crate::error::{Error, Result};
use crate::structures::matrix::Matrix;
use crate::structures::ordered_set::OrderedSet;
use crate::structures::params::FieldParameters;

/// Primitive elements taken from an ordered stream of primitive polynomials.
///
/// Each polynomial `x^n + c1*x^(n-1) + ... + cn` becomes the companion
/// matrix with the identity on the sub-diagonal and `-cn, ..., -c1` in the
/// last column. The stream is consumed lazily: `find_first` and `find_next`
/// pull one polynomial at a time, and `find_all` drains what is left.
///
/// # Example
///
/// ```
/// use gfmatrix::{PolynomialEnumerationFinder, PrimitiveFinder};
///
/// let mut finder = PolynomialEnumerationFinder::new(3, 2).unwrap();
/// let a = finder.find_first().unwrap();
/// assert_eq!(a.multiplicative_order_mod(3, 8), Some(8));
/// ```
pub struct PolynomialEnumerationFinder<S: PrimitivePolynomials = RabinPolynomials> {
    params: FieldParameters,
    polys: S::Iter,
    cache: PrimitiveCache,
}

impl PolynomialEnumerationFinder {
    /// Finder for GF(p^n) backed by [`RabinPolynomials`].
    pub fn new(p: u64, n: u32) -> Result<Self> {
        Self::with_source(p, n, RabinPolynomials)
    }
}

impl<S: PrimitivePolynomials> PolynomialEnumerationFinder<S> {
    /// Finder for GF(p^n) backed by `source`.
    pub fn with_source(p: u64, n: u32, source: S) -> Result<Self> {
        let params = FieldParameters::new(p, n)?;
        Ok(Self {
            params,
            polys: source.enumerate(params),
            cache: PrimitiveCache::default(),
        })
    }

    /// Elements found so far.
    pub fn cached(&self) -> &OrderedSet<Matrix> {
        &self.cache.elements
    }

    /// `true` once the polynomial stream has run dry.
    pub fn is_exhausted(&self) -> bool {
        self.cache.exhausted
    }
}

/// Companion matrices of the polynomials left in `polys`.
fn candidates<'a, I>(
    params: FieldParameters,
    polys: &'a mut I,
) -> impl Iterator<Item = Result<Matrix>> + 'a
where
    I: Iterator<Item = Vec<u64>>,
{
    polys.map(move |coeffs| {
        if coeffs.len() != params.dim() + 1 {
            let size = coeffs.len().saturating_sub(1);
            return Err(Error::InvalidMatrixShape {
                rows: size,
                cols: size,
            });
        }
        debug!(?coeffs, "primitive polynomial");
        Matrix::companion_from_coefficients(&coeffs, params.p())
    })
}

impl<S: PrimitivePolynomials> PrimitiveFinder for PolynomialEnumerationFinder<S> {
    fn params(&self) -> FieldParameters {
        self.params
    }

    fn find_first(&mut self) -> Result<Matrix> {
        info!(params = %self.params, "finding primitive element");
        let first = self
            .cache
            .first(candidates(self.params, &mut self.polys))?;
        info!("found primitive element");
        Ok(first)
    }

    fn find_next(&mut self) -> Result<Matrix> {
        if self.cache.exhausted {
            debug!("polynomials exhausted, cycling through cache");
        }
        self.cache.next(candidates(self.params, &mut self.polys))
    }

    fn find_all(&mut self) -> Result<&OrderedSet<Matrix>> {
        if self.cache.exhausted {
            debug!("primitive elements are cached");
        } else {
            info!(params = %self.params, "finding all primitive elements");
        }
        let all = self.cache.all(candidates(self.params, &mut self.polys))?;
        info!(count = all.len(), "found all primitive elements");
        Ok(all)
    }
}
