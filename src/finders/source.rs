use super::Tuples;
use crate::structures::params::FieldParameters;
use crate::structures::poly::Poly;

/// A provider of primitive polynomials over Z/p.
///
/// Coefficient vectors are monic, highest degree first, of length `n + 1`.
/// `enumerate` must yield them in a fixed order that does not change between
/// calls; finders rely on it when they resume or cycle.
pub trait PrimitivePolynomials {
    /// Iterator over coefficient vectors.
    type Iter: Iterator<Item = Vec<u64>>;

    /// All primitive polynomials of degree `n`, in canonical order.
    fn enumerate(&self, params: FieldParameters) -> Self::Iter;

    /// The first polynomial in canonical order.
    fn smallest(&self, params: FieldParameters) -> Option<Vec<u64>> {
        self.enumerate(params).next()
    }
}

/// Primitive polynomials found by testing every monic candidate with
/// [`Poly::is_primitive`], in ascending lexicographic order of the
/// coefficient vector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RabinPolynomials;

impl PrimitivePolynomials for RabinPolynomials {
    type Iter = PrimitivePolys;

    fn enumerate(&self, params: FieldParameters) -> PrimitivePolys {
        PrimitivePolys {
            p: params.p(),
            tails: Tuples::new(params.p(), params.dim()),
        }
    }
}

/// Iterator returned by [`RabinPolynomials::enumerate`].
#[derive(Clone, Debug)]
pub struct PrimitivePolys {
    p: u64,
    tails: Tuples,
}

impl Iterator for PrimitivePolys {
    type Item = Vec<u64>;

    fn next(&mut self) -> Option<Vec<u64>> {
        let p = self.p;
        self.tails.by_ref().find_map(|tail| {
            let mut coeffs = Vec::with_capacity(tail.len() + 1);
            coeffs.push(1);
            coeffs.extend(tail);
            Poly::from_descending(p, &coeffs)
                .is_primitive()
                .then_some(coeffs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(p: u64, n: u32) -> Vec<Vec<u64>> {
        RabinPolynomials
            .enumerate(FieldParameters::new(p, n).unwrap())
            .collect()
    }

    #[test]
    fn gf8_polynomials() {
        assert_eq!(all(2, 3), vec![vec![1, 0, 1, 1], vec![1, 1, 0, 1]]);
    }

    #[test]
    fn gf9_polynomials() {
        assert_eq!(all(3, 2), vec![vec![1, 1, 2], vec![1, 2, 2]]);
    }

    #[test]
    fn prime_field_polynomials() {
        // x - g for each primitive root g of F_7 (3 and 5).
        assert_eq!(all(7, 1), vec![vec![1, 2], vec![1, 4]]);
    }

    #[test]
    fn counts() {
        assert_eq!(all(2, 4).len(), 2);
        assert_eq!(all(2, 6).len(), 6);
        assert_eq!(all(3, 3).len(), 4);
    }

    #[test]
    fn smallest_is_first() {
        let params = FieldParameters::new(5, 2).unwrap();
        assert_eq!(
            RabinPolynomials.smallest(params),
            RabinPolynomials.enumerate(params).next()
        );
        assert_eq!(RabinPolynomials.smallest(params), Some(vec![1, 1, 2]));
    }

    #[test]
    fn order_is_stable() {
        let params = FieldParameters::new(3, 3).unwrap();
        let first: Vec<_> = RabinPolynomials.enumerate(params).collect();
        let second: Vec<_> = RabinPolynomials.enumerate(params).collect();
        assert_eq!(first, second);
    }
}
