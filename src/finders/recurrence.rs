use std::cell::OnceCell;

use crate::error::{Error, Result};
use crate::structures::params::FieldParameters;
use crate::structures::poly::Poly;
use crate::utils::{add_mod, is_prime, mul_mod, neg_mod};

/// Powers of a generator `A` of a degree-n extension of Z/p, as functions of
/// the recurrence seeds.
///
/// The seeds `[a1, ..., an]` define the relation
///
/// ```text
/// A^n = a1*A^(n-1) + a2*A^(n-2) + ... + an
/// ```
///
/// and every higher power of `A` reduces to a coefficient vector in the basis
/// `A^(n-1), ..., A, 1` (descending powers). The model exposes one
/// [`PowerFunction`] per exponent, in a fixed cyclic order of length
/// `p^n - 1` whose last entry is `A^(p^n - 1)`:
///
/// ```text
/// A^q, A^(q+1), ..., A^(q+n-1), A^(n+1), A^(n+2), ..., A^(q-1)     (q = p^n)
/// ```
///
/// If `A^(q-1) = 1` the leading block stands for `A^1 .. A^n`, so the whole
/// sequence covers every exponent of the multiplicative group once.
///
/// Only prime degrees are accepted.
#[derive(Clone, Debug)]
pub struct RecurrenceModel {
    params: FieldParameters,
    functions: OnceCell<Vec<PowerFunction>>,
}

/// Coefficients of `A^exponent` for a given seed tuple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PowerFunction {
    params: FieldParameters,
    exponent: u64,
}

impl RecurrenceModel {
    /// Model for GF(p^n).
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FieldParameters::new`], and
    /// `InvalidDegree` when `n` is not prime.
    pub fn new(p: u64, n: u32) -> Result<Self> {
        Self::from_params(FieldParameters::new(p, n)?)
    }

    /// Model for already validated parameters.
    pub fn from_params(params: FieldParameters) -> Result<Self> {
        if !is_prime(u64::from(params.n())) {
            return Err(Error::InvalidDegree(params.n()));
        }
        Ok(Self {
            params,
            functions: OnceCell::new(),
        })
    }

    /// The field parameters.
    pub fn params(&self) -> FieldParameters {
        self.params
    }

    /// The power functions in cyclic order, built on first use.
    pub fn functions(&self) -> &[PowerFunction] {
        self.functions.get_or_init(|| {
            tracing::debug!(params = %self.params, "generating power functions");
            let params = self.params;
            let n = u64::from(params.n());
            let mut exponents: Vec<PowerFunction> = (n + 1..params.order() + n)
                .map(|exponent| PowerFunction { params, exponent })
                .collect();
            exponents.rotate_right(params.dim());
            exponents
        })
    }

    /// The coefficient vector of `1`: `[0, ..., 0, 1]`.
    pub fn unit(&self) -> Vec<u64> {
        let mut unit = vec![0; self.params.dim()];
        unit[self.params.dim() - 1] = 1;
        unit
    }

    /// Apply every power function to `seeds`, in cyclic order.
    ///
    /// Computes the whole table with one multiplication by `A` per exponent
    /// rather than evaluating each function from scratch.
    ///
    /// # Errors
    ///
    /// `SeedLength` if `seeds` does not have `n` entries.
    pub fn evaluate_all(&self, seeds: &[u64]) -> Result<Vec<Vec<u64>>> {
        self.check_seeds(seeds)?;
        let n = self.params.dim();
        let last = self.params.order() + n as u64 - 1;

        let mut table = Vec::with_capacity(self.functions().len());
        let mut walk = PowerWalk::new(self.params.p(), seeds);
        for exponent in 2..=last {
            walk.step();
            if exponent > n as u64 {
                table.push(walk.descending());
            }
        }
        table.rotate_right(n);
        Ok(table)
    }

    /// `true` if the seeds make `A` a generator of the multiplicative group.
    ///
    /// That is the case exactly when the last power function maps the seeds
    /// to the unit vector and no other power function does.
    pub fn is_primitive_seed(&self, seeds: &[u64]) -> bool {
        if self.check_seeds(seeds).is_err() {
            return false;
        }
        let n = self.params.dim() as u64;
        let group_order = self.params.group_order();
        let last = self.params.order() + n - 1;

        let mut walk = PowerWalk::new(self.params.p(), seeds);
        for exponent in 2..=last {
            walk.step();
            if exponent <= n {
                continue;
            }
            if walk.is_one() != (exponent == group_order) {
                return false;
            }
        }
        true
    }

    fn check_seeds(&self, seeds: &[u64]) -> Result<()> {
        if seeds.len() != self.params.dim() {
            return Err(Error::SeedLength {
                expected: self.params.dim(),
                got: seeds.len(),
            });
        }
        Ok(())
    }
}

impl PowerFunction {
    /// The exponent `k` of `A^k` this function computes.
    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    /// Coefficients of `A^k` in descending powers, reduced modulo p.
    ///
    /// # Errors
    ///
    /// `SeedLength` if `seeds` does not have `n` entries.
    pub fn apply(&self, seeds: &[u64]) -> Result<Vec<u64>> {
        let n = self.params.dim();
        let p = self.params.p();
        if seeds.len() != n {
            return Err(Error::SeedLength {
                expected: n,
                got: seeds.len(),
            });
        }

        // x^n - a1*x^(n-1) - ... - an, ascending.
        let mut modulus: Vec<u64> = seeds.iter().rev().map(|&a| neg_mod(a, p)).collect();
        modulus.push(1);
        let modulus = Poly::new(p, modulus);

        let power = modulus
            .powmod_x(self.exponent)
            .unwrap_or_else(|| Poly::zero(p));
        Ok((0..n).rev().map(|i| power.coeff(i)).collect())
    }
}

/// Successive powers of `A` as ascending coefficient vectors.
struct PowerWalk<'a> {
    p: u64,
    seeds: &'a [u64],
    coeffs: Vec<u64>,
}

impl<'a> PowerWalk<'a> {
    /// Starts at `A^1`.
    fn new(p: u64, seeds: &'a [u64]) -> Self {
        let mut coeffs = vec![0; seeds.len()];
        if seeds.len() > 1 {
            coeffs[1] = 1;
        } else {
            coeffs[0] = seeds[0] % p;
        }
        Self { p, seeds, coeffs }
    }

    /// Multiply by `A`.
    fn step(&mut self) {
        let n = self.coeffs.len();
        let top = self.coeffs[n - 1];
        self.coeffs.rotate_right(1);
        self.coeffs[0] = 0;
        for (i, &a) in self.seeds.iter().enumerate() {
            // a_(i+1) multiplies A^(n-1-i)
            let slot = n - 1 - i;
            self.coeffs[slot] = add_mod(self.coeffs[slot], mul_mod(top, a, self.p), self.p);
        }
    }

    fn is_one(&self) -> bool {
        self.coeffs[0] == 1 && self.coeffs[1..].iter().all(|&c| c == 0)
    }

    fn descending(&self) -> Vec<u64> {
        self.coeffs.iter().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finders::Tuples;

    #[test]
    fn rejects_composite_degree() {
        assert_eq!(RecurrenceModel::new(3, 4).unwrap_err(), Error::InvalidDegree(4));
        assert_eq!(RecurrenceModel::new(2, 1).unwrap_err(), Error::InvalidDegree(1));
        assert_eq!(RecurrenceModel::new(6, 2).unwrap_err(), Error::NotPrime(6));
    }

    #[test]
    fn function_order_ends_with_group_order() {
        let model = RecurrenceModel::new(2, 3).unwrap();
        let exponents: Vec<u64> = model.functions().iter().map(|f| f.exponent()).collect();
        assert_eq!(exponents, vec![8, 9, 10, 4, 5, 6, 7]);

        let model = RecurrenceModel::new(3, 2).unwrap();
        assert_eq!(model.functions().len(), 8);
        assert_eq!(model.functions().last().unwrap().exponent(), 8);
    }

    #[test]
    fn functions_are_cached() {
        let model = RecurrenceModel::new(2, 2).unwrap();
        let first = model.functions().as_ptr();
        assert_eq!(model.functions().as_ptr(), first);
    }

    #[test]
    fn gf9_powers() {
        // A^2 = A + 1 over F_3.
        let model = RecurrenceModel::new(3, 2).unwrap();
        let expected = vec![
            vec![1, 0],
            vec![1, 1],
            vec![2, 1],
            vec![0, 2],
            vec![2, 0],
            vec![2, 2],
            vec![1, 2],
            vec![0, 1],
        ];
        for (function, coeffs) in model.functions().iter().zip(&expected) {
            assert_eq!(&function.apply(&[1, 1]).unwrap(), coeffs);
        }
        assert_eq!(model.evaluate_all(&[1, 1]).unwrap(), expected);
    }

    #[test]
    fn gf8_powers() {
        // A^3 = A + 1 over F_2.
        let model = RecurrenceModel::new(2, 3).unwrap();
        assert_eq!(
            model.evaluate_all(&[0, 1, 1]).unwrap(),
            vec![
                vec![0, 1, 0],
                vec![1, 0, 0],
                vec![0, 1, 1],
                vec![1, 1, 0],
                vec![1, 1, 1],
                vec![1, 0, 1],
                vec![0, 0, 1],
            ]
        );
    }

    #[test]
    fn seeds_are_reduced() {
        let model = RecurrenceModel::new(3, 2).unwrap();
        assert_eq!(
            model.evaluate_all(&[4, 7]).unwrap(),
            model.evaluate_all(&[1, 1]).unwrap()
        );
    }

    #[test]
    fn wrong_seed_length() {
        let model = RecurrenceModel::new(3, 2).unwrap();
        assert_eq!(
            model.evaluate_all(&[1]),
            Err(Error::SeedLength {
                expected: 2,
                got: 1
            })
        );
        assert!(model.functions()[0].apply(&[1, 1, 1]).is_err());
        assert!(!model.is_primitive_seed(&[1, 1, 1]));
    }

    #[test]
    fn table_matches_functions() {
        let model = RecurrenceModel::new(3, 3).unwrap();
        for seeds in Tuples::new(3, 3).step_by(5) {
            let table = model.evaluate_all(&seeds).unwrap();
            for (function, row) in model.functions().iter().zip(&table) {
                assert_eq!(&function.apply(&seeds).unwrap(), row);
            }
        }
    }

    #[test]
    fn primitivity_matches_table() {
        for (p, n) in [(2, 2), (2, 3), (3, 2), (5, 2)] {
            let model = RecurrenceModel::new(p, n).unwrap();
            let unit = model.unit();
            for seeds in Tuples::new(p, n as usize) {
                let table = model.evaluate_all(&seeds).unwrap();
                let (last, rest) = table.split_last().unwrap();
                let expected = *last == unit && !rest.contains(&unit);
                assert_eq!(model.is_primitive_seed(&seeds), expected, "{:?}", seeds);
            }
        }
    }

    #[test]
    fn counts_primitive_seeds() {
        // phi(p^n - 1) / n primitive polynomials, each contributing one seed.
        let count = |p: u64, n: u32| {
            let model = RecurrenceModel::new(p, n).unwrap();
            Tuples::new(p, n as usize)
                .filter(|s| model.is_primitive_seed(s))
                .count()
        };
        assert_eq!(count(2, 2), 1);
        assert_eq!(count(2, 3), 2);
        assert_eq!(count(3, 2), 2);
        assert_eq!(count(5, 2), 4);
        assert_eq!(count(2, 5), 6);
    }
}
