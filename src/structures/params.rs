use core::fmt;

use crate::error::{Error, Result};
use crate::utils::{checked_pow, is_prime};

/// Validated parameters `(p, n)` of the field GF(p^n).
///
/// `p` is prime, `n >= 1` and `p^n` fits in a `u64`. Every component that
/// needs the parameters takes its own copy.
///
/// # Example
///
/// ```
/// use gfmatrix::FieldParameters;
///
/// let params = FieldParameters::new(3, 2).unwrap();
/// assert_eq!(params.order(), 9);
/// assert_eq!(params.group_order(), 8);
/// assert!(FieldParameters::new(6, 2).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParameters"))]
pub struct FieldParameters {
    p: u64,
    n: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    order: u64,
}

impl FieldParameters {
    /// Validate `(p, n)`.
    ///
    /// # Errors
    ///
    /// `NotPrime` if `p` is not prime, `ZeroDegree` if `n == 0`,
    /// `FieldTooLarge` if `p^n` overflows a `u64`.
    pub fn new(p: u64, n: u32) -> Result<Self> {
        if !is_prime(p) {
            return Err(Error::NotPrime(p));
        }
        if n == 0 {
            return Err(Error::ZeroDegree);
        }
        let order = checked_pow(p, n).ok_or(Error::FieldTooLarge { p, n })?;
        Ok(Self { p, n, order })
    }

    /// The characteristic.
    #[inline]
    pub fn p(&self) -> u64 {
        self.p
    }

    /// The extension degree.
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// The extension degree as a matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n as usize
    }

    /// Number of field elements, `p^n`.
    #[inline]
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Order of the multiplicative group, `p^n - 1`.
    #[inline]
    pub fn group_order(&self) -> u64 {
        self.order - 1
    }
}

impl fmt::Display for FieldParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({}^{})", self.p, self.n)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParameters {
    p: u64,
    n: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameters> for FieldParameters {
    type Error = Error;

    fn try_from(raw: RawParameters) -> Result<Self> {
        Self::new(raw.p, raw.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parameters() {
        let params = FieldParameters::new(2, 3).unwrap();
        assert_eq!(params.p(), 2);
        assert_eq!(params.n(), 3);
        assert_eq!(params.dim(), 3);
        assert_eq!(params.order(), 8);
        assert_eq!(params.group_order(), 7);
    }

    #[test]
    fn prime_field_is_degree_one() {
        let params = FieldParameters::new(7, 1).unwrap();
        assert_eq!(params.order(), 7);
        assert_eq!(params.group_order(), 6);
    }

    #[test]
    fn rejects_composite_characteristic() {
        assert_eq!(FieldParameters::new(4, 2), Err(Error::NotPrime(4)));
        assert_eq!(FieldParameters::new(1, 2), Err(Error::NotPrime(1)));
    }

    #[test]
    fn rejects_zero_degree() {
        assert_eq!(FieldParameters::new(5, 0), Err(Error::ZeroDegree));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            FieldParameters::new(2, 64),
            Err(Error::FieldTooLarge { p: 2, n: 64 })
        );
        assert!(FieldParameters::new(2, 63).is_ok());
    }

    #[test]
    fn display() {
        let params = FieldParameters::new(3, 2).unwrap();
        assert_eq!(params.to_string(), "GF(3^2)");
    }
}
