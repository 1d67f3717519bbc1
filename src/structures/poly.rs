use core::fmt;
use core::ops::{Mul, Sub};

use crate::utils::{add_mod, checked_pow, inv_mod, mul_mod, neg_mod, prime_divisors};

/// Polynomial over Z/p with the modulus carried at runtime.
///
/// Coefficients are stored in ascending order of degree:
/// `coeffs[i]` is the coefficient of `x^i`, reduced into `[0, p)`.
///
/// The zero polynomial is represented as an empty coefficient vector.
/// Binary operations expect both operands to share the same `p`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Poly {
    p: u64,
    coeffs: Vec<u64>,
}

impl Poly {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// Coefficients are reduced modulo `p` and trailing zeros are removed.
    ///
    /// # Example
    ///
    /// ```
    /// use gfmatrix::Poly;
    ///
    /// // 3 + 2x + x^2 over F_5
    /// let f = Poly::new(5, vec![3, 2, 1]);
    /// assert_eq!(f.degree(), Some(2));
    /// ```
    pub fn new(p: u64, coeffs: Vec<u64>) -> Self {
        let mut poly = Self {
            p,
            coeffs: coeffs.into_iter().map(|c| c % p).collect(),
        };
        poly.normalize();
        poly
    }

    /// Create a polynomial from coefficients in descending order
    /// (highest degree first).
    pub fn from_descending(p: u64, coeffs: &[u64]) -> Self {
        Self::new(p, coeffs.iter().rev().copied().collect())
    }

    /// The zero polynomial.
    pub fn zero(p: u64) -> Self {
        Self {
            p,
            coeffs: Vec::new(),
        }
    }

    /// Constant polynomial `c`.
    pub fn constant(p: u64, c: u64) -> Self {
        Self::new(p, vec![c])
    }

    /// The polynomial `x`.
    pub fn x(p: u64) -> Self {
        Self::new(p, vec![0, 1])
    }

    /// The characteristic of the coefficient field.
    #[inline]
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Check if this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Leading coefficient, or `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<u64> {
        self.coeffs.last().copied()
    }

    /// Coefficient of `x^i`, zero beyond the degree.
    pub fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Coefficients in ascending order.
    pub fn coefficients(&self) -> &[u64] {
        &self.coeffs
    }

    /// Coefficients in descending order, highest degree first.
    pub fn to_descending(&self) -> Vec<u64> {
        self.coeffs.iter().rev().copied().collect()
    }

    fn normalize(&mut self) {
        while self.coeffs.last() == Some(&0) {
            self.coeffs.pop();
        }
    }

    /// Scale so that the leading coefficient is 1.
    ///
    /// Returns `None` for the zero polynomial.
    pub fn monic(&self) -> Option<Self> {
        let inv = inv_mod(self.leading_coeff()?, self.p)?;
        Some(self.scale(inv))
    }

    fn scale(&self, c: u64) -> Self {
        Self::new(
            self.p,
            self.coeffs.iter().map(|&a| mul_mod(a, c, self.p)).collect(),
        )
    }

    /// Euclidean division: `(q, r)` with `self = q * divisor + r` and
    /// `deg(r) < deg(divisor)`.
    ///
    /// Returns `None` if the divisor is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_deg = divisor.degree()?;
        let p = self.p;
        match self.degree() {
            None => return Some((Self::zero(p), Self::zero(p))),
            Some(d) if d < divisor_deg => return Some((Self::zero(p), self.clone())),
            _ => {}
        }

        let lc_inv = inv_mod(divisor.leading_coeff()?, p)?;
        let mut remainder = self.clone();
        let mut quotient = vec![0; self.coeffs.len() - divisor.coeffs.len() + 1];

        while let Some(rem_deg) = remainder.degree() {
            if rem_deg < divisor_deg {
                break;
            }

            let coeff = mul_mod(remainder.leading_coeff()?, lc_inv, p);
            let shift = rem_deg - divisor_deg;
            quotient[shift] = coeff;

            // remainder -= coeff * x^shift * divisor
            for (i, &d) in divisor.coeffs.iter().enumerate() {
                let sub = neg_mod(mul_mod(coeff, d, p), p);
                remainder.coeffs[i + shift] = add_mod(remainder.coeffs[i + shift], sub, p);
            }
            remainder.normalize();
        }

        Some((Self::new(p, quotient), remainder))
    }

    /// Remainder of division, `None` if the divisor is zero.
    pub fn rem(&self, divisor: &Self) -> Option<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Monic greatest common divisor (zero if both inputs are zero).
    pub fn gcd(a: &Self, b: &Self) -> Self {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(&b).unwrap_or_else(|| Self::zero(a.p));
            a = b;
            b = r;
        }
        let p = a.p;
        a.monic().unwrap_or_else(|| Self::zero(p))
    }

    /// `base^exp mod self` by repeated squaring.
    ///
    /// Returns `None` if self is zero.
    pub fn powmod(&self, base: &Self, exp: u64) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        let mut b = base.rem(self)?;
        let mut result = Self::constant(self.p, 1).rem(self)?;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = (result * &b).rem(self)?;
            }
            b = (b.clone() * &b).rem(self)?;
            e >>= 1;
        }

        Some(result)
    }

    /// `x^exp mod self`.
    pub fn powmod_x(&self, exp: u64) -> Option<Self> {
        self.powmod(&Self::x(self.p), exp)
    }

    /// Rabin's irreducibility test.
    ///
    /// A polynomial f of degree n over F_p is irreducible iff
    /// `x^{p^n} = x (mod f)` and `gcd(x^{p^{n/q}} - x, f) = 1` for each prime
    /// divisor q of n.
    ///
    /// Returns `false` for constant or zero polynomials.
    ///
    /// # Example
    ///
    /// ```
    /// use gfmatrix::Poly;
    ///
    /// // x^2 + 1 has no root in F_3
    /// assert!(Poly::new(3, vec![1, 0, 1]).is_irreducible());
    /// // x^2 + 1 = (x + 2)(x + 3) over F_5
    /// assert!(!Poly::new(5, vec![1, 0, 1]).is_irreducible());
    /// ```
    pub fn is_irreducible(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };

        let Some(f) = self.monic() else {
            return false;
        };

        let x = Self::x(self.p);
        let divisors = prime_divisors(n as u64);
        let mut h = x.clone(); // x^{p^i} mod f

        for i in 1..=n {
            h = match f.powmod(&h, self.p) {
                Some(r) => r,
                None => return false,
            };

            for &q in &divisors {
                if n as u64 == i as u64 * q {
                    let g = Self::gcd(&(h.clone() - &x), &f);
                    if g.degree() != Some(0) {
                        return false;
                    }
                }
            }
        }

        (h - &x).is_zero()
    }

    /// Test whether this polynomial is primitive: irreducible, with `x` of
    /// multiplicative order exactly `p^n - 1` in `F_p[x]/(f)`.
    ///
    /// # Example
    ///
    /// ```
    /// use gfmatrix::Poly;
    ///
    /// // x^2 + 1 is irreducible over F_3 but x has order 4, not 8.
    /// assert!(!Poly::new(3, vec![1, 0, 1]).is_primitive());
    /// // x^2 + 2x + 2 is primitive over F_3.
    /// assert!(Poly::new(3, vec![2, 2, 1]).is_primitive());
    /// ```
    pub fn is_primitive(&self) -> bool {
        if !self.is_irreducible() {
            return false;
        }
        let Some(n) = self.degree() else {
            return false;
        };
        let Some(f) = self.monic() else {
            return false;
        };
        let Some(order) = u32::try_from(n)
            .ok()
            .and_then(|n| checked_pow(self.p, n))
            .map(|q| q - 1)
        else {
            return false;
        };

        let one = Self::constant(self.p, 1);
        if f.powmod_x(order).as_ref() != Some(&one) {
            return false;
        }
        prime_divisors(order)
            .into_iter()
            .all(|q| f.powmod_x(order / q).as_ref() != Some(&one))
    }

    /// Random monic primitive polynomial of the given degree, by rejection
    /// sampling.
    ///
    /// # Panics
    ///
    /// Panics if degree is 0.
    #[cfg(feature = "rand")]
    pub fn random_primitive<R: rand::Rng + ?Sized>(rng: &mut R, p: u64, degree: usize) -> Self {
        assert!(degree > 0, "degree must be positive");

        loop {
            let mut coeffs: Vec<u64> = (0..degree).map(|_| rng.gen_range(0..p)).collect();
            coeffs.push(1);

            let f = Self::new(p, coeffs);
            if f.is_primitive() {
                return f;
            }
        }
    }
}

impl Sub<&Poly> for Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        debug_assert_eq!(self.p, rhs.p);
        let p = self.p;
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len)
            .map(|i| add_mod(self.coeff(i), neg_mod(rhs.coeff(i), p), p))
            .collect();
        Poly::new(p, coeffs)
    }
}

impl Mul<&Poly> for Poly {
    type Output = Poly;

    /// Naive O(n*m) convolution.
    fn mul(self, rhs: &Poly) -> Poly {
        debug_assert_eq!(self.p, rhs.p);
        let p = self.p;
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero(p);
        }

        let mut coeffs = vec![0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = add_mod(coeffs[i + j], mul_mod(a, b, p), p);
            }
        }

        Poly::new(p, coeffs)
    }
}

impl fmt::Debug for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, &coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff == 0 {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match i {
                0 => write!(f, "{}", coeff)?,
                1 if coeff == 1 => write!(f, "x")?,
                1 => write!(f, "{}*x", coeff)?,
                _ if coeff == 1 => write!(f, "x^{}", i)?,
                _ => write!(f, "{}*x^{}", coeff, i)?,
            }
        }

        Ok(())
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(p: u64, coeffs: &[u64]) -> Poly {
        Poly::new(p, coeffs.to_vec())
    }

    #[test]
    fn new_normalizes() {
        let f = poly(17, &[1, 2, 0, 17]);
        assert_eq!(f.degree(), Some(1));
        assert_eq!(f.coefficients(), &[1, 2]);
    }

    #[test]
    fn zero() {
        let z = Poly::zero(17);
        assert!(z.is_zero());
        assert_eq!(z.degree(), None);
        assert_eq!(z.leading_coeff(), None);
        assert_eq!(poly(3, &[3, 6]), Poly::zero(3));
        assert!((z.clone() - &z).is_zero());
    }

    #[test]
    fn descending_roundtrip() {
        let f = Poly::from_descending(3, &[1, 2, 2]);
        assert_eq!(f.coefficients(), &[2, 2, 1]);
        assert_eq!(f.to_descending(), vec![1, 2, 2]);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", poly(17, &[1, 2, 3])), "3*x^2 + 2*x + 1");
        assert_eq!(format!("{:?}", poly(2, &[1, 1, 0, 1])), "x^3 + x + 1");
        assert_eq!(format!("{:?}", Poly::zero(2)), "0");
    }

    #[test]
    fn mul_and_sub() {
        // (x + 1)(x + 1) = x^2 + 2x + 1, which is x^2 + 1 over F_2
        let a = poly(2, &[1, 1]);
        assert_eq!(a.clone() * &a, poly(2, &[1, 0, 1]));
        assert!((a.clone() - &a).is_zero());
        assert_eq!(poly(5, &[1]) - &poly(5, &[2, 1]), poly(5, &[4, 4]));
    }

    #[test]
    fn monic_scales() {
        let f = poly(17, &[2, 4, 2]).monic().unwrap();
        assert_eq!(f, poly(17, &[1, 2, 1]));
        assert!(Poly::zero(17).monic().is_none());
    }

    #[test]
    fn div_rem_exact_division() {
        // (x^2 + 2x + 1) / (x + 1) = x + 1
        let (q, r) = poly(17, &[1, 2, 1]).div_rem(&poly(17, &[1, 1])).unwrap();
        assert_eq!(q, poly(17, &[1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn div_rem_with_remainder() {
        // x^2 + 1 = x * x + 1
        let (q, r) = poly(7, &[1, 0, 1]).div_rem(&Poly::x(7)).unwrap();
        assert_eq!(q, Poly::x(7));
        assert_eq!(r, poly(7, &[1]));
    }

    #[test]
    fn div_rem_non_monic_divisor() {
        let a = poly(7, &[3, 5, 2, 6]);
        let b = poly(7, &[1, 3]);
        let (q, r) = a.div_rem(&b).unwrap();
        let rebuilt = q * &b;
        assert_eq!(rebuilt - &(Poly::zero(7) - &r), a);
    }

    #[test]
    fn div_rem_zero_divisor() {
        assert!(poly(7, &[1, 1]).div_rem(&Poly::zero(7)).is_none());
    }

    #[test]
    fn gcd_common_factor() {
        // (x - 1)(x - 2) and (x - 2)(x - 3) over F_17
        let a = poly(17, &[2, 14, 1]);
        let b = poly(17, &[6, 12, 1]);
        assert_eq!(Poly::gcd(&a, &b), poly(17, &[15, 1]));
        assert_eq!(Poly::gcd(&Poly::zero(17), &Poly::zero(17)), Poly::zero(17));
    }

    #[test]
    fn powmod_x_basic() {
        // x^3 mod (x^2 + 1) over F_3 = -x = 2x
        let f = poly(3, &[1, 0, 1]);
        assert_eq!(f.powmod_x(3), Some(poly(3, &[0, 2])));
        assert_eq!(f.powmod_x(0), Some(poly(3, &[1])));
        assert!(Poly::zero(3).powmod_x(2).is_none());
    }

    #[test]
    fn irreducibility() {
        assert!(!Poly::zero(5).is_irreducible());
        assert!(!poly(5, &[3]).is_irreducible());
        assert!(poly(5, &[3, 1]).is_irreducible());
        // x^3 + x + 1 over F_2
        assert!(poly(2, &[1, 1, 0, 1]).is_irreducible());
        // x^4 + x^2 + 1 = (x^2 + x + 1)^2 over F_2
        assert!(!poly(2, &[1, 0, 1, 0, 1]).is_irreducible());
        // x^4 + x + 1 over F_2
        assert!(poly(2, &[1, 1, 0, 0, 1]).is_irreducible());
        // non-monic: 2x^2 + 2 = 2(x^2 + 1) over F_3
        assert!(poly(3, &[2, 0, 2]).is_irreducible());
    }

    #[test]
    fn primitivity() {
        assert!(poly(2, &[1, 1, 0, 1]).is_primitive());
        assert!(poly(2, &[1, 0, 1, 1]).is_primitive());
        // x^4 + x^3 + x^2 + x + 1 is irreducible over F_2 but x has order 5
        let f = poly(2, &[1, 1, 1, 1, 1]);
        assert!(f.is_irreducible());
        assert!(!f.is_primitive());
        // x - 3 over F_7: 3 is a primitive root mod 7
        assert!(poly(7, &[4, 1]).is_primitive());
        // x - 2 over F_7: 2 has order 3
        assert!(!poly(7, &[5, 1]).is_primitive());
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_primitive_is_primitive() {
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let f = Poly::random_primitive(&mut rng, 5, 3);
            assert_eq!(f.degree(), Some(3));
            assert_eq!(f.leading_coeff(), Some(1));
            assert!(f.is_primitive());
        }
    }
}
