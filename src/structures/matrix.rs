//! Dense integer matrices with arithmetic modulo a prime.
//!
//! Entries are plain `u64` values; the modulus is passed to each modular
//! operation rather than stored, so two matrices compare and hash by their
//! exact shape and entry buffer.

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::utils::{add_mod, inv_mod, mul_mod, neg_mod};

/// A `rows x cols` matrix stored in row-major order.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")
)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1;
        }
        m
    }

    /// Build from a list of rows.
    ///
    /// # Errors
    ///
    /// `InvalidMatrixShape` if there are no rows, no columns, or the rows
    /// have different lengths.
    ///
    /// # Example
    ///
    /// ```
    /// use gfmatrix::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![0, 1], vec![1, 1]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m[(1, 0)], 1);
    /// assert!(Matrix::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidMatrixShape {
                rows: height,
                cols: width,
            });
        }
        Ok(Self {
            rows: height,
            cols: width,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Companion matrix of the recurrence
    /// `A^n = a1*A^(n-1) + ... + an` with `seeds = [a1, ..., an]`.
    ///
    /// Starts from the identity, rotates every row one place to the left and
    /// writes the reversed seeds into the last column.
    pub fn shift_companion(seeds: &[u64], p: u64) -> Self {
        let n = seeds.len();
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            // Row i of the identity rotated left has its 1 at column i - 1.
            m[(i, (i + n - 1) % n)] = 1;
        }
        for i in 0..n {
            m[(i, n - 1)] = seeds[n - 1 - i] % p;
        }
        m
    }

    /// Companion matrix of the monic polynomial with coefficients
    /// `[1, c1, ..., cn]` (highest degree first).
    ///
    /// The sub-diagonal holds the identity and the last column holds
    /// `-cn, ..., -c1` from top to bottom.
    ///
    /// # Errors
    ///
    /// `InvalidMatrixShape` if fewer than two coefficients are given.
    pub fn companion_from_coefficients(coeffs: &[u64], p: u64) -> Result<Self> {
        if coeffs.len() < 2 {
            return Err(Error::InvalidMatrixShape {
                rows: coeffs.len().saturating_sub(1),
                cols: coeffs.len().saturating_sub(1),
            });
        }
        let n = coeffs.len() - 1;
        let column: Vec<u64> = coeffs.iter().rev().map(|&c| neg_mod(c, p)).collect();
        let mut m = Self::zeros(n, n);
        for i in 1..n {
            m[(i, i - 1)] = 1;
        }
        for (i, &c) in column[..n].iter().enumerate() {
            m[(i, n - 1)] = c;
        }
        Ok(m)
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` for a non-empty square matrix.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols && self.rows > 0
    }

    /// Row-major entries.
    #[inline]
    pub fn data(&self) -> &[u64] {
        &self.data
    }

    /// Copy of row `i`, top to bottom index.
    pub fn row(&self, i: usize) -> Option<Vec<u64>> {
        (i < self.rows).then(|| self.data[i * self.cols..(i + 1) * self.cols].to_vec())
    }

    /// Copy of column `j`, top to bottom.
    pub fn column(&self, j: usize) -> Option<Vec<u64>> {
        (j < self.cols).then(|| (0..self.rows).map(|i| self[(i, j)]).collect())
    }

    /// Rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.data
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(<[u64]>::to_vec)
            .collect()
    }

    /// Every entry reduced into `[0, p)`.
    pub fn reduce(&self, p: u64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| x % p).collect(),
        }
    }

    /// `(self * other) mod p`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    pub fn mul_mod(&self, other: &Self, p: u64) -> Self {
        assert_eq!(self.cols, other.rows, "inner dimensions must agree");
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                if a == 0 {
                    continue;
                }
                for j in 0..other.cols {
                    let prod = mul_mod(a, other[(k, j)], p);
                    out[(i, j)] = add_mod(out[(i, j)], prod, p);
                }
            }
        }
        out
    }

    /// `self^exp mod p` by square-and-multiply.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn pow_mod(&self, exp: u64, p: u64) -> Self {
        assert_eq!(self.rows, self.cols, "matrix must be square");
        let mut base = self.reduce(p);
        let mut result = Self::identity(self.rows).reduce(p);
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul_mod(&base, p);
            }
            base = base.mul_mod(&base, p);
            e >>= 1;
        }
        result
    }

    /// Rank over Z/p by Gaussian elimination.
    pub fn rank_mod(&self, p: u64) -> usize {
        let mut a = self.reduce(p);
        let mut rank = 0;
        for col in 0..a.cols {
            let Some(pivot) = (rank..a.rows).find(|&r| a[(r, col)] != 0) else {
                continue;
            };
            a.swap_rows(rank, pivot);
            // `p` is prime and the pivot is non-zero, so the inverse exists.
            let inv = inv_mod(a[(rank, col)], p).unwrap_or(0);
            for r in 0..a.rows {
                if r == rank || a[(r, col)] == 0 {
                    continue;
                }
                let factor = mul_mod(a[(r, col)], inv, p);
                for c in col..a.cols {
                    let sub = mul_mod(factor, a[(rank, c)], p);
                    a[(r, c)] = add_mod(a[(r, c)], neg_mod(sub, p), p);
                }
            }
            rank += 1;
            if rank == a.rows {
                break;
            }
        }
        rank
    }

    /// `true` if the matrix is square and invertible over Z/p.
    pub fn is_invertible_mod(&self, p: u64) -> bool {
        self.is_square() && self.rank_mod(p) == self.rows
    }

    /// Smallest `k` in `1..=limit` with `self^k = I (mod p)`.
    ///
    /// Walks the powers one multiplication at a time, so `limit` should stay
    /// in the range of a field's group order.
    pub fn multiplicative_order_mod(&self, p: u64, limit: u64) -> Option<u64> {
        if !self.is_square() {
            return None;
        }
        let identity = Self::identity(self.rows).reduce(p);
        let base = self.reduce(p);
        let mut current = base.clone();
        for k in 1..=limit {
            if current == identity {
                return Some(k);
            }
            current = current.mul_mod(&base, p);
        }
        None
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = u64;

    fn index(&self, idx: (usize, usize)) -> &u64 {
        assert!(idx.0 < self.rows && idx.1 < self.cols);
        &self.data[idx.0 * self.cols + idx.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut u64 {
        assert!(idx.0 < self.rows && idx.1 < self.cols);
        &mut self.data[idx.0 * self.cols + idx.1]
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_rows()).finish()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .data
            .iter()
            .map(|x| x.to_string().len())
            .max()
            .unwrap_or(1);
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", x, width = width)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<u64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<u64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}
