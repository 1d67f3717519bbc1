//! Expansion of a primitive element into the multiplicative group of GF(p^n).

use core::fmt;
use core::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::structures::matrix::Matrix;
use crate::structures::ordered_set::OrderedSet;
use crate::structures::params::FieldParameters;

/// Which column of an element matrix serves as its coordinate vector.
///
/// The chosen column is read bottom to top. For a companion matrix `A`, the
/// first column of `A^k` reversed is the coefficient vector of `A^k` in the
/// basis `A^(n-1), ..., A, 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum VectorProjection {
    #[default]
    FirstColumn,
    LastColumn,
}

impl VectorProjection {
    /// Project `matrix` onto its designated column, reversed.
    ///
    /// # Errors
    ///
    /// `InvalidMatrixShape` if the matrix has no rows or no columns.
    pub fn project(self, matrix: &Matrix) -> Result<Vec<u64>> {
        let (rows, cols) = matrix.shape();
        let index = match self {
            Self::FirstColumn => Some(0),
            Self::LastColumn => cols.checked_sub(1),
        };
        let mut column = index
            .and_then(|j| matrix.column(j))
            .filter(|c| !c.is_empty())
            .ok_or(Error::InvalidMatrixShape { rows, cols })?;
        column.reverse();
        Ok(column)
    }
}

/// The representation requested from [`FiniteFieldBuilder::get_elements`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ElementView {
    /// Full matrices.
    #[default]
    Matrix,
    /// One coordinate vector per matrix.
    Vector,
}

impl FromStr for ElementView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "matrix" => Ok(Self::Matrix),
            "vector" => Ok(Self::Vector),
            other => Err(Error::UnknownView(other.to_owned())),
        }
    }
}

impl fmt::Display for ElementView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matrix => "matrix",
            Self::Vector => "vector",
        })
    }
}

/// Field elements in the requested [`ElementView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldElements<'a> {
    Matrices(&'a [Matrix]),
    Vectors(Vec<Vec<u64>>),
}

impl FieldElements<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Matrices(m) => m.len(),
            Self::Vectors(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the `p^n - 1` non-zero elements of GF(p^n) as the powers
/// `A, A^2, ..., A^(p^n - 1)` of a primitive matrix `A`.
///
/// The expansion runs once and is cached. A matrix that is not primitive
/// produces fewer distinct powers; the builder keeps what it produced and
/// reports [`Error::InconsistentFieldState`] from then on.
///
/// # Example
///
/// ```
/// use gfmatrix::{ElementView, ExhaustiveFinder, FieldElements, FiniteFieldBuilder, PrimitiveFinder};
///
/// let primitive = ExhaustiveFinder::new(3, 2).unwrap().find_first().unwrap();
/// let mut builder = FiniteFieldBuilder::new(3, 2, primitive).unwrap();
/// assert_eq!(builder.build().unwrap().len(), 8);
///
/// let FieldElements::Vectors(vectors) = builder.get_elements(ElementView::Vector, None).unwrap() else {
///     unreachable!()
/// };
/// assert!(vectors.iter().all(|v| v.len() == 2 && v.iter().all(|&c| c < 3)));
/// ```
#[derive(Clone, Debug)]
pub struct FiniteFieldBuilder {
    params: FieldParameters,
    primitive: Matrix,
    projection: VectorProjection,
    elements: OrderedSet<Matrix>,
}

impl FiniteFieldBuilder {
    /// Builder for GF(p^n) generated by `primitive`.
    ///
    /// The matrix is reduced modulo `p`.
    ///
    /// # Errors
    ///
    /// Parameter validation errors, and `InvalidMatrixShape` unless
    /// `primitive` is `n x n`.
    pub fn new(p: u64, n: u32, primitive: Matrix) -> Result<Self> {
        let params = FieldParameters::new(p, n)?;
        let (rows, cols) = primitive.shape();
        if rows != params.dim() || cols != params.dim() {
            return Err(Error::InvalidMatrixShape { rows, cols });
        }
        Ok(Self {
            params,
            primitive: primitive.reduce(p),
            projection: VectorProjection::default(),
            elements: OrderedSet::new(),
        })
    }

    /// Use `projection` for vector views.
    pub fn with_projection(mut self, projection: VectorProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn params(&self) -> FieldParameters {
        self.params
    }

    pub fn primitive(&self) -> &Matrix {
        &self.primitive
    }

    pub fn projection(&self) -> VectorProjection {
        self.projection
    }

    /// `true` once the full group is cached.
    pub fn is_built(&self) -> bool {
        self.elements.len() as u64 == self.params.group_order()
    }

    /// Expand the primitive element, or return the cached group.
    ///
    /// # Errors
    ///
    /// `InconsistentFieldState` if the cache holds a partial group, either
    /// from an earlier call or because the matrix is not primitive.
    pub fn build(&mut self) -> Result<&OrderedSet<Matrix>> {
        self.expand(None)
    }

    /// Like [`build`](Self::build), reporting completion percentages to
    /// `progress`.
    ///
    /// `progress` is called from the current thread only, with strictly
    /// increasing values starting at 0 and ending at 100. A cache hit does
    /// not call it.
    pub fn build_with_progress<F>(&mut self, mut progress: F) -> Result<&OrderedSet<Matrix>>
    where
        F: FnMut(u8),
    {
        self.expand(Some(&mut progress))
    }

    /// The field elements as matrices or as coordinate vectors, building
    /// them first if needed.
    ///
    /// # Errors
    ///
    /// Everything [`build`](Self::build) returns.
    pub fn get_elements(
        &mut self,
        view: ElementView,
        progress: Option<&mut dyn FnMut(u8)>,
    ) -> Result<FieldElements<'_>> {
        let projection = self.projection;
        let elements = self.expand(progress)?;
        match view {
            ElementView::Matrix => Ok(FieldElements::Matrices(elements.as_slice())),
            ElementView::Vector => elements
                .iter()
                .map(|m| projection.project(m))
                .collect::<Result<_>>()
                .map(FieldElements::Vectors),
        }
    }

    fn expand(&mut self, progress: Option<&mut dyn FnMut(u8)>) -> Result<&OrderedSet<Matrix>> {
        let expected = self.params.group_order();
        match self.elements.len() as u64 {
            0 => {}
            built if built == expected => {
                debug!(params = %self.params, "field elements are cached");
                return Ok(&self.elements);
            }
            built => {
                return Err(Error::InconsistentFieldState {
                    built: built as usize,
                    expected,
                })
            }
        }

        info!(params = %self.params, "building field elements");
        let p = self.params.p();
        let steps = expected - 1;
        let mut progress = Progress::new(progress);
        progress.report(0);

        let mut current = self.primitive.clone();
        self.elements.add(current.clone());
        for step in 1..=steps {
            current = current.mul_mod(&self.primitive, p);
            self.elements.add(current.clone());
            progress.report((u128::from(step) * 100 / u128::from(steps)) as u8);
        }
        progress.report(100);

        let built = self.elements.len();
        if built as u64 != expected {
            warn!(built, expected, "primitive element generates a proper subgroup");
            return Err(Error::InconsistentFieldState { built, expected });
        }
        info!(count = built, "built field elements");
        Ok(&self.elements)
    }
}

/// Deduplicated progress reporting.
struct Progress<'a> {
    callback: Option<&'a mut dyn FnMut(u8)>,
    reported: Option<u8>,
}

impl<'a> Progress<'a> {
    fn new(callback: Option<&'a mut dyn FnMut(u8)>) -> Self {
        Self {
            callback,
            reported: None,
        }
    }

    fn report(&mut self, percent: u8) {
        let Some(callback) = self.callback.as_deref_mut() else {
            return;
        };
        if self.reported.map_or(true, |last| percent > last) {
            self.reported = Some(percent);
            callback(percent);
        }
    }
}
