//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by field construction and primitive element search.
///
/// None of these are retried or patched internally; every operation hands
/// them straight back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The field characteristic is not prime.
    #[error("characteristic {0} is not prime")]
    NotPrime(u64),

    /// The extension degree is zero.
    #[error("extension degree must be at least 1")]
    ZeroDegree,

    /// `p^n` does not fit in a `u64`.
    #[error("field of order {p}^{n} does not fit in 64 bits")]
    FieldTooLarge { p: u64, n: u32 },

    /// The recurrence model only supports prime extension degrees.
    #[error("extension degree {0} is not prime")]
    InvalidDegree(u32),

    /// Removal of an element that is not in an [`OrderedSet`](crate::OrderedSet).
    #[error("element is not a member of the set")]
    KeyNotFound,

    /// Positional access outside `[-len, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// The candidate source ran dry before producing a single primitive element.
    #[error("no primitive element found")]
    NoPrimitiveElementFound,

    /// A builder cache holds neither zero nor the full group of elements.
    #[error("inconsistent field state: {built} of {expected} elements built")]
    InconsistentFieldState { built: usize, expected: u64 },

    /// A matrix had an unusable shape for the requested operation.
    #[error("invalid matrix shape {rows}x{cols}")]
    InvalidMatrixShape { rows: usize, cols: usize },

    /// A recurrence seed tuple of the wrong length.
    #[error("expected {expected} seed coefficients, got {got}")]
    SeedLength { expected: usize, got: usize },

    /// An element view name other than `matrix` or `vector`.
    #[error("unknown element view `{0}`")]
    UnknownView(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
