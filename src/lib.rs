//! Finite fields GF(p^n) represented by companion matrices over Z/p.
//!
//! A [`PrimitiveFinder`] produces a primitive element of GF(p^n) as an
//! `n x n` matrix, and a [`FiniteFieldBuilder`] expands it into the `p^n - 1`
//! non-zero field elements.
//!
//! ```
//! use gfmatrix::{FiniteFieldBuilder, PolynomialEnumerationFinder, PrimitiveFinder};
//!
//! let mut finder = PolynomialEnumerationFinder::new(2, 3).unwrap();
//! let primitive = finder.find_first().unwrap();
//! let mut field = FiniteFieldBuilder::new(2, 3, primitive).unwrap();
//! assert_eq!(field.build().unwrap().len(), 7);
//! ```

pub mod builder;
pub mod error;
pub mod finders;
pub mod structures;
pub mod utils;

pub use builder::{ElementView, FieldElements, FiniteFieldBuilder, VectorProjection};
pub use error::{Error, Result};
pub use finders::{
    ExhaustiveFinder, PolynomialEnumerationFinder, PowerFunction, PrimitiveFinder,
    PrimitivePolynomials, RabinPolynomials, RecurrenceModel,
};
pub use structures::matrix::Matrix;
pub use structures::ordered_set::OrderedSet;
pub use structures::params::FieldParameters;
pub use structures::poly::Poly;
pub use utils::{is_prime, prime_power_decomposition};
