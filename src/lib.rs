//! Randomized shape assertions for tensor functions.
//!
//! `dimcheck` checks that a function producing tensors returns the shapes a
//! compact pattern promises. A pattern lists the input shapes, an arrow and
//! the output shapes. Letters name dimensions, parenthesised arithmetic
//! derives one dimension from others and commas separate tensors:
//!
//! ```text
//! "bcl, bcl -> bcl"      two rank-3 inputs, one output of the same shape
//! "bn, nm -> bm"         matrix product
//! "bc -> b(2*c+1)"       the last axis grows to 2c+1
//! ```
//!
//! Every trial binds each input letter to a distinct random prime, builds
//! the inputs through a [`Backend`], calls the function and compares the
//! returned shapes. Distinct primes make accidental agreement between
//! unrelated axes unlikely, and several trials (`depth`) make it rarer
//! still. This is a spot check, not a proof.
//!
//! ```
//! use dimcheck::{constraints, ops, DimChecker, DimCheckError};
//!
//! let checker = DimChecker::new().with_max_size(30).with_depth(2);
//!
//! // Summing over the last axis while keeping it leaves a width of one.
//! let sum_last = |x: &[dimcheck::Tensor<f32>]| ops::sum_axis(&x[0], 2, true).unwrap();
//! checker.test_dims(sum_last, "bcl -> bcn", constraints![n = 1]).unwrap();
//!
//! let err = checker.test_dims(sum_last, "bcl -> bcn", constraints![n = 0]).unwrap_err();
//! assert!(matches!(err, DimCheckError::ShapeMismatch { .. }));
//! ```

pub mod backend;
pub mod checker;
pub mod constraints;
pub mod dimension;
pub mod error;
pub mod expression;
pub mod formula;
pub mod linalg;
pub mod macros;
pub mod ops;
pub mod storage;
pub mod tensor;

pub use backend::{Backend, CpuBackend, Fill};
#[cfg(feature = "mmap")]
pub use backend::MmapBackend;
pub use checker::{CheckerConfig, DimChecker, Outputs};
pub use constraints::{ConstraintValue, Constraints};
pub use error::{DimCheckError, Result};
pub use expression::evaluate;
pub use formula::{DimExpr, Formula, Pattern, VectorFormula};
pub use tensor::{Tensor, TensorLike};
