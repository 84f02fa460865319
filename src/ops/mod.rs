//! Tensor operations.
//!
//! Free functions over [`Tensor`](crate::tensor::Tensor), generic in the
//! element type and the storage, so a callable written against them runs on
//! every backend. Results are freshly allocated in the same kind of storage as
//! the inputs.

pub mod arithmetic;
pub mod reduction;
pub mod slice;

pub use arithmetic::{add, mul, scale, sub};
pub use reduction::{mean_axis, sum_axis};
pub use slice::{concat, narrow};
