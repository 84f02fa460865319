//! Tensor factories.
//!
//! A [`Backend`] materialises an input tensor of a requested shape. The
//! checker only depends on this capability and on [`TensorLike`] for the
//! tensors that come back, so backends are chosen by type rather than by name.

mod cpu;
mod fill;
#[cfg(feature = "mmap")]
mod mmap;

pub use cpu::CpuBackend;
pub use fill::Fill;
#[cfg(feature = "mmap")]
pub use mmap::MmapBackend;

use crate::error::Result;
use crate::tensor::TensorLike;
use rand::RngCore;

/// A factory for input tensors.
pub trait Backend {
    /// The tensor type this backend produces.
    type Tensor: TensorLike;

    /// Short name used in logs and `Display` output.
    fn name(&self) -> &'static str;

    /// Builds a tensor of `shape` whose elements follow `fill`. Random fills
    /// draw from `rng`.
    fn build(&self, shape: &[usize], fill: Fill, rng: &mut dyn RngCore) -> Result<Self::Tensor>;
}
