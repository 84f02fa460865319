//! Element buffers behind a [`Tensor`](crate::Tensor).
//!
//! Heap storage is always available. Memory-mapped storage needs the `mmap`
//! feature.

mod cpu;
#[cfg(feature = "mmap")]
mod mmap;

pub use cpu::CpuStorage;
#[cfg(feature = "mmap")]
pub use mmap::{MapElement, MmapStorage};

use crate::error::Result;
use std::fmt::Debug;

/// A storage owns a flat, row-major buffer of elements. Tensors share their
/// storage behind an `Arc`, so storages are immutable once built.
pub trait Storage<T>: Debug + Send + Sync + Sized + 'static {
    /// Creates a new storage holding `data`.
    fn from_vec(data: Vec<T>) -> Result<Self>;

    /// Returns the number of elements in the storage.
    fn len(&self) -> usize;

    /// Returns `true` if the storage contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a slice containing the entire storage.
    fn as_slice(&self) -> &[T];
}
