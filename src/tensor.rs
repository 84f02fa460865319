//! Core tensor type produced by the backends.
//!
//! `Tensor` pairs a shared, immutable storage with its dimension. It is the
//! value handed to callables under test and the value they return.

use crate::{
    dimension::DynamicDim,
    error::{DimCheckError, Result},
    storage::{CpuStorage, Storage},
};
use std::{fmt, marker::PhantomData, sync::Arc};

/// Anything with an ordered shape: the capability the checker needs from the
/// tensors a callable returns.
pub trait TensorLike {
    /// The extent of every axis, outermost first.
    fn shape(&self) -> &[usize];

    /// Number of axes.
    fn rank(&self) -> usize {
        self.shape().len()
    }
}

/// A dense, row-major n-dimensional array.
///
/// # Type Parameters
///
/// * `T`: The data type of the tensor elements.
/// * `S`: The storage backend for the tensor data.
pub struct Tensor<T, S = CpuStorage<T>>
where
    S: Storage<T>,
{
    pub(crate) storage: Arc<S>,
    pub(crate) dim: DynamicDim,
    pub(crate) marker: PhantomData<T>,
}

impl<T, S: Storage<T>> Tensor<T, S> {
    /// Creates a new tensor from the given storage and dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage length does not match the dimension size.
    pub fn new(storage: S, dim: DynamicDim) -> Result<Self> {
        let size = dim.try_size()?;
        if storage.len() != size {
            return Err(DimCheckError::ShapeSize {
                shape: dim.as_slice().to_vec(),
                expected: size,
                actual: storage.len(),
            });
        }
        Ok(Self {
            storage: Arc::new(storage),
            dim,
            marker: PhantomData,
        })
    }

    /// Creates a tensor of the given shape from row-major data.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let dim = DynamicDim::new(shape.to_vec());
        let size = dim.try_size()?;
        if data.len() != size {
            return Err(DimCheckError::ShapeSize {
                shape: shape.to_vec(),
                expected: size,
                actual: data.len(),
            });
        }
        Self::new(S::from_vec(data)?, dim)
    }

    /// Returns the dimension of the tensor.
    pub fn dim(&self) -> &DynamicDim {
        &self.dim
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.dim.as_slice()
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.dim.ndim()
    }

    /// Returns the number of elements.
    pub fn size(&self) -> usize {
        self.dim.size()
    }

    /// Returns the elements in row-major order.
    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a tensor sharing this tensor's storage with a new shape of
    /// the same size.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let dim = DynamicDim::new(shape.to_vec());
        if dim.size() != self.size() {
            return Err(DimCheckError::incompatible_shapes(self.shape(), shape));
        }
        Ok(Self {
            storage: Arc::clone(&self.storage),
            dim,
            marker: PhantomData,
        })
    }
}

impl<T: Clone, S: Storage<T>> Tensor<T, S> {
    /// Copies the elements into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.data().to_vec()
    }
}

impl<T, S: Storage<T>> Clone for Tensor<T, S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            dim: self.dim.clone(),
            marker: PhantomData,
        }
    }
}

impl<T, S: Storage<T>> fmt::Debug for Tensor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("storage", &self.storage)
            .finish()
    }
}

impl<T, S: Storage<T>> TensorLike for Tensor<T, S> {
    fn shape(&self) -> &[usize] {
        self.dim.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let t = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.ndim(), 2);
        assert_eq!(TensorLike::rank(&t), 2);
        assert_eq!(t.data()[4], 5.0);
    }

    #[test]
    fn test_size_mismatch() {
        assert!(matches!(
            Tensor::<f32>::from_vec(vec![1.0, 2.0], &[3]),
            Err(DimCheckError::ShapeSize { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn test_reshape_shares_storage() {
        let t = Tensor::<f64>::from_vec((0..6).map(f64::from).collect(), &[2, 3]).unwrap();
        let r = t.reshape(&[3, 2]).unwrap();
        assert_eq!(r.shape(), &[3, 2]);
        assert!(Arc::ptr_eq(&t.storage, &r.storage));
        assert!(t.reshape(&[4, 2]).is_err());
    }

    #[test]
    fn test_unaddressable_shape() {
        let huge = 1usize << (usize::BITS / 2);
        assert!(matches!(
            Tensor::<f32>::from_vec(Vec::new(), &[huge, huge]),
            Err(DimCheckError::ShapeTooLarge(_))
        ));
        assert!(matches!(
            Tensor::new(CpuStorage::<f32>::new(Vec::new()), DynamicDim::new(vec![huge, huge, 0])),
            Err(DimCheckError::ShapeTooLarge(_))
        ));
    }

    #[test]
    fn test_zero_sized_axis() {
        let t = Tensor::<f32>::from_vec(Vec::new(), &[3, 0]).unwrap();
        assert_eq!(t.size(), 0);
        assert_eq!(TensorLike::shape(&t), &[3, 0]);
    }
}
