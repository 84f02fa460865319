//! Reduction operations for tensors.

use crate::{error::Result, storage::Storage, tensor::Tensor};
use num_traits::Float;

/// Compute the sum of elements along `axis`.
///
/// With `keep_dim` the reduced axis stays in the shape with extent 1,
/// otherwise it is removed.
pub fn sum_axis<T, S>(tensor: &Tensor<T, S>, axis: usize, keep_dim: bool) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let (outer, extent, inner) = tensor.dim().split_at_axis(axis)?;
    let data = tensor.data();

    let mut out = vec![T::zero(); outer * inner];
    for o in 0..outer {
        for k in 0..extent {
            let base = (o * extent + k) * inner;
            for i in 0..inner {
                out[o * inner + i] = out[o * inner + i] + data[base + i];
            }
        }
    }

    let dim = if keep_dim {
        tensor.dim().with_extent(axis, 1)?
    } else {
        tensor.dim().remove_axis(axis)?
    };
    Tensor::new(S::from_vec(out)?, dim)
}

/// Compute the mean of elements along `axis`.
pub fn mean_axis<T, S>(tensor: &Tensor<T, S>, axis: usize, keep_dim: bool) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let summed = sum_axis(tensor, axis, keep_dim)?;
    let extent = tensor.shape()[axis];
    let count = T::from(extent).unwrap_or_else(T::nan);
    let out = summed.data().iter().map(|&x| x / count).collect();
    Tensor::new(S::from_vec(out)?, summed.dim().clone())
}
