//! Axis permutation.

use crate::{
    error::{DimCheckError, Result},
    storage::Storage,
    tensor::Tensor,
};
use num_traits::Float;

/// Permute the dimensions of a tensor, materialising the result.
///
/// Axis `i` of the result is axis `permutation[i]` of the input.
pub fn permute<T, S>(tensor: &Tensor<T, S>, permutation: &[usize]) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let out_dim = tensor.dim().permute(permutation)?;
    let in_strides: Vec<usize> = permutation
        .iter()
        .map(|&p| tensor.dim().strides()[p])
        .collect();
    let out_shape = out_dim.as_slice();
    let data = tensor.data();

    let mut out = Vec::with_capacity(out_dim.size());
    let mut index = vec![0usize; out_dim.ndim()];
    for _ in 0..out_dim.size() {
        let offset: usize = index.iter().zip(&in_strides).map(|(i, s)| i * s).sum();
        out.push(data[offset]);

        for axis in (0..index.len()).rev() {
            index[axis] += 1;
            if index[axis] < out_shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }

    Tensor::new(S::from_vec(out)?, out_dim)
}

/// Swap two axes.
pub fn transpose<T, S>(tensor: &Tensor<T, S>, a: usize, b: usize) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let ndim = tensor.ndim();
    if a >= ndim || b >= ndim {
        return Err(DimCheckError::invalid_axis(a.max(b), ndim));
    }
    let mut permutation: Vec<usize> = (0..ndim).collect();
    permutation.swap(a, b);
    permute(tensor, &permutation)
}
