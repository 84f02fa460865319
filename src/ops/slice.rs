//! Slicing and concatenation along an axis.

use crate::{
    error::{DimCheckError, Result},
    storage::Storage,
    tensor::Tensor,
};
use num_traits::Float;

/// Keeps `len` consecutive entries of `axis`, starting at `start`.
pub fn narrow<T, S>(tensor: &Tensor<T, S>, axis: usize, start: usize, len: usize) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let (outer, extent, inner) = tensor.dim().split_at_axis(axis)?;
    let end = start.checked_add(len).filter(|&end| end <= extent).ok_or(DimCheckError::InvalidSlice {
        start,
        end: start.saturating_add(len),
        size: extent,
    })?;

    let data = tensor.data();
    let mut out = Vec::with_capacity(outer * len * inner);
    for o in 0..outer {
        let row = o * extent * inner;
        out.extend_from_slice(&data[row + start * inner..row + end * inner]);
    }

    let dim = tensor.dim().with_extent(axis, len)?;
    Tensor::new(S::from_vec(out)?, dim)
}

/// Joins tensors along `axis`. All other extents must agree.
pub fn concat<T, S>(tensors: &[&Tensor<T, S>], axis: usize) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let first = match tensors.first() {
        Some(first) => *first,
        None => return Err(DimCheckError::incompatible_shapes(&[], &[])),
    };
    let (outer, _, inner) = first.dim().split_at_axis(axis)?;

    let mut total = 0;
    for t in tensors {
        let compatible = t.ndim() == first.ndim()
            && t
                .shape()
                .iter()
                .zip(first.shape())
                .enumerate()
                .all(|(i, (a, b))| i == axis || a == b);
        if !compatible {
            return Err(DimCheckError::incompatible_shapes(first.shape(), t.shape()));
        }
        total = t.shape()[axis]
            .checked_add(total)
            .ok_or_else(|| DimCheckError::ShapeTooLarge(first.shape().to_vec()))?;
    }

    let dim = first.dim().with_extent(axis, total)?;
    let mut out = Vec::with_capacity(dim.try_size()?);
    for o in 0..outer {
        for t in tensors {
            let chunk = t.shape()[axis] * inner;
            out.extend_from_slice(&t.data()[o * chunk..(o + 1) * chunk]);
        }
    }

    Tensor::new(S::from_vec(out)?, dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CpuStorage;

    fn grid() -> Tensor<f32> {
        Tensor::from_vec((0..12).map(|x| x as f32).collect(), &[2, 2, 3]).unwrap()
    }

    #[test]
    fn test_narrow_last_axis() {
        let n = narrow(&grid(), 2, 1, 1).unwrap();
        assert_eq!(n.shape(), &[2, 2, 1]);
        assert_eq!(n.to_vec(), vec![1.0, 4.0, 7.0, 10.0]);
    }

    #[test]
    fn test_narrow_middle_axis() {
        let n = narrow(&grid(), 1, 1, 1).unwrap();
        assert_eq!(n.shape(), &[2, 1, 3]);
        assert_eq!(n.to_vec(), vec![3.0, 4.0, 5.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_narrow_out_of_range() {
        assert!(matches!(
            narrow(&grid(), 2, 2, 2),
            Err(DimCheckError::InvalidSlice { start: 2, end: 4, size: 3 })
        ));
    }

    #[test]
    fn test_concat() {
        let g = grid();
        let c = concat(&[&g, &g], 2).unwrap();
        assert_eq!(c.shape(), &[2, 2, 6]);
        assert_eq!(&c.data()[..6], &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);

        let c = concat(&[&g, &g], 0).unwrap();
        assert_eq!(c.shape(), &[4, 2, 3]);
        assert_eq!(c.data()[12], 0.0);
    }

    #[test]
    fn test_concat_mismatch() {
        let g = grid();
        let other = Tensor::<f32>::from_vec(vec![0.0; 4], &[2, 2, 1]).unwrap();
        assert!(concat(&[&g, &other], 2).is_ok());
        assert!(concat(&[&g, &other], 1).is_err());
        assert!(concat::<f32, CpuStorage<f32>>(&[], 0).is_err());
    }
}
