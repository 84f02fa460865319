//! Matrix multiplication.

use crate::{
    dimension::DynamicDim,
    error::{DimCheckError, Result},
    storage::Storage,
    tensor::Tensor,
};
use num_traits::Float;

/// Multiplies the trailing two axes of `a` (`.. x m x k`) and `b`
/// (`.. x k x n`). Leading batch axes must be identical.
pub fn matmul<T, S>(a: &Tensor<T, S>, b: &Tensor<T, S>) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
{
    let (sa, sb) = (a.shape(), b.shape());
    let rank = sa.len();
    if rank < 2 || sb.len() != rank || sa[..rank - 2] != sb[..rank - 2] || sa[rank - 1] != sb[rank - 2] {
        return Err(DimCheckError::incompatible_shapes(sa, sb));
    }

    let (m, k, n) = (sa[rank - 2], sa[rank - 1], sb[rank - 1]);
    let batch: usize = sa[..rank - 2].iter().product();
    let mut shape = sa[..rank - 2].to_vec();
    shape.extend([m, n]);
    let dim = DynamicDim::new(shape);
    let (da, db) = (a.data(), b.data());

    let mut out = vec![T::zero(); dim.try_size()?];
    for bi in 0..batch {
        let (oa, ob, oc) = (bi * m * k, bi * k * n, bi * m * n);
        for i in 0..m {
            for p in 0..k {
                let lhs = da[oa + i * k + p];
                for j in 0..n {
                    out[oc + i * n + j] = out[oc + i * n + j] + lhs * db[ob + p * n + j];
                }
            }
        }
    }

    Tensor::new(S::from_vec(out)?, dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_2d() {
        let a = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Tensor::<f32>::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matmul_batched_rectangular() {
        let a = Tensor::<f64>::from_vec(vec![1.0; 2 * 3 * 4], &[2, 3, 4]).unwrap();
        let b = Tensor::<f64>::from_vec(vec![1.0; 2 * 4 * 5], &[2, 4, 5]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 3, 5]);
        assert!(c.data().iter().all(|&x| x == 4.0));
    }

    #[test]
    fn test_matmul_unaddressable_output() {
        let huge = 1usize << (usize::BITS / 2);
        let a = Tensor::<f32>::from_vec(Vec::new(), &[huge, 0]).unwrap();
        let b = Tensor::<f32>::from_vec(Vec::new(), &[0, huge]).unwrap();
        assert!(matches!(matmul(&a, &b), Err(DimCheckError::ShapeTooLarge(_))));
    }

    #[test]
    fn test_matmul_mismatch() {
        let a = Tensor::<f32>::from_vec(vec![0.0; 6], &[2, 3]).unwrap();
        assert!(matches!(matmul(&a, &a), Err(DimCheckError::IncompatibleShapes(_, _))));
    }
}
