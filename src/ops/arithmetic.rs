//! Element-wise arithmetic.

use crate::{
    error::{DimCheckError, Result},
    storage::Storage,
    tensor::Tensor,
};
use num_traits::Float;

fn zip_with<T, S, F>(a: &Tensor<T, S>, b: &Tensor<T, S>, op: F) -> Result<Tensor<T, S>>
where
    T: Float,
    S: Storage<T>,
    F: Fn(T, T) -> T,
{
    if a.shape() != b.shape() {
        return Err(DimCheckError::incompatible_shapes(a.shape(), b.shape()));
    }
    let out = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| op(x, y))
        .collect();
    Tensor::new(S::from_vec(out)?, a.dim().clone())
}

/// Element-wise sum of two tensors of identical shape.
pub fn add<T: Float, S: Storage<T>>(a: &Tensor<T, S>, b: &Tensor<T, S>) -> Result<Tensor<T, S>> {
    zip_with(a, b, |x, y| x + y)
}

/// Element-wise difference of two tensors of identical shape.
pub fn sub<T: Float, S: Storage<T>>(a: &Tensor<T, S>, b: &Tensor<T, S>) -> Result<Tensor<T, S>> {
    zip_with(a, b, |x, y| x - y)
}

/// Element-wise product of two tensors of identical shape.
pub fn mul<T: Float, S: Storage<T>>(a: &Tensor<T, S>, b: &Tensor<T, S>) -> Result<Tensor<T, S>> {
    zip_with(a, b, |x, y| x * y)
}

/// Multiplies every element by `factor`.
pub fn scale<T: Float, S: Storage<T>>(a: &Tensor<T, S>, factor: T) -> Result<Tensor<T, S>> {
    let out = a.data().iter().map(|&x| x * factor).collect();
    Tensor::new(S::from_vec(out)?, a.dim().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_mul() {
        let a = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Tensor::<f64>::from_vec(vec![4.0, 3.0, 2.0, 1.0], &[2, 2]).unwrap();
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![5.0; 4]);
        assert_eq!(sub(&a, &b).unwrap().to_vec(), vec![-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(mul(&a, &b).unwrap().to_vec(), vec![4.0, 6.0, 6.0, 4.0]);
        assert_eq!(scale(&a, 0.5).unwrap().to_vec(), vec![0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Tensor::<f32>::from_vec(vec![0.0; 6], &[2, 3]).unwrap();
        let b = Tensor::<f32>::from_vec(vec![0.0; 6], &[3, 2]).unwrap();
        assert!(matches!(add(&a, &b), Err(DimCheckError::IncompatibleShapes(_, _))));
    }
}
