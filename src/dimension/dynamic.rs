//! Run-time tensor dimensions.

use crate::error::{DimCheckError, Result};
use std::fmt;

/// The shape of a tensor together with its row-major strides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DynamicDim {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl DynamicDim {
    /// Creates a new dynamic dimension with the given shape.
    pub fn new(shape: impl Into<Vec<usize>>) -> Self {
        let shape = shape.into();
        let strides = compute_strides(&shape);
        Self { shape, strides }
    }

    /// Returns the shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the row-major strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements, saturating at `usize::MAX` for
    /// shapes that [`checked_size`] rejects.
    pub fn size(&self) -> usize {
        checked_size(&self.shape).unwrap_or(usize::MAX)
    }

    /// Returns the total number of elements, failing with
    /// [`DimCheckError::ShapeTooLarge`] if the shape cannot be addressed.
    pub fn try_size(&self) -> Result<usize> {
        element_count(&self.shape)
    }

    /// Checks that `axis` exists.
    pub fn check_axis(&self, axis: usize) -> Result<()> {
        if axis < self.ndim() {
            Ok(())
        } else {
            Err(DimCheckError::invalid_axis(axis, self.ndim()))
        }
    }

    /// Splits the shape around `axis` into `(outer, extent, inner)` element
    /// counts, the usual decomposition for axis-wise loops.
    pub fn split_at_axis(&self, axis: usize) -> Result<(usize, usize, usize)> {
        self.check_axis(axis)?;
        let outer = self.shape[..axis].iter().product();
        let inner = self.shape[axis + 1..].iter().product();
        Ok((outer, self.shape[axis], inner))
    }

    /// Returns a copy with the extent of `axis` replaced.
    pub fn with_extent(&self, axis: usize, extent: usize) -> Result<Self> {
        self.check_axis(axis)?;
        let mut shape = self.shape.clone();
        shape[axis] = extent;
        Ok(Self::new(shape))
    }

    /// Returns a copy with `axis` removed.
    pub fn remove_axis(&self, axis: usize) -> Result<Self> {
        self.check_axis(axis)?;
        let mut shape = self.shape.clone();
        shape.remove(axis);
        Ok(Self::new(shape))
    }

    /// Permutes the dimensions according to the given permutation.
    pub fn permute(&self, permutation: &[usize]) -> Result<Self> {
        if permutation.len() != self.ndim() {
            return Err(DimCheckError::incompatible_shapes(&self.shape, permutation));
        }
        let mut seen = vec![false; self.ndim()];
        let mut shape = Vec::with_capacity(self.ndim());
        for &p in permutation {
            self.check_axis(p)?;
            if std::mem::replace(&mut seen[p], true) {
                return Err(DimCheckError::incompatible_shapes(&self.shape, permutation));
            }
            shape.push(self.shape[p]);
        }
        Ok(Self::new(shape))
    }
}

/// Number of elements of `shape`, or `None` if the product of its non-zero
/// extents overflows `usize`.
///
/// Rejecting on the non-zero extents keeps every partial product over the
/// shape in range, even when some axis is empty.
pub fn checked_size(shape: &[usize]) -> Option<usize> {
    let nonzero = shape
        .iter()
        .filter(|&&extent| extent != 0)
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))?;
    Some(if shape.contains(&0) { 0 } else { nonzero })
}

/// [`checked_size`] as a `Result`.
pub fn element_count(shape: &[usize]) -> Result<usize> {
    checked_size(shape).ok_or_else(|| DimCheckError::ShapeTooLarge(shape.to_vec()))
}

fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut acc = 1usize;
    for (stride, &extent) in strides.iter_mut().zip(shape).rev() {
        *stride = acc;
        acc = acc.wrapping_mul(extent);
    }
    strides
}

impl fmt::Display for DynamicDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape)
    }
}

impl From<Vec<usize>> for DynamicDim {
    fn from(shape: Vec<usize>) -> Self {
        Self::new(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_dim_creation() {
        let dim = DynamicDim::new(vec![2, 3, 4]);
        assert_eq!(dim.ndim(), 3);
        assert_eq!(dim.size(), 24);
        assert_eq!(dim.as_slice(), &[2, 3, 4]);
        assert_eq!(dim.strides(), &[12, 4, 1]);
    }

    #[test]
    fn test_scalar_dim() {
        let dim = DynamicDim::new(Vec::new());
        assert_eq!(dim.ndim(), 0);
        assert_eq!(dim.size(), 1);
    }

    #[test]
    fn test_oversized_shapes() {
        let huge = 1usize << (usize::BITS / 2);
        assert_eq!(checked_size(&[huge, huge]), None);
        assert_eq!(checked_size(&[huge, huge, 0]), None);
        assert_eq!(checked_size(&[huge, 0]), Some(0));
        assert_eq!(checked_size(&[3, 5]), Some(15));

        let dim = DynamicDim::new(vec![huge, huge]);
        assert_eq!(dim.size(), usize::MAX);
        assert!(matches!(dim.try_size(), Err(DimCheckError::ShapeTooLarge(_))));
    }

    #[test]
    fn test_split_at_axis() {
        let dim = DynamicDim::new(vec![2, 3, 4]);
        assert_eq!(dim.split_at_axis(0).unwrap(), (1, 2, 12));
        assert_eq!(dim.split_at_axis(1).unwrap(), (2, 3, 4));
        assert_eq!(dim.split_at_axis(2).unwrap(), (6, 4, 1));
        assert!(dim.split_at_axis(3).is_err());
    }

    #[test]
    fn test_permute() {
        let dim = DynamicDim::new(vec![2, 3, 4]);
        let permuted = dim.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.as_slice(), &[4, 2, 3]);
        assert!(dim.permute(&[0, 0, 1]).is_err());
        assert!(dim.permute(&[0, 1]).is_err());
    }

    #[test]
    fn test_extent_edits() {
        let dim = DynamicDim::new(vec![2, 3, 4]);
        assert_eq!(dim.with_extent(2, 1).unwrap().as_slice(), &[2, 3, 1]);
        assert_eq!(dim.remove_axis(1).unwrap().as_slice(), &[2, 4]);
    }
}
