//! Memory-mapped tensors.

use super::{Backend, Fill};
use crate::{
    dimension::element_count,
    error::Result,
    storage::{MapElement, MmapStorage},
    tensor::Tensor,
};
use rand::{distributions::Distribution, RngCore};
use rand_distr::StandardNormal;
use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

/// Builds [`Tensor`]s over [`MmapStorage`].
///
/// Inputs live in anonymous memory maps unless a directory is configured
/// with [`MmapBackend::in_dir`], in which case each input is backed by its
/// own temporary file there.
#[derive(Debug, Clone, Default)]
pub struct MmapBackend<T = f32> {
    dir: Option<PathBuf>,
    _marker: PhantomData<T>,
}

impl<T> MmapBackend<T> {
    /// Backend using anonymous maps.
    pub fn new() -> Self {
        Self {
            dir: None,
            _marker: PhantomData,
        }
    }

    /// Backend placing its backing files in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            _marker: PhantomData,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl<T> Backend for MmapBackend<T>
where
    T: MapElement,
    StandardNormal: Distribution<T>,
{
    type Tensor = Tensor<T, MmapStorage<T>>;

    fn name(&self) -> &'static str {
        "mmap"
    }

    fn build(&self, shape: &[usize], fill: Fill, rng: &mut dyn RngCore) -> Result<Self::Tensor> {
        let len = element_count(shape)?;
        let data: Vec<T> = fill.generate(len, rng)?;
        let storage = match &self.dir {
            Some(dir) => MmapStorage::in_dir(dir, &data)?,
            None => MmapStorage::anonymous(&data)?,
        };
        Tensor::new(storage, shape.to_vec().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::TensorLike;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_build_anonymous() {
        let backend = MmapBackend::<f32>::new();
        let mut rng = StdRng::seed_from_u64(1);
        let t = backend.build(&[3, 5], Fill::Constant(2.0), &mut rng).unwrap();
        assert_eq!(t.rank(), 2);
        assert!(t.data().iter().all(|&x| x == 2.0));
    }

    #[test]
    fn test_build_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MmapBackend::<f64>::in_dir(dir.path());
        let mut rng = StdRng::seed_from_u64(1);
        let t = backend.build(&[7], Fill::Ones, &mut rng).unwrap();
        assert!(t.storage().path().unwrap().starts_with(dir.path()));
        assert_eq!(TensorLike::shape(&t), &[7]);
    }
}
