//! Heap-allocated tensors.

use super::{Backend, Fill};
use crate::{dimension::element_count, error::Result, storage::CpuStorage, tensor::Tensor};
use num_traits::Float;
use rand::{distributions::Distribution, RngCore};
use rand_distr::StandardNormal;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Builds [`Tensor`]s over [`CpuStorage`]. The element type defaults to `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend<T = f32> {
    _marker: PhantomData<T>,
}

impl<T> CpuBackend<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Backend for CpuBackend<T>
where
    T: Float + Debug + Send + Sync + 'static,
    StandardNormal: Distribution<T>,
{
    type Tensor = Tensor<T, CpuStorage<T>>;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn build(&self, shape: &[usize], fill: Fill, rng: &mut dyn RngCore) -> Result<Self::Tensor> {
        let len = element_count(shape)?;
        Tensor::from_vec(fill.generate(len, rng)?, shape)
    }
}
