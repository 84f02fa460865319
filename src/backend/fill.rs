//! Fill specifications for generated input tensors.

use crate::error::{DimCheckError, Result};
use num_traits::Float;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use std::fmt;
use std::str::FromStr;

/// How the elements of a generated input tensor are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Fill {
    /// Samples of the standard normal distribution.
    #[default]
    Random,
    Zeros,
    Ones,
    /// Every element equals the given value.
    Constant(f64),
}

impl Fill {
    /// Generates `len` elements according to this fill.
    pub fn generate<T>(&self, len: usize, rng: &mut dyn RngCore) -> Result<Vec<T>>
    where
        T: Float,
        StandardNormal: rand::distributions::Distribution<T>,
    {
        let data = match *self {
            Fill::Random => (0..len).map(|_| rng.sample(StandardNormal)).collect(),
            Fill::Zeros => vec![T::zero(); len],
            Fill::Ones => vec![T::one(); len],
            Fill::Constant(value) => {
                let value = T::from(value)
                    .filter(|v| v.is_finite() || !value.is_finite())
                    .ok_or(DimCheckError::UnrepresentableFill(value))?;
                vec![value; len]
            }
        };
        Ok(data)
    }
}

impl FromStr for Fill {
    type Err = DimCheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "random" => Ok(Fill::Random),
            "zeros" => Ok(Fill::Zeros),
            "ones" => Ok(Fill::Ones),
            other => other
                .parse::<f64>()
                .map(Fill::Constant)
                .map_err(|_| DimCheckError::UnknownFill(s.to_string())),
        }
    }
}

impl From<f64> for Fill {
    fn from(value: f64) -> Self {
        Fill::Constant(value)
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Random => f.write_str("random"),
            Fill::Zeros => f.write_str("zeros"),
            Fill::Ones => f.write_str("ones"),
            Fill::Constant(value) => write!(f, "{}", value),
        }
    }
}
