use crate::backend::Fill;
use std::fmt;

/// Settings shared by every trial a [`DimChecker`](super::DimChecker) runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    /// How input tensors are filled.
    pub fill: Fill,
    /// Exclusive upper bound on the primes drawn for free variables.
    pub max_size: usize,
    /// Number of independent trials per check.
    pub depth: usize,
    /// Seed for prime draws and random fills. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Fail on output letters bound neither by the inputs nor by a
    /// constraint instead of skipping them.
    pub strict: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            fill: Fill::Random,
            max_size: 100,
            depth: 1,
            seed: None,
            strict: false,
        }
    }
}

impl fmt::Display for CheckerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fill={}, max_size={}, depth={}, strict={}",
            self.fill, self.max_size, self.depth, self.strict
        )?;
        if let Some(seed) = self.seed {
            write!(f, ", seed={}", seed)?;
        }
        Ok(())
    }
}
