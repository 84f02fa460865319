//! The randomized trial engine.
//!
//! A [`DimChecker`] parses a pattern such as `"bcl, bcl -> bcl"`, binds every
//! input letter to a random distinct prime, builds the input tensors through
//! its [`Backend`], calls the function under test and compares the shapes it
//! returns against the output side of the pattern. Each check repeats this
//! `depth` times with fresh draws and stops at the first disagreement.
//!
//! ```
//! use dimcheck::{constraints, ops, DimChecker};
//!
//! let checker = DimChecker::new().with_depth(3).with_max_size(30);
//! checker
//!     .test_dims(|x| ops::sum_axis(&x[0], 2, true).unwrap(), "bcl -> bcn", constraints![n = 1])
//!     .unwrap();
//! ```

pub mod assign;
mod config;
mod outputs;

pub use assign::{assign_variables, available_primes, PRIMES};
pub use config::CheckerConfig;
pub use outputs::Outputs;

use crate::{
    backend::{Backend, CpuBackend, Fill},
    constraints::{ConstraintValue, Constraints},
    error::{DimCheckError, Result},
    formula::{Formula, Pattern},
    tensor::TensorLike,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{collections::BTreeMap, convert::Infallible, error::Error, fmt};
use tracing::{debug, trace};

/// Checks the shapes a function returns against a pattern.
///
/// The backend decides which tensors the function receives; it defaults to
/// [`CpuBackend<f32>`].
#[derive(Debug, Clone)]
pub struct DimChecker<B = CpuBackend<f32>> {
    backend: B,
    config: CheckerConfig,
}

impl DimChecker {
    /// A checker over the CPU backend with the default configuration.
    pub fn new() -> Self {
        Self::with_backend(CpuBackend::new())
    }
}

impl Default for DimChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> DimChecker<B> {
    /// A checker over `backend` with the default configuration.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            config: CheckerConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: CheckerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.config.fill = fill.into();
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.config.depth = depth;
        self
    }

    /// Makes prime draws and random fills reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// In strict mode an output letter that is bound neither by the inputs
    /// nor by a constraint fails with
    /// [`DimCheckError::UnboundOutputVariable`] instead of being skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl<B: Backend> DimChecker<B> {
    /// Runs the trials for `pattern` against `f`.
    ///
    /// `constraints` fixes the value of individual letters, usually built
    /// with [`constraints!`](crate::constraints). The pattern and
    /// constraints are validated before any trial runs.
    ///
    /// # Errors
    ///
    /// Returns the first parse, validation or shape error encountered.
    pub fn test_dims<F, R>(&self, mut f: F, pattern: &str, constraints: &[(&str, ConstraintValue)]) -> Result<()>
    where
        F: FnMut(&[B::Tensor]) -> R,
        R: Into<Outputs<B::Tensor>>,
    {
        self.try_test_dims(
            |inputs: &[B::Tensor]| Ok::<R, Infallible>(f(inputs)),
            pattern,
            constraints,
        )
    }

    /// Like [`test_dims`](Self::test_dims) for functions that can fail. An
    /// error returned by `f` aborts the check as [`DimCheckError::Callable`].
    pub fn try_test_dims<F, R, E>(
        &self,
        f: F,
        pattern: &str,
        constraints: &[(&str, ConstraintValue)],
    ) -> Result<()>
    where
        F: FnMut(&[B::Tensor]) -> std::result::Result<R, E>,
        R: Into<Outputs<B::Tensor>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let pattern = Pattern::parse(pattern)?;
        let constraints = Constraints::validate(constraints)?;
        self.try_check(f, &pattern, &constraints)
    }

    /// Runs the trials against an already parsed pattern.
    pub fn check<F, R>(&self, mut f: F, pattern: &Pattern, constraints: &Constraints) -> Result<()>
    where
        F: FnMut(&[B::Tensor]) -> R,
        R: Into<Outputs<B::Tensor>>,
    {
        self.try_check(
            |inputs: &[B::Tensor]| Ok::<R, Infallible>(f(inputs)),
            pattern,
            constraints,
        )
    }

    /// Fallible counterpart of [`check`](Self::check).
    pub fn try_check<F, R, E>(&self, mut f: F, pattern: &Pattern, constraints: &Constraints) -> Result<()>
    where
        F: FnMut(&[B::Tensor]) -> std::result::Result<R, E>,
        R: Into<Outputs<B::Tensor>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        debug!(
            pattern = %pattern,
            depth = self.config.depth,
            backend = self.backend.name(),
            "checking dimensions"
        );
        let mut rng = self.rng();

        for trial in 0..self.config.depth {
            let vars = assign_variables(pattern.in_formula(), constraints, self.config.max_size, &mut rng)?;
            debug!(trial, vars = ?vars, "assigned variables");

            let inputs = pattern
                .in_formula()
                .iter()
                .map(|formula| {
                    let shape = formula.shape(&vars)?;
                    self.backend.build(&shape, self.config.fill, &mut rng)
                })
                .collect::<Result<Vec<_>>>()?;

            let outputs: Outputs<B::Tensor> = f(&inputs)
                .map_err(|e| DimCheckError::Callable(e.into()))?
                .into();
            self.check_outputs(&outputs, pattern.out_formula(), &vars)?;
        }
        Ok(())
    }

    fn check_outputs(
        &self,
        outputs: &Outputs<B::Tensor>,
        out_formula: &Formula,
        vars: &BTreeMap<char, i64>,
    ) -> Result<()> {
        if outputs.len() != out_formula.len() {
            return Err(DimCheckError::OutputArity {
                expected: out_formula.len(),
                actual: outputs.len(),
            });
        }

        for (output, (tensor, formula)) in outputs.iter().zip(out_formula).enumerate() {
            trace!(output, formula = %formula, shape = ?tensor.shape(), "checking output");
            if tensor.rank() != formula.rank() {
                return Err(DimCheckError::RankMismatch {
                    output,
                    formula: formula.to_string(),
                    expected: formula.rank(),
                    actual: tensor.rank(),
                });
            }

            for (axis, (dim, &actual)) in formula.dims().iter().zip(tensor.shape()).enumerate() {
                let expected = match dim.as_var() {
                    Some(var) if !vars.contains_key(&var) => {
                        if self.config.strict {
                            return Err(DimCheckError::UnboundOutputVariable { output, axis, var });
                        }
                        debug!(output, axis, var = %var, "skipping unbound output variable");
                        continue;
                    }
                    _ => dim.evaluate(vars)?,
                };
                if i64::try_from(actual).ok() != Some(expected) {
                    return Err(DimCheckError::ShapeMismatch {
                        output,
                        axis,
                        dim: dim.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<B: Backend> fmt::Display for DimChecker<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DimChecker(backend={}, {})", self.backend.name(), self.config)
    }
}
