use thiserror::Error;

/// Errors raised while parsing patterns, validating constraints, building
/// inputs or checking the shapes a callable returns.
#[derive(Error, Debug)]
pub enum DimCheckError {
    #[error("Pattern \"{pattern}\" must have exactly two non-empty formulas separated by \"->\", found {found}")]
    PatternArity { pattern: String, found: usize },
    #[error("The formula \"{0}\" has an empty parenthesis")]
    EmptyParenthesis(String),
    #[error("The formula \"{0}\" has an unclosed or unmatched parenthesis")]
    UnclosedParenthesis(String),
    #[error("The character '{character}' is not valid in formula \"{formula}\", must be a letter")]
    InvalidCharacter { formula: String, character: char },
    #[error("Invalid expression \"{expr}\": {reason}")]
    InvalidExpression { expr: String, reason: String },
    #[error("Undefined variable '{name}' in expression \"{expr}\"")]
    UndefinedVariable { expr: String, name: String },
    #[error("Arithmetic overflow while evaluating \"{0}\"")]
    ArithmeticOverflow(String),
    #[error("The constraint dimension \"{0}\" must be a single letter")]
    ConstraintKey(String),
    #[error("The constraint \"{key}={value}\" must have a non-negative integer value")]
    ConstraintType { key: String, value: String },
    #[error("Not enough primes below {max_size} to test each dimension: need {needed}, have {available}")]
    InsufficientPrimes {
        needed: usize,
        available: usize,
        max_size: usize,
    },
    #[error("Dimension \"{dim}\" evaluated to {value}, input dimensions cannot be negative")]
    NegativeDimension { dim: String, value: i64 },
    #[error("Shape {0:?} has more elements than can be addressed")]
    ShapeTooLarge(Vec<usize>),
    #[error("Got {actual} output(s), expected {expected} output(s) according to the pattern")]
    OutputArity { expected: usize, actual: usize },
    #[error("Output {output} does not have the expected number of dimensions for \"{formula}\": expected {expected}, got {actual}")]
    RankMismatch {
        output: usize,
        formula: String,
        expected: usize,
        actual: usize,
    },
    #[error("Unexpected shape for output {output} at axis {axis}: dimension \"{dim}\" expects {expected}, got {actual}")]
    ShapeMismatch {
        output: usize,
        axis: usize,
        dim: String,
        expected: i64,
        actual: usize,
    },
    #[error("Output {output} uses variable '{var}' at axis {axis}, which is bound neither by the inputs nor by a constraint")]
    UnboundOutputVariable { output: usize, axis: usize, var: char },
    #[error("Unknown fill \"{0}\", must be either 'random', 'zeros', 'ones' or a number")]
    UnknownFill(String),
    #[error("Fill value {0} cannot be represented by the tensor element type")]
    UnrepresentableFill(f64),
    #[error("Callable failed: {0}")]
    Callable(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Invalid axis: {axis} for tensor of dimension {ndim}")]
    InvalidAxis { axis: usize, ndim: usize },
    #[error("Incompatible shapes for operation: {0:?} and {1:?}")]
    IncompatibleShapes(Vec<usize>, Vec<usize>),
    #[error("Invalid slice: {start}..{end} for dimension of size {size}")]
    InvalidSlice { start: usize, end: usize, size: usize },
    #[error("Shape {shape:?} requires {expected} elements, storage holds {actual}")]
    ShapeSize {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DimCheckError {
    pub fn invalid_expression(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        DimCheckError::InvalidExpression {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    pub fn undefined_variable(expr: impl Into<String>, name: impl Into<String>) -> Self {
        DimCheckError::UndefinedVariable {
            expr: expr.into(),
            name: name.into(),
        }
    }

    pub fn incompatible_shapes(a: &[usize], b: &[usize]) -> Self {
        DimCheckError::IncompatibleShapes(a.to_vec(), b.to_vec())
    }

    pub fn invalid_axis(axis: usize, ndim: usize) -> Self {
        DimCheckError::InvalidAxis { axis, ndim }
    }
}

pub type Result<T> = std::result::Result<T, DimCheckError>;
