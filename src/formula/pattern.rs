//! Full `inputs -> outputs` patterns.

use super::group::Formula;
use crate::error::{DimCheckError, Result};
use std::fmt;
use std::str::FromStr;

const ARROW: &str = "->";

/// A parsed pattern such as `"bcl, bcl -> bcl"`: the formula the inputs are
/// built from and the formula the outputs are checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    in_formula: Formula,
    out_formula: Formula,
}

impl Pattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Fails with [`DimCheckError::PatternArity`] unless the text contains
    /// exactly one arrow with a non-empty formula on each side. Errors from
    /// the formulas themselves propagate unchanged.
    pub fn parse(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let halves: Vec<&str> = compact.split(ARROW).collect();

        let (input, output) = match halves.as_slice() {
            [input, output] if !input.is_empty() && !output.is_empty() => (*input, *output),
            // with a single arrow, count the sides that actually hold a formula
            [input, output] => {
                return Err(DimCheckError::PatternArity {
                    pattern: text.to_string(),
                    found: usize::from(!input.is_empty()) + usize::from(!output.is_empty()),
                })
            }
            _ => {
                return Err(DimCheckError::PatternArity {
                    pattern: text.to_string(),
                    found: halves.len(),
                })
            }
        };

        Ok(Self {
            in_formula: Formula::parse(input)?,
            out_formula: Formula::parse(output)?,
            source: compact,
        })
    }

    /// The formula describing the callable's positional arguments.
    pub fn in_formula(&self) -> &Formula {
        &self.in_formula
    }

    /// The formula describing the callable's return values.
    pub fn out_formula(&self) -> &Formula {
        &self.out_formula
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Pattern {
    type Err = DimCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.in_formula, ARROW, self.out_formula)
    }
}
