//! One side of a pattern: the shape formulas of several tensors.

use super::vector::VectorFormula;
use crate::error::{DimCheckError, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An ordered group of [`VectorFormula`]s, one per positional argument or
/// returned tensor, written comma-separated (`"bcl, bcl"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    vectors: Vec<VectorFormula>,
}

impl Formula {
    /// Parses a comma-separated group of vector formulas.
    ///
    /// Whitespace is removed first. Empty segments (`"a,,b"`, a trailing comma)
    /// are dropped. Commas nested inside parentheses belong to the expression
    /// and do not split.
    pub fn parse(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let vectors = split_top_level(&compact)
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(VectorFormula::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: compact,
            vectors,
        })
    }

    pub fn vectors(&self) -> &[VectorFormula] {
        &self.vectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VectorFormula> {
        self.vectors.iter()
    }

    /// Number of tensors described.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Union of the variables of every vector formula.
    pub fn variables(&self) -> BTreeSet<char> {
        self.vectors
            .iter()
            .flat_map(|vf| vf.variables().iter().copied())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0i64;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a VectorFormula;
    type IntoIter = std::slice::Iter<'a, VectorFormula>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}

impl FromStr for Formula {
    type Err = DimCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
