//! Shape formula of a single tensor.

use crate::dimension::element_count;
use crate::error::{DimCheckError, Result};
use crate::expression::{Expr, Variables};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One axis of a [`VectorFormula`]: either a bare variable letter or a
/// parenthesised arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimExpr {
    Var(char),
    Expr { source: String, expr: Expr },
}

impl DimExpr {
    /// Returns the variable letter if this axis is a bare variable.
    pub fn as_var(&self) -> Option<char> {
        match self {
            DimExpr::Var(c) => Some(*c),
            DimExpr::Expr { .. } => None,
        }
    }

    /// Evaluates the axis extent under `vars`.
    pub fn evaluate<V: Variables + ?Sized>(&self, vars: &V) -> Result<i64> {
        match self {
            DimExpr::Var(c) => vars
                .lookup(*c)
                .ok_or_else(|| DimCheckError::undefined_variable(c.to_string(), c.to_string())),
            DimExpr::Expr { source, expr } => expr.eval_with_source(source, vars),
        }
    }
}

impl fmt::Display for DimExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimExpr::Var(c) => write!(f, "{}", c),
            DimExpr::Expr { source, .. } => f.write_str(source),
        }
    }
}

/// The shape contract of one tensor, e.g. `b(2*c+1)l`.
///
/// `dims` keeps one entry per axis in order; `variables` holds every letter
/// that appears anywhere in the formula, including inside expressions, but
/// not the names of builtin functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorFormula {
    source: String,
    dims: Vec<DimExpr>,
    variables: BTreeSet<char>,
}

impl VectorFormula {
    /// Parses a vector formula. The text must already be free of whitespace.
    ///
    /// # Errors
    ///
    /// * [`DimCheckError::EmptyParenthesis`] for `()`.
    /// * [`DimCheckError::UnclosedParenthesis`] for an unmatched `(` or `)`.
    /// * [`DimCheckError::InvalidCharacter`] for anything but a letter outside
    ///   parentheses.
    /// * [`DimCheckError::InvalidExpression`] if a parenthesised group is not a
    ///   valid expression.
    pub fn parse(text: &str) -> Result<Self> {
        let mut dims = Vec::new();
        let mut variables = BTreeSet::new();
        let mut depth = 0usize;
        let mut buffer = String::new();

        for c in text.chars() {
            match c {
                '(' => {
                    buffer.push(c);
                    depth += 1;
                }
                ')' => {
                    if depth == 0 {
                        return Err(DimCheckError::UnclosedParenthesis(text.to_string()));
                    }
                    if buffer.ends_with('(') {
                        return Err(DimCheckError::EmptyParenthesis(text.to_string()));
                    }
                    depth -= 1;
                    buffer.push(c);
                    if depth == 0 {
                        let source = std::mem::take(&mut buffer);
                        let expr = Expr::parse(&source)?;
                        expr.collect_letters(&mut variables);
                        dims.push(DimExpr::Expr { source, expr });
                    }
                }
                _ if depth > 0 => buffer.push(c),
                _ if c.is_alphabetic() => {
                    dims.push(DimExpr::Var(c));
                    variables.insert(c);
                }
                _ => {
                    return Err(DimCheckError::InvalidCharacter {
                        formula: text.to_string(),
                        character: c,
                    })
                }
            }
        }

        if depth != 0 {
            return Err(DimCheckError::UnclosedParenthesis(text.to_string()));
        }

        Ok(Self {
            source: text.to_string(),
            dims,
            variables,
        })
    }

    /// The axis expressions in order.
    pub fn dims(&self) -> &[DimExpr] {
        &self.dims
    }

    /// Every variable letter referenced by the formula.
    pub fn variables(&self) -> &BTreeSet<char> {
        &self.variables
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluates every axis under `vars`, yielding a concrete shape.
    ///
    /// # Errors
    ///
    /// Fails with [`DimCheckError::NegativeDimension`] if an axis evaluates
    /// below zero and with [`DimCheckError::ShapeTooLarge`] if the element
    /// count of the shape overflows `usize`.
    pub fn shape<V: Variables + ?Sized>(&self, vars: &V) -> Result<Vec<usize>> {
        let shape = self
            .dims
            .iter()
            .map(|dim| {
                let value = dim.evaluate(vars)?;
                if value < 0 {
                    return Err(DimCheckError::NegativeDimension {
                        dim: dim.to_string(),
                        value,
                    });
                }
                usize::try_from(value).map_err(|_| DimCheckError::ArithmeticOverflow(dim.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        element_count(&shape)?;
        Ok(shape)
    }
}

impl FromStr for VectorFormula {
    type Err = DimCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VectorFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_mixed_formula() {
        let vf = VectorFormula::parse("b(2*c+1)l").unwrap();
        let dims: Vec<String> = vf.dims().iter().map(|d| d.to_string()).collect();
        assert_eq!(dims, vec!["b", "(2*c+1)", "l"]);
        assert_eq!(vf.variables().iter().collect::<String>(), "bcl");
        assert_eq!(vf.rank(), 3);
    }

    #[test]
    fn test_dims_are_not_deduplicated() {
        let vf = VectorFormula::parse("nn(n)").unwrap();
        assert_eq!(vf.rank(), 3);
        assert_eq!(vf.variables().len(), 1);
    }

    #[test]
    fn test_builtin_names_are_not_variables() {
        let vf = VectorFormula::parse("(max(a,2))b").unwrap();
        assert_eq!(vf.variables().iter().collect::<String>(), "ab");
        assert_eq!(vf.rank(), 2);
    }

    #[test]
    fn test_nested_parentheses() {
        let vf = VectorFormula::parse("((a+1)*(b-1))c").unwrap();
        assert_eq!(vf.dims()[0].to_string(), "((a+1)*(b-1))");
        assert_eq!(vf.dims()[1].as_var(), Some('c'));
    }

    #[test]
    fn test_parenthesis_errors() {
        assert!(matches!(
            VectorFormula::parse("b()"),
            Err(DimCheckError::EmptyParenthesis(_))
        ));
        assert!(matches!(
            VectorFormula::parse("b(a())"),
            Err(DimCheckError::EmptyParenthesis(_))
        ));
        assert!(matches!(
            VectorFormula::parse("b(c+1"),
            Err(DimCheckError::UnclosedParenthesis(_))
        ));
        assert!(matches!(
            VectorFormula::parse("bc)"),
            Err(DimCheckError::UnclosedParenthesis(_))
        ));
        assert!(matches!(
            VectorFormula::parse("a)b("),
            Err(DimCheckError::UnclosedParenthesis(_))
        ));
    }

    #[test]
    fn test_invalid_characters() {
        for (text, bad) in [("2c", '2'), ("b+c", '+'), ("b c", ' '), ("b_", '_')] {
            match VectorFormula::parse(text) {
                Err(DimCheckError::InvalidCharacter { character, .. }) => assert_eq!(character, bad),
                other => panic!("{}: unexpected result {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_invalid_expression_inside_parentheses() {
        assert!(matches!(
            VectorFormula::parse("b(2c)"),
            Err(DimCheckError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn test_shape() {
        let vf = VectorFormula::parse("b(2*c+1)(c-b)").unwrap();
        let vars: BTreeMap<char, i64> = [('b', 5), ('c', 7)].into_iter().collect();
        assert_eq!(vf.shape(&vars).unwrap(), vec![5, 15, 2]);

        let vars: BTreeMap<char, i64> = [('b', 11), ('c', 7)].into_iter().collect();
        assert!(matches!(
            vf.shape(&vars),
            Err(DimCheckError::NegativeDimension { value: -4, .. })
        ));
    }

    #[test]
    fn test_shape_too_large() {
        let vf = VectorFormula::parse("ab").unwrap();
        let vars: BTreeMap<char, i64> = [('a', i64::MAX), ('b', i64::MAX)].into_iter().collect();
        assert!(matches!(
            vf.shape(&vars),
            Err(DimCheckError::ShapeTooLarge(_) | DimCheckError::ArithmeticOverflow(_))
        ));

        let vars: BTreeMap<char, i64> = [('a', 1 << 20), ('b', 0)].into_iter().collect();
        assert_eq!(vf.shape(&vars).unwrap()[1], 0);
    }

    #[test]
    fn test_empty_formula_is_scalar() {
        let vf = VectorFormula::parse("").unwrap();
        assert_eq!(vf.rank(), 0);
        assert!(vf.variables().is_empty());
    }
}
