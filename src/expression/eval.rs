//! Evaluation of dimension expressions.

use super::{BinaryOp, Builtin, Expr, UnaryOp, Variables};
use crate::error::{DimCheckError, Result};

/// Parses and evaluates `source` against `vars`.
///
/// # Errors
///
/// Returns [`DimCheckError::InvalidExpression`] if `source` is not a valid
/// expression, [`DimCheckError::UndefinedVariable`] if it names a variable
/// `vars` does not bind, and [`DimCheckError::ArithmeticOverflow`] if an
/// intermediate result does not fit in an `i64`.
pub fn evaluate<V: Variables + ?Sized>(source: &str, vars: &V) -> Result<i64> {
    let expr = Expr::parse(source)?;
    expr.eval_with_source(source, vars)
}

impl Expr {
    /// Evaluates the expression against `vars`.
    pub fn eval<V: Variables + ?Sized>(&self, vars: &V) -> Result<i64> {
        let source = self.to_string();
        self.eval_with_source(&source, vars)
    }

    /// Evaluates the expression, reporting errors against `source`.
    pub(crate) fn eval_with_source<V: Variables + ?Sized>(&self, source: &str, vars: &V) -> Result<i64> {
        Evaluator { source, vars }.eval(self)
    }
}

struct Evaluator<'a, V: ?Sized> {
    source: &'a str,
    vars: &'a V,
}

impl<'a, V: Variables + ?Sized> Evaluator<'a, V> {
    fn eval(&self, expr: &Expr) -> Result<i64> {
        match expr {
            Expr::Int(value) => Ok(*value),
            Expr::Var(name) => self.lookup(name),
            Expr::Unary(UnaryOp::Pos, operand) => self.eval(operand),
            Expr::Unary(UnaryOp::Neg, operand) => {
                let value = self.eval(operand)?;
                value.checked_neg().ok_or_else(|| self.overflow())
            }
            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                let result = match op {
                    BinaryOp::Add => lhs.checked_add(rhs),
                    BinaryOp::Sub => lhs.checked_sub(rhs),
                    BinaryOp::Mul => lhs.checked_mul(rhs),
                };
                result.ok_or_else(|| self.overflow())
            }
            Expr::Call(builtin, args) => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.call(*builtin, &values)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<i64> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => self
                .vars
                .lookup(letter)
                .ok_or_else(|| DimCheckError::undefined_variable(self.source, name)),
            // variables are single letters, so a longer name can never be bound
            _ => Err(DimCheckError::undefined_variable(self.source, name)),
        }
    }

    fn call(&self, builtin: Builtin, values: &[i64]) -> Result<i64> {
        let result = match builtin {
            Builtin::Min => values.iter().copied().min(),
            Builtin::Max => values.iter().copied().max(),
            Builtin::Abs => match values {
                [value] => Some(value.checked_abs().ok_or_else(|| self.overflow())?),
                _ => None,
            },
        };
        result.ok_or_else(|| {
            DimCheckError::invalid_expression(
                self.source,
                format!("function '{}' called with {} argument(s)", builtin.name(), values.len()),
            )
        })
    }

    fn overflow(&self) -> DimCheckError {
        DimCheckError::ArithmeticOverflow(self.source.to_string())
    }
}
