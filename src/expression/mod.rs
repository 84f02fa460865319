//! Dimension arithmetic.
//!
//! A parenthesised dimension such as `(2*c+1)` is an integer expression over
//! single-letter variables. This module parses such expressions into a small
//! closed tree and evaluates them against a variable binding. The tree can only
//! represent integer literals, variable names, unary `+`/`-`, binary `+ - *`
//! and calls to the builtins listed in [`Builtin`]; every other construct is
//! rejected by the parser, so evaluation never reaches anything else.

use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

pub mod eval;
pub mod lexer;
pub mod parser;

pub use eval::evaluate;
pub use parser::parse;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

/// Functions an expression may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Min,
    Max,
    Abs,
}

impl Builtin {
    /// Looks up an allowed function by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Builtin::Min),
            "max" => Some(Builtin::Max),
            "abs" => Some(Builtin::Abs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Abs => "abs",
        }
    }

    /// Returns `true` if the function can be called with `arity` arguments.
    pub fn accepts(&self, arity: usize) -> bool {
        match self {
            Builtin::Min | Builtin::Max => arity >= 2,
            Builtin::Abs => arity == 1,
        }
    }
}

/// A parsed dimension expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Int(i64),
    Var(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Builtin, Vec<Expr>),
}

impl Expr {
    /// Parses an expression from source text.
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse(source)
    }

    /// Collects the letters of every variable reference. Builtin names are
    /// not variables and are skipped.
    pub fn collect_letters(&self, letters: &mut BTreeSet<char>) {
        match self {
            Expr::Int(_) => {}
            Expr::Var(name) => letters.extend(name.chars()),
            Expr::Unary(_, operand) => operand.collect_letters(letters),
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_letters(letters);
                rhs.collect_letters(letters);
            }
            Expr::Call(_, args) => {
                for arg in args {
                    arg.collect_letters(letters);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Var(name) => f.write_str(name),
            Expr::Unary(UnaryOp::Pos, operand) => write!(f, "+{}", operand),
            Expr::Unary(UnaryOp::Neg, operand) => write!(f, "-{}", operand),
            Expr::Binary(op, lhs, rhs) => {
                let symbol = match op {
                    BinaryOp::Add => "+",
                    BinaryOp::Sub => "-",
                    BinaryOp::Mul => "*",
                };
                write!(f, "({}{}{})", lhs, symbol, rhs)
            }
            Expr::Call(builtin, args) => {
                write!(f, "{}(", builtin.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A binding from variable letters to integer values.
pub trait Variables {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: char) -> Option<i64>;
}

impl Variables for BTreeMap<char, i64> {
    fn lookup(&self, name: char) -> Option<i64> {
        self.get(&name).copied()
    }
}

impl Variables for HashMap<char, i64> {
    fn lookup(&self, name: char) -> Option<i64> {
        self.get(&name).copied()
    }
}

impl<V: Variables + ?Sized> Variables for &V {
    fn lookup(&self, name: char) -> Option<i64> {
        (**self).lookup(name)
    }
}
