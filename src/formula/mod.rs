//! Pattern grammar.
//!
//! A pattern is written `inputs -> outputs`. Each side is a comma-separated
//! list of vector formulas, one per tensor. A vector formula lists one entry
//! per axis: a single letter names a dimension variable, a parenthesised
//! group such as `(2*c+1)` is an arithmetic expression over those variables.
//! Whitespace is ignored everywhere.
//!
//! ```
//! use dimcheck::formula::Pattern;
//!
//! let pattern: Pattern = "bcl, bcl -> b(2*c)l".parse().unwrap();
//! assert_eq!(pattern.in_formula().len(), 2);
//! assert_eq!(pattern.out_formula().vectors()[0].rank(), 3);
//! ```

mod group;
mod pattern;
mod vector;

pub use group::Formula;
pub use pattern::Pattern;
pub use vector::{DimExpr, VectorFormula};
