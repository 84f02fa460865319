//! Caller-fixed dimension values.

use crate::error::{DimCheckError, Result};
use crate::expression::Variables;
use std::collections::BTreeMap;
use std::fmt;

/// A raw constraint value as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintValue::Int(v) => write!(f, "{}", v),
            ConstraintValue::Float(v) => write!(f, "{:?}", v),
            ConstraintValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConstraintValue {
                fn from(value: $t) -> Self {
                    ConstraintValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Values outside `i64` keep their text so validation can report them.
macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConstraintValue {
                fn from(value: $t) -> Self {
                    i64::try_from(value)
                        .map(ConstraintValue::Int)
                        .unwrap_or_else(|_| ConstraintValue::Text(value.to_string()))
                }
            }
        )*
    };
}

impl_from_wide_int!(isize, u64, usize);

impl From<f32> for ConstraintValue {
    fn from(value: f32) -> Self {
        ConstraintValue::Float(f64::from(value))
    }
}

impl From<f64> for ConstraintValue {
    fn from(value: f64) -> Self {
        ConstraintValue::Float(value)
    }
}

impl From<&str> for ConstraintValue {
    fn from(value: &str) -> Self {
        ConstraintValue::Text(value.to_string())
    }
}

impl From<String> for ConstraintValue {
    fn from(value: String) -> Self {
        ConstraintValue::Text(value)
    }
}

/// Validated constraints: single-letter variables bound to fixed
/// non-negative integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    values: BTreeMap<char, i64>,
}

impl Constraints {
    /// Creates an empty set of constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw `(name, value)` pairs. A later pair for the same name
    /// replaces an earlier one.
    ///
    /// # Errors
    ///
    /// * [`DimCheckError::ConstraintKey`] if a name is not exactly one
    ///   alphabetic character.
    /// * [`DimCheckError::ConstraintType`] if a value is not a non-negative
    ///   integer.
    pub fn validate(raw: &[(&str, ConstraintValue)]) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => c,
                _ => return Err(DimCheckError::ConstraintKey(key.to_string())),
            };
            match value {
                ConstraintValue::Int(v) if *v >= 0 => {
                    values.insert(letter, *v);
                }
                other => {
                    return Err(DimCheckError::ConstraintType {
                        key: key.to_string(),
                        value: other.to_string(),
                    })
                }
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, var: char) -> Option<i64> {
        self.values.get(&var).copied()
    }

    pub fn contains(&self, var: char) -> bool {
        self.values.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, i64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl Variables for Constraints {
    fn lookup(&self, name: char) -> Option<i64> {
        self.get(name)
    }
}
