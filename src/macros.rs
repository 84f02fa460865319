//! Convenience macros.

/// Builds the named constraints accepted by
/// [`DimChecker::test_dims`](crate::DimChecker::test_dims).
///
/// Each `name = value` pair fixes the letter `name`. Values go through
/// [`ConstraintValue::from`](crate::ConstraintValue), so non-integer values
/// compile and are rejected when the checker validates them.
///
/// # Examples
/// ```
/// use dimcheck::{constraints, ConstraintValue, Constraints};
///
/// let raw = constraints![n = 1, m = 2];
/// assert_eq!(raw[0], ("n", ConstraintValue::Int(1)));
///
/// let validated = Constraints::validate(raw).unwrap();
/// assert_eq!(validated.get('m'), Some(2));
///
/// assert!(Constraints::validate(constraints![n = 1.5]).is_err());
/// assert!(constraints![].is_empty());
/// ```
#[macro_export]
macro_rules! constraints {
    () => {
        &[] as &[(&str, $crate::ConstraintValue)]
    };
    ($($name:ident = $value:expr),+ $(,)?) => {
        &[$((::core::stringify!($name), $crate::ConstraintValue::from($value))),+]
    };
}
