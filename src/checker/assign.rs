//! Prime substitution for free variables.
//!
//! Distinct letters get distinct primes so that two unrelated axes never
//! share an extent by accident, which would hide a swapped or transposed
//! dimension.

use crate::{
    constraints::Constraints,
    error::{DimCheckError, Result},
    formula::Formula,
};
use rand::{seq::SliceRandom, RngCore};
use std::collections::BTreeMap;

/// Values drawn for unconstrained variables.
pub const PRIMES: [i64; 23] = [
    5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// The primes strictly below `max_size`.
pub fn available_primes(max_size: usize) -> Vec<i64> {
    PRIMES
        .iter()
        .copied()
        .take_while(|&p| usize::try_from(p).map_or(false, |p| p < max_size))
        .collect()
}

/// Binds every variable of `in_formula`.
///
/// Unconstrained letters receive distinct primes below `max_size`, drawn
/// without replacement. Constraints are applied last and may bind letters
/// that never appear on the input side.
///
/// # Errors
///
/// Fails with [`DimCheckError::InsufficientPrimes`] if there are more free
/// letters than primes below `max_size`.
pub fn assign_variables(
    in_formula: &Formula,
    constraints: &Constraints,
    max_size: usize,
    rng: &mut dyn RngCore,
) -> Result<BTreeMap<char, i64>> {
    let free: Vec<char> = in_formula
        .variables()
        .into_iter()
        .filter(|var| !constraints.contains(*var))
        .collect();

    let mut pool = available_primes(max_size);
    if pool.len() < free.len() {
        return Err(DimCheckError::InsufficientPrimes {
            needed: free.len(),
            available: pool.len(),
            max_size,
        });
    }
    pool.shuffle(rng);

    let mut vars: BTreeMap<char, i64> = free.into_iter().zip(pool).collect();
    vars.extend(constraints.iter());
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintValue;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;

    #[test]
    fn test_available_primes() {
        assert_eq!(available_primes(12), vec![5, 7, 11]);
        assert_eq!(available_primes(11), vec![5, 7]);
        assert!(available_primes(5).is_empty());
        assert_eq!(available_primes(1000).len(), PRIMES.len());
    }

    #[test]
    fn test_distinct_primes_for_free_letters() {
        let formula = Formula::parse("bcl,lk").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let vars = assign_variables(&formula, &Constraints::new(), 100, &mut rng).unwrap();

        assert_eq!(vars.keys().copied().collect::<String>(), "bckl");
        let values: BTreeSet<i64> = vars.values().copied().collect();
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| PRIMES.contains(v)));
    }

    #[test]
    fn test_constraints_overlay() {
        let formula = Formula::parse("bcl").unwrap();
        let constraints = Constraints::validate(&[
            ("l", ConstraintValue::from(4)),
            ("n", ConstraintValue::from(1)),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        // two free letters fit below 10 since `l` is constrained
        let vars = assign_variables(&formula, &constraints, 10, &mut rng).unwrap();

        assert_eq!(vars[&'l'], 4);
        assert_eq!(vars[&'n'], 1);
        let mut drawn = vec![vars[&'b'], vars[&'c']];
        drawn.sort();
        assert_eq!(drawn, vec![5, 7]);
    }

    #[test]
    fn test_insufficient_primes() {
        let formula = Formula::parse("abc").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            assign_variables(&formula, &Constraints::new(), 10, &mut rng),
            Err(DimCheckError::InsufficientPrimes {
                needed: 3,
                available: 2,
                max_size: 10
            })
        ));
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let formula = Formula::parse("abcdef").unwrap();
        let a = assign_variables(&formula, &Constraints::new(), 100, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = assign_variables(&formula, &Constraints::new(), 100, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
