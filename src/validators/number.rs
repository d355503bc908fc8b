//! Number validators
//!
//! Bounds are inclusive. Values that cannot be compared with the bound (such
//! as `NaN`) fail.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Rejects values below a bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinValue<N> {
    min: N,
}

impl<N> ValueValidator<N> for MinValue<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn validate(&self, value: &N) -> ValidationErrors {
        match value.partial_cmp(&self.min) {
            Some(Ordering::Equal | Ordering::Greater) => Vec::new(),
            _ => vec![format!("Value must be greater than or equal to {}", self.min)],
        }
    }
}

/// Require `value >= min`.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::min_value;
///
/// assert!(min_value(3).validate(&3).is_empty());
/// assert_eq!(min_value(3).validate(&1), vec!["Value must be greater than or equal to 3"]);
/// ```
pub fn min_value<N>(min: N) -> MinValue<N> {
    MinValue { min }
}

/// Rejects values above a bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxValue<N> {
    max: N,
}

impl<N> ValueValidator<N> for MaxValue<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn validate(&self, value: &N) -> ValidationErrors {
        match value.partial_cmp(&self.max) {
            Some(Ordering::Equal | Ordering::Less) => Vec::new(),
            _ => vec![format!("Value must be less than or equal to {}", self.max)],
        }
    }
}

/// Require `value <= max`.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::max_value;
///
/// assert!(max_value(5).validate(&5).is_empty());
/// assert!(!max_value(5).validate(&6).is_empty());
/// ```
pub fn max_value<N>(max: N) -> MaxValue<N> {
    MaxValue { max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(max_value(5).validate(&5).is_empty());
        assert!(!max_value(5).validate(&6).is_empty());
        assert!(min_value(3).validate(&3).is_empty());
        assert!(!min_value(3).validate(&1).is_empty());
    }

    #[test]
    fn floats_and_nan() {
        assert!(min_value(0.5).validate(&0.75).is_empty());
        assert!(!min_value(0.5).validate(&f64::NAN).is_empty());
        assert!(!max_value(0.5).validate(&f64::NAN).is_empty());
    }

    #[test]
    fn message_mentions_bound() {
        assert_eq!(
            max_value(10u8).validate(&11),
            vec!["Value must be less than or equal to 10"]
        );
    }
}
