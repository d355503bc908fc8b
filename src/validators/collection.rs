//! Collection validators

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Rejects collections with fewer items than a minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinItems {
    min: usize,
}

/// Rejects collections with more items than a maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxItems {
    max: usize,
}

impl MinItems {
    fn check(&self, len: usize) -> ValidationErrors {
        if len < self.min {
            vec![format!("Must be at least {}", self.min)]
        } else {
            Vec::new()
        }
    }
}

impl MaxItems {
    fn check(&self, len: usize) -> ValidationErrors {
        if len > self.max {
            vec![format!("Must be at most {}", self.max)]
        } else {
            Vec::new()
        }
    }
}

macro_rules! impl_for_sequences {
    ($($ty:ident),+) => {
        $(
            impl<T> ValueValidator<[T]> for $ty {
                #[inline]
                fn validate(&self, value: &[T]) -> ValidationErrors {
                    self.check(value.len())
                }
            }

            impl<T> ValueValidator<Vec<T>> for $ty {
                #[inline]
                fn validate(&self, value: &Vec<T>) -> ValidationErrors {
                    self.check(value.len())
                }
            }
        )+
    };
}

impl_for_sequences!(MinItems, MaxItems);

/// Require at least `min` items.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::min_items;
///
/// assert_eq!(min_items(3).validate(&vec![1, 2]), vec!["Must be at least 3"]);
/// assert!(min_items(3).validate(&vec![1, 2, 3]).is_empty());
/// ```
pub fn min_items(min: usize) -> MinItems {
    MinItems { min }
}

/// Allow at most `max` items.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::max_items;
///
/// assert!(max_items(5).validate(&vec![1, 2, 3, 4, 5]).is_empty());
/// assert_eq!(max_items(5).validate(&vec![1, 2, 3, 4, 5, 6]), vec!["Must be at most 5"]);
/// ```
pub fn max_items(max: usize) -> MaxItems {
    MaxItems { max }
}
