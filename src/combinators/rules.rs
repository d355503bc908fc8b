//! Running several validators against one value

use std::sync::Arc;

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Runs every wrapped validator and concatenates their messages in order.
///
/// Wraps a tuple of up to eight validators, or a `Vec` of erased validators
/// built at runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rules<R>(pub R);

/// Combine validators of the same input type.
///
/// Every validator runs, even after an earlier one has failed.
///
/// # Example
///
/// ```rust
/// use composable_validation::prelude::*;
/// use composable_validation::validators::{max_length, min_length};
///
/// let name = rules((max_length(5), min_length(3)));
///
/// assert_eq!(name.validate("ab"), vec!["Must be at least 3 characters"]);
/// assert!(name.validate("abcd").is_empty());
/// ```
pub fn rules<R>(validators: R) -> Rules<R> {
    Rules(validators)
}

/// Build [`Rules`] from a list of validators.
///
/// ```rust
/// use composable_validation::{rules, ValueValidator};
/// use composable_validation::validators::{min_length, valid_email};
///
/// let email = rules![min_length(6), valid_email()];
/// assert_eq!(email.validate("a@b").len(), 1);
/// ```
#[macro_export]
macro_rules! rules {
    ($($validator:expr),+ $(,)?) => {
        $crate::combinators::rules(($($validator,)+))
    };
}

macro_rules! impl_rules_tuple {
    ($($V:ident),+) => {
        impl<T: ?Sized, $($V: ValueValidator<T>),+> ValueValidator<T> for Rules<($($V,)+)> {
            #[allow(non_snake_case)]
            fn validate(&self, value: &T) -> ValidationErrors {
                let ($($V,)+) = &self.0;
                let mut errors = Vec::new();
                $( errors.extend($V.validate(value)); )+
                errors
            }
        }
    };
}

impl_rules_tuple!(V1);
impl_rules_tuple!(V1, V2);
impl_rules_tuple!(V1, V2, V3);
impl_rules_tuple!(V1, V2, V3, V4);
impl_rules_tuple!(V1, V2, V3, V4, V5);
impl_rules_tuple!(V1, V2, V3, V4, V5, V6);
impl_rules_tuple!(V1, V2, V3, V4, V5, V6, V7);
impl_rules_tuple!(V1, V2, V3, V4, V5, V6, V7, V8);

impl<T: ?Sized> ValueValidator<T> for Rules<Vec<Arc<dyn ValueValidator<T>>>> {
    fn validate(&self, value: &T) -> ValidationErrors {
        self.0
            .iter()
            .flat_map(|validator| validator.validate(value))
            .collect()
    }
}
