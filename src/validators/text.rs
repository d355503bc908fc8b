//! Text validators
//!
//! Lengths are counted in characters, not bytes.

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Implements `ValueValidator<String>` by delegating to the `str` impl.
macro_rules! impl_for_string {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ValueValidator<String> for $ty {
                #[inline]
                fn validate(&self, value: &String) -> ValidationErrors {
                    ValueValidator::<str>::validate(self, value.as_str())
                }
            }
        )+
    };
}

/// Rejects text shorter than a minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinLength {
    min: usize,
}

impl ValueValidator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationErrors {
        if value.chars().count() < self.min {
            vec![format!("Must be at least {} characters", self.min)]
        } else {
            Vec::new()
        }
    }
}

/// Require at least `min` characters.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::min_length;
///
/// assert_eq!(min_length(3).validate("ab"), vec!["Must be at least 3 characters"]);
/// assert!(min_length(3).validate("abc").is_empty());
/// ```
pub fn min_length(min: usize) -> MinLength {
    MinLength { min }
}

/// Rejects text longer than a maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxLength {
    max: usize,
}

impl ValueValidator<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationErrors {
        if value.chars().count() > self.max {
            vec![format!("Must be less than {} characters", self.max)]
        } else {
            Vec::new()
        }
    }
}

/// Allow at most `max` characters.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::max_length;
///
/// assert!(max_length(5).validate("12345").is_empty());
/// assert_eq!(max_length(5).validate("123456"), vec!["Must be less than 5 characters"]);
/// ```
pub fn max_length(max: usize) -> MaxLength {
    MaxLength { max }
}

/// Checks the shape `local@domain`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidEmail;

impl ValueValidator<str> for ValidEmail {
    fn validate(&self, value: &str) -> ValidationErrors {
        let mut parts = value.split('@');
        let well_formed = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
            _ => false,
        };

        if well_formed {
            Vec::new()
        } else {
            vec!["Please enter a valid email".to_string()]
        }
    }
}

/// Require exactly one `@` with text on both sides.
///
/// This is a shape check, not full address validation.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::valid_email;
///
/// assert!(valid_email().validate("person@example.com").is_empty());
/// assert_eq!(valid_email().validate("Example Text Here"), vec!["Please enter a valid email"]);
/// ```
pub fn valid_email() -> ValidEmail {
    ValidEmail
}

impl_for_string!(MinLength, MaxLength, ValidEmail);

/// Runs the wrapped validator on the text with surrounding whitespace removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trimmed<V>(pub V);

impl<V: ValueValidator<str>> ValueValidator<str> for Trimmed<V> {
    #[inline]
    fn validate(&self, value: &str) -> ValidationErrors {
        self.0.validate(value.trim())
    }
}

impl<V: ValueValidator<str>> ValueValidator<String> for Trimmed<V> {
    #[inline]
    fn validate(&self, value: &String) -> ValidationErrors {
        self.0.validate(value.trim())
    }
}

/// Validate the trimmed text.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::{min_length, trimmed};
///
/// assert!(!trimmed(min_length(3)).validate(" 12").is_empty());
/// assert!(trimmed(min_length(3)).validate(" 123 ").is_empty());
/// ```
pub fn trimmed<V: ValueValidator<str>>(validator: V) -> Trimmed<V> {
    Trimmed(validator)
}
