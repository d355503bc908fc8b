//! Conditional validation

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Decides whether a conditional validator runs.
///
/// Implemented for `bool`, fixed when the validator is built, and for any
/// `Fn(&T) -> bool`, checked against the value under validation on every
/// evaluation. Closures can capture whatever other context they need.
pub trait Condition<T: ?Sized>: Send + Sync {
    /// Whether the wrapped validator should run for `value`.
    fn holds(&self, value: &T) -> bool;
}

impl<T: ?Sized> Condition<T> for bool {
    #[inline]
    fn holds(&self, _value: &T) -> bool {
        *self
    }
}

impl<T: ?Sized, F> Condition<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn holds(&self, value: &T) -> bool {
        self(value)
    }
}

/// Runs the wrapped validator only when the condition holds.
#[derive(Clone, Copy, Debug)]
pub struct OnlyIf<C, V> {
    condition: C,
    inner: V,
}

impl<C, V> OnlyIf<C, V> {
    /// Guard `validator` with `condition`.
    pub fn new(condition: C, validator: V) -> Self {
        OnlyIf {
            condition,
            inner: validator,
        }
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

/// Validate only when `condition` holds.
///
/// # Example
///
/// ```rust
/// use composable_validation::prelude::*;
/// use composable_validation::validators::min_length;
///
/// let subscribe = true;
/// let email = only_if(subscribe, required().with(min_length(3)));
/// assert!(!email.validate(&None::<String>).is_empty());
///
/// let skipped = only_if(false, required());
/// assert!(skipped.validate(&None::<String>).is_empty());
/// ```
pub fn only_if<C, V>(condition: C, validator: V) -> OnlyIf<C, V> {
    OnlyIf::new(condition, validator)
}

impl<T, C, V> ValueValidator<T> for OnlyIf<C, V>
where
    T: ?Sized,
    C: Condition<T>,
    V: ValueValidator<T>,
{
    fn validate(&self, value: &T) -> ValidationErrors {
        if self.condition.holds(value) {
            self.inner.validate(value)
        } else {
            Vec::new()
        }
    }
}
