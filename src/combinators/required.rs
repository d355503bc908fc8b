//! Presence-enforcing combinator

use crate::presence::{Blank, BlankPolicy, Presence};
use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Message used by [`required`] when no other message is given.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Please complete this field";

/// A validator that accepts every value.
///
/// The default inner validator of [`Required`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Valid;

impl<T: ?Sized> ValueValidator<T> for Valid {
    #[inline]
    fn validate(&self, _value: &T) -> ValidationErrors {
        Vec::new()
    }
}

/// Rejects absent or blank values with a fixed message, then delegates to the
/// wrapped validator.
///
/// Accepts any [`Presence`] input: `Option<T>` is absent when `None`, and the
/// present value is checked against the [`BlankPolicy`] before the wrapped
/// validator runs. The wrapped validator's messages are returned unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Required<V = Valid> {
    message: String,
    policy: BlankPolicy,
    inner: V,
}

/// Require a value, reporting `"Please complete this field"` when missing.
///
/// # Example
///
/// ```rust
/// use composable_validation::prelude::*;
///
/// assert_eq!(required().validate(&None::<String>), vec!["Please complete this field"]);
/// assert_eq!(required().validate(&Some(String::new())), vec!["Please complete this field"]);
/// assert!(required().validate(&Some("a".to_string())).is_empty());
/// ```
pub fn required() -> Required {
    Required::new(DEFAULT_REQUIRED_MESSAGE)
}

/// Require a value, reporting `message` when missing.
///
/// # Example
///
/// ```rust
/// use composable_validation::prelude::*;
/// use composable_validation::validators::min_length;
///
/// let name = required_with_message("Missing text!").with(min_length(5));
/// assert_eq!(name.validate(&None::<String>)[0], "Missing text!");
/// ```
pub fn required_with_message(message: impl Into<String>) -> Required {
    Required::new(message)
}

impl Required {
    /// Require a value, reporting `message` when missing.
    pub fn new(message: impl Into<String>) -> Self {
        Required {
            message: message.into(),
            policy: BlankPolicy::default(),
            inner: Valid,
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        required()
    }
}

impl<V> Required<V> {
    /// Delegate present values to `validator`, keeping the message and policy.
    pub fn with<W>(self, validator: W) -> Required<W> {
        Required {
            message: self.message,
            policy: self.policy,
            inner: validator,
        }
    }

    /// Replace the blank policy.
    ///
    /// ```rust
    /// use composable_validation::prelude::*;
    ///
    /// let tags = required().policy(BlankPolicy::strict());
    /// assert!(!tags.validate(&Vec::<String>::new()).is_empty());
    /// ```
    pub fn policy(mut self, policy: BlankPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The message reported for missing values.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The active blank policy.
    pub fn blank_policy(&self) -> &BlankPolicy {
        &self.policy
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// The missing-value message when `value` is absent or blank, `None` when
    /// it is present.
    pub fn missing<P>(&self, value: &P) -> Option<ValidationErrors>
    where
        P: Presence + ?Sized,
        P::Value: Blank,
    {
        match value.present() {
            Some(present) if !present.is_blank(&self.policy) => None,
            _ => Some(vec![self.message.clone()]),
        }
    }
}

impl<P, V> ValueValidator<P> for Required<V>
where
    P: Presence + ?Sized,
    P::Value: Blank,
    V: ValueValidator<P::Value>,
{
    fn validate(&self, value: &P) -> ValidationErrors {
        match value.present() {
            Some(present) if !present.is_blank(&self.policy) => self.inner.validate(present),
            _ => vec![self.message.clone()],
        }
    }
}
