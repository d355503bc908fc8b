//! Accepting absent values

use crate::presence::Presence;
use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Passes absent values, delegates present ones.
///
/// Unlike [`Required`](super::Required), blank values are present and reach the
/// wrapped validator: `optional(min_length(3))` rejects `Some("")`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Optional<V> {
    inner: V,
}

impl<V> Optional<V> {
    /// Wrap `validator`.
    pub fn new(validator: V) -> Self {
        Optional { inner: validator }
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

/// Validate a value only when it is present.
///
/// # Example
///
/// ```rust
/// use composable_validation::prelude::*;
/// use composable_validation::validators::min_length;
///
/// let nickname = optional(min_length(3));
/// assert!(nickname.validate(&None::<String>).is_empty());
/// assert!(!nickname.validate(&Some("ab".to_string())).is_empty());
/// ```
pub fn optional<V>(validator: V) -> Optional<V> {
    Optional::new(validator)
}

impl<P, V> ValueValidator<P> for Optional<V>
where
    P: Presence + ?Sized,
    V: ValueValidator<P::Value>,
{
    fn validate(&self, value: &P) -> ValidationErrors {
        match value.present() {
            Some(present) => self.inner.validate(present),
            None => Vec::new(),
        }
    }
}
