//! Testing utilities
//!
//! Helpers for tests of code that builds validators: a call-counting
//! [`SpyValidator`], assertion macros that work on both flat message lists and
//! [`ValidationResult`]s, and property-based testing support behind the
//! `proptest` feature.
//!
//! # Examples
//!
//! ## SpyValidator
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::testing::SpyValidator;
//!
//! let spy = SpyValidator::failing(["never shown"]);
//! let skipped = only_if(false, spy.clone());
//!
//! assert!(skipped.validate("anything").is_empty());
//! assert_eq!(spy.calls(), 0);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::validators::min_length;
//! use composable_validation::{assert_errors, assert_invalid, assert_valid};
//!
//! assert_valid!(min_length(3).validate("abc"));
//! assert_invalid!(min_length(3).validate("ab"));
//! assert_errors!(min_length(3).validate("ab"), ["Must be at least 3 characters"]);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::result::{ValidationErrors, ValidationResult};
use crate::validator::ValueValidator;

/// A validator that returns canned messages and counts its calls.
///
/// Clones share the counter, so keep one clone to inspect after handing the
/// other to a combinator.
#[derive(Debug, Clone)]
pub struct SpyValidator {
    errors: ValidationErrors,
    calls: Arc<AtomicUsize>,
}

impl SpyValidator {
    /// A spy that accepts every value.
    pub fn passing() -> Self {
        SpyValidator {
            errors: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A spy that rejects every value with `errors`.
    pub fn failing<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SpyValidator {
            errors: errors.into_iter().map(Into::into).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times any clone of this spy has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the shared counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl<T: ?Sized> ValueValidator<T> for SpyValidator {
    fn validate(&self, _value: &T) -> ValidationErrors {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.errors.clone()
    }
}

/// Anything the assertion macros can inspect.
pub trait Outcome: Debug {
    /// `true` when at least one message is present.
    fn failed(&self) -> bool;

    /// Messages at `path`; the empty path means the top level.
    fn messages_at(&self, path: &[&str]) -> &[String];
}

impl Outcome for ValidationErrors {
    fn failed(&self) -> bool {
        !self.is_empty()
    }

    fn messages_at(&self, path: &[&str]) -> &[String] {
        if path.is_empty() {
            self
        } else {
            &[]
        }
    }
}

impl Outcome for ValidationResult {
    fn failed(&self) -> bool {
        self.has_errors()
    }

    fn messages_at(&self, path: &[&str]) -> &[String] {
        self.errors_at(path.iter().copied())
    }
}

/// Assert that a validation produced no messages.
///
/// Accepts a [`ValidationErrors`] list or a [`ValidationResult`].
///
/// # Example
///
/// ```rust
/// use composable_validation::{assert_valid, ValidationResult};
///
/// assert_valid!(ValidationResult::default());
/// assert_valid!(Vec::<String>::new());
/// ```
#[macro_export]
macro_rules! assert_valid {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if $crate::testing::Outcome::failed(outcome) {
            panic!("Expected valid, got errors: {:?}", outcome);
        }
    }};
}

/// Assert that a validation produced at least one message.
///
/// # Example
///
/// ```rust
/// use composable_validation::{assert_invalid, ValidationResult};
///
/// assert_invalid!(ValidationResult::from(vec!["bad"]));
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if !$crate::testing::Outcome::failed(outcome) {
            panic!("Expected errors, got valid: {:?}", outcome);
        }
    }};
}

/// Assert the exact messages at the top level, or at a path of keys.
///
/// # Example
///
/// ```rust
/// use composable_validation::{assert_errors, ValidationResult};
///
/// let result = ValidationResult::object([
///     ("address", ValidationResult::object([
///         ("postcode", ValidationResult::from(vec!["Must be less than 5 characters"])),
///     ])),
/// ]);
///
/// assert_errors!(result, ["address", "postcode"] => ["Must be less than 5 characters"]);
/// assert_errors!(vec!["bad".to_string()], ["bad"]);
/// ```
#[macro_export]
macro_rules! assert_errors {
    ($outcome:expr, [$($key:expr),* $(,)?] => $expected:expr) => {{
        let outcome = &$outcome;
        let path: &[&str] = &[$($key),*];
        let actual = $crate::testing::Outcome::messages_at(outcome, path);
        let expected: ::std::vec::Vec<::std::string::String> =
            $expected.iter().map(|message| message.to_string()).collect();
        if actual != expected.as_slice() {
            panic!(
                "Expected errors {:?} at {:?}, got {:?} in {:?}",
                expected, path, actual, outcome
            );
        }
    }};
    ($outcome:expr, $expected:expr) => {
        $crate::assert_errors!($outcome, [] => $expected)
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for ValidationResult {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        let leaf = prop::collection::vec("[a-z ]{1,12}", 0..3).prop_map(ValidationResult::Errors);
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(ValidationResult::Nested)
        })
        .boxed()
    }
}
