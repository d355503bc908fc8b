//! Boundary error for failed validations
//!
//! Evaluation itself never fails: invalid input is reported as data inside a
//! [`ValidationResult`]. Callers that want `?`-style control flow at the edge of
//! their program can turn a failing result into a [`ValidationFailure`].
//!
//! # Examples
//!
//! ```
//! use composable_validation::{ValidationFailure, ValidationResult};
//!
//! fn accept(result: ValidationResult) -> Result<&'static str, ValidationFailure> {
//!     result.into_result()?;
//!     Ok("accepted")
//! }
//!
//! let failed = ValidationResult::object([
//!     ("email", ValidationResult::from(vec!["Please enter a valid email"])),
//! ]);
//!
//! let err = accept(failed).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "validation failed with 1 error(s)\n  -> email: Please enter a valid email"
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::result::ValidationResult;

/// A validation result that contained at least one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    result: ValidationResult,
}

impl ValidationFailure {
    /// Wrap a failing result.
    pub fn new(result: ValidationResult) -> Self {
        ValidationFailure { result }
    }

    /// The wrapped result.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Consume the failure and return the wrapped result.
    pub fn into_inner(self) -> ValidationResult {
        self.result
    }

    /// Number of messages in the wrapped result.
    pub fn error_count(&self) -> usize {
        self.result.error_count()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s)", self.error_count())?;
        for (path, message) in self.result.flatten() {
            if path.is_empty() {
                write!(f, "\n  -> {}", message)?;
            } else {
                write!(f, "\n  -> {}: {}", path, message)?;
            }
        }
        Ok(())
    }
}

impl StdError for ValidationFailure {}

impl From<ValidationFailure> for ValidationResult {
    fn from(failure: ValidationFailure) -> Self {
        failure.into_inner()
    }
}
