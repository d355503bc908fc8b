//! Combinators over value validators
//!
//! Each combinator takes leaf validators and returns a new leaf validator; none
//! of them mutate their input.
//!
//! - [`rules`] runs several validators against the same value and concatenates
//!   their messages, without short-circuiting.
//! - [`required`] / [`required_with_message`] reject absent or blank values,
//!   then delegate.
//! - [`optional`] accepts absent values, then delegates.
//! - [`only_if`] gates a validator on a fixed flag or a predicate of the value.
//!
//! # Example
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::validators::{max_length, min_length};
//!
//! let name = required().with(rules((min_length(3), max_length(10))));
//!
//! assert_eq!(name.validate(&None::<String>), vec!["Please complete this field"]);
//! assert_eq!(name.validate(&Some("ab".to_string())), vec!["Must be at least 3 characters"]);
//! assert!(name.validate(&Some("abcd".to_string())).is_empty());
//! ```

mod only_if;
mod optional;
mod required;
mod rules;

pub use only_if::{only_if, Condition, OnlyIf};
pub use optional::{optional, Optional};
pub use required::{required, required_with_message, Required, Valid, DEFAULT_REQUIRED_MESSAGE};
pub use rules::{rules, Rules};
