//! # Composable Validation
//!
//! Small validators that compose into validators for whole records.
//!
//! A *leaf* validator is any function from a value to a list of messages; an
//! empty list means valid. Combinators ([`rules`], [`required`], [`optional`],
//! [`only_if`]) build bigger leaves out of smaller ones, and
//! [`Validator::nested`] assigns validators to the fields of a struct or the
//! entries of a map. [`validate`] walks a validator and a value together and
//! returns a [`ValidationResult`] of the same shape, pruned down to the fields
//! that failed.
//!
//! ## Quick Example
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::validators::{max_length, min_length, valid_email};
//!
//! struct Address {
//!     postcode: String,
//! }
//!
//! struct Person {
//!     name: Option<String>,
//!     email: String,
//!     address: Address,
//! }
//!
//! let validator = Validator::<Person>::nested()
//!     .field("name", |p: &Person| &p.name, required().with(rules((min_length(2), max_length(20)))))
//!     .field("email", |p: &Person| &p.email, valid_email())
//!     .nest(
//!         "address",
//!         |p: &Person| &p.address,
//!         Validator::<Address>::nested()
//!             .field("postcode", |a: &Address| &a.postcode, max_length(5))
//!             .build(),
//!     )
//!     .build();
//!
//! let person = Person {
//!     name: None,
//!     email: "person@example.com".into(),
//!     address: Address { postcode: "123456".into() },
//! };
//!
//! let result = validate(&validator, &person);
//! assert!(has_validation_errors(&result));
//! assert_eq!(result.errors_at(["name"]), ["Please complete this field"]);
//! assert_eq!(result.errors_at(["address", "postcode"]), ["Must be less than 5 characters"]);
//! assert!(result.get("email").is_none());
//! ```
//!
//! ## Features
//!
//! - `chrono` (default): date and time validators in [`validators`].
//! - `serde`: `Serialize`/`Deserialize` for results and policy types.
//! - `tracing`: debug events from [`form::FormState`].
//! - `proptest`: `Arbitrary` for [`ValidationResult`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod combinators;
pub mod error;
pub mod form;
pub mod presence;
pub mod result;
pub mod testing;
pub mod validator;
pub mod validators;

// Re-exports
pub use combinators::{
    only_if, optional, required, required_with_message, rules, Condition, OnlyIf, Optional,
    Required, Rules, Valid, DEFAULT_REQUIRED_MESSAGE,
};
pub use error::ValidationFailure;
pub use form::FormState;
pub use presence::{Blank, BlankPolicy, Presence};
pub use result::{has_validation_errors, ValidationErrors, ValidationResult};
pub use validator::{validate, Fields, Keyed, Validator, ValueValidator, ValueValidatorExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::combinators::{
        only_if, optional, required, required_with_message, rules, Condition, Required,
    };
    pub use crate::error::ValidationFailure;
    pub use crate::presence::{Blank, BlankPolicy};
    pub use crate::result::{has_validation_errors, ValidationErrors, ValidationResult};
    pub use crate::validator::{validate, Fields, Validator, ValueValidator, ValueValidatorExt};
}
