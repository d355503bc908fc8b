//! Form state
//!
//! [`FormState`] is the framework-agnostic state behind an interactive form:
//! the current values, the latest [`ValidationResult`], and which fields the
//! user has finished editing. A UI layer forwards change and blur events to it
//! and renders [`FormState::visible_errors`], so messages only appear once a
//! field has been left, or after a rejected submission.
//!
//! The validator is rebuilt from the current values on every change, so it
//! can depend on sibling fields.
//!
//! # Example
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::form::FormState;
//! use composable_validation::validators::valid_email;
//!
//! #[derive(Debug, Default)]
//! struct Signup {
//!     subscribe: bool,
//!     email: Option<String>,
//! }
//!
//! let mut form = FormState::new(Signup::default(), |values: &Signup| {
//!     let subscribe = values.subscribe;
//!     Validator::<Signup>::nested()
//!         .field("email", |s: &Signup| &s.email, only_if(subscribe, required().with(valid_email())))
//!         .build()
//! });
//!
//! assert!(form.submit().is_ok());
//!
//! form.change(|values| values.subscribe = true);
//! assert!(!form.has_visible_errors());
//! assert!(form.submit().is_err());
//! assert_eq!(form.visible_errors().errors_at(["email"]), ["Please complete this field"]);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationFailure;
use crate::result::ValidationResult;
use crate::validator::{validate, Validator};

type ValidatorFactory<M> = Arc<dyn Fn(&M) -> Validator<M> + Send + Sync>;

/// Values, validation state and touched fields of one form instance.
pub struct FormState<M> {
    values: M,
    factory: ValidatorFactory<M>,
    result: ValidationResult,
    touched: BTreeSet<String>,
    all_touched: bool,
}

impl<M: fmt::Debug> fmt::Debug for FormState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("result", &self.result)
            .field("touched", &self.touched)
            .field("all_touched", &self.all_touched)
            .finish_non_exhaustive()
    }
}

impl<M> FormState<M> {
    /// Start a form with `values`, validated by the validator `factory` builds.
    ///
    /// The initial values are validated immediately, but nothing is visible
    /// until a field is blurred.
    pub fn new<F>(values: M, factory: F) -> Self
    where
        F: Fn(&M) -> Validator<M> + Send + Sync + 'static,
    {
        let mut form = FormState {
            values,
            factory: Arc::new(factory),
            result: ValidationResult::default(),
            touched: BTreeSet::new(),
            all_touched: false,
        };
        form.revalidate();
        form
    }

    /// The current values.
    pub fn values(&self) -> &M {
        &self.values
    }

    /// Consume the form and return its values.
    pub fn into_values(self) -> M {
        self.values
    }

    /// Update the values and revalidate with a freshly built validator.
    pub fn change<F>(&mut self, update: F) -> &ValidationResult
    where
        F: FnOnce(&mut M),
    {
        update(&mut self.values);
        self.revalidate();
        &self.result
    }

    /// Mark `field` as touched so its messages become visible.
    pub fn blur(&mut self, field: impl Into<String>) {
        self.touched.insert(field.into());
    }

    /// Whether messages for `field` are visible.
    pub fn is_touched(&self, field: &str) -> bool {
        self.all_touched || self.touched.contains(field)
    }

    /// Make every field visible, as after a rejected submission.
    pub fn touch_all(&mut self) {
        self.all_touched = true;
    }

    /// Every message for the current values, touched or not.
    pub fn errors(&self) -> &ValidationResult {
        &self.result
    }

    /// `true` when the current values fail validation.
    pub fn has_errors(&self) -> bool {
        self.result.has_errors()
    }

    /// Messages for touched fields only.
    ///
    /// A validator without fields has nothing to blur; its messages become
    /// visible after [`touch_all`](Self::touch_all).
    pub fn visible_errors(&self) -> ValidationResult {
        match &self.result {
            ValidationResult::Nested(fields) => ValidationResult::Nested(
                fields
                    .iter()
                    .filter(|(key, _)| self.is_touched(key))
                    .map(|(key, result)| (key.clone(), result.clone()))
                    .collect(),
            ),
            ValidationResult::Errors(errors) if self.all_touched => {
                ValidationResult::Errors(errors.clone())
            }
            ValidationResult::Errors(_) => ValidationResult::Errors(Vec::new()),
        }
    }

    /// `true` when a touched field has a message.
    pub fn has_visible_errors(&self) -> bool {
        self.visible_errors().has_errors()
    }

    /// Revalidate, then run `callback` on the values if they are valid.
    ///
    /// Invalid values mark every field touched and return `None`.
    pub fn if_valid<R, F>(&mut self, callback: F) -> Option<R>
    where
        F: FnOnce(&M) -> R,
    {
        self.revalidate();
        if self.result.has_errors() {
            self.reject();
            return None;
        }
        Some(callback(&self.values))
    }

    /// Revalidate and hand out the values, or the failure that blocks them.
    pub fn submit(&mut self) -> Result<&M, ValidationFailure> {
        self.revalidate();
        if self.result.has_errors() {
            self.reject();
            return Err(ValidationFailure::new(self.result.clone()));
        }
        Ok(&self.values)
    }

    /// Replace the values and forget which fields were touched.
    pub fn reset(&mut self, values: M) {
        self.values = values;
        self.touched.clear();
        self.all_touched = false;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let validator = (self.factory)(&self.values);
        self.result = validate(&validator, &self.values);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            error_count = self.result.error_count(),
            "form revalidated"
        );
    }

    fn reject(&mut self) {
        self.touch_all();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            error_count = self.result.error_count(),
            "form submission rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{only_if, required};
    use crate::result::ValidationErrors;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Model {
        name: Option<String>,
        password: String,
        confirm: String,
    }

    fn min_chars(min: usize) -> impl Fn(&String) -> ValidationErrors + Send + Sync + Clone {
        move |value: &String| {
            if value.chars().count() < min {
                vec![format!("Must be at least {} characters", min)]
            } else {
                Vec::new()
            }
        }
    }

    fn form() -> FormState<Model> {
        FormState::new(Model::default(), |values: &Model| {
            let password = values.password.clone();
            Validator::<Model>::nested()
                .field("name", |m: &Model| &m.name, required().with(min_chars(2)))
                .field("password", |m: &Model| &m.password, min_chars(4))
                .field(
                    "confirm",
                    |m: &Model| &m.confirm,
                    move |confirm: &String| -> ValidationErrors {
                        if *confirm == password {
                            Vec::new()
                        } else {
                            vec!["Passwords must match".into()]
                        }
                    },
                )
                .build()
        })
    }

    #[test]
    fn initial_errors_are_hidden() {
        let form = form();
        assert!(form.has_errors());
        assert!(!form.has_visible_errors());
        assert_eq!(form.visible_errors(), ValidationResult::default());
    }

    #[test]
    fn blur_reveals_one_field() {
        let mut form = form();
        form.blur("name");

        let visible = form.visible_errors();
        assert_eq!(visible.errors_at(["name"]), ["Please complete this field"]);
        assert!(visible.get("password").is_none());
        assert!(form.is_touched("name"));
        assert!(!form.is_touched("password"));
    }

    #[test]
    fn change_revalidates_with_current_siblings() {
        let mut form = form();
        form.change(|m| {
            m.name = Some("Al".into());
            m.password = "secret".into();
            m.confirm = "secret".into();
        });
        assert!(!form.has_errors());

        let result = form.change(|m| m.password = "changed".into());
        assert_eq!(result.errors_at(["confirm"]), ["Passwords must match"]);
    }

    #[test]
    fn if_valid_runs_callback_only_when_valid() {
        let mut form = form();
        assert_eq!(form.if_valid(|m| m.name.clone()), None);
        assert!(form.is_touched("password"));
        assert!(form.has_visible_errors());

        form.change(|m| {
            m.name = Some("Alice".into());
            m.password = "hunter2".into();
            m.confirm = "hunter2".into();
        });
        assert_eq!(form.if_valid(|m| m.name.clone()), Some(Some("Alice".to_string())));
    }

    #[test]
    fn submit_returns_values_or_failure() {
        let mut form = form();
        let failure = form.submit().unwrap_err();
        assert_eq!(failure.error_count(), 2);
        assert!(failure.result().get("name").is_some());

        form.change(|m| {
            m.name = Some("Bob".into());
            m.password = "pass".into();
            m.confirm = "pass".into();
        });
        assert_eq!(form.submit().unwrap().name.as_deref(), Some("Bob"));
    }

    #[test]
    fn reset_clears_touched_fields() {
        let mut form = form();
        let _ = form.submit();
        assert!(form.has_visible_errors());

        form.reset(Model::default());
        assert!(!form.has_visible_errors());
        assert!(form.has_errors());
    }

    #[test]
    fn leaf_form_shows_errors_after_rejection() {
        let mut form = FormState::new(String::new(), |_: &String| {
            Validator::leaf(only_if(true, min_chars(3)))
        });
        assert!(!form.has_visible_errors());
        assert!(form.submit().is_err());
        assert_eq!(form.visible_errors().errors_at([]), ["Must be at least 3 characters"]);
        assert_eq!(form.into_values(), "");
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[test]
        #[traced_test]
        fn rejected_submission_is_logged() {
            let mut form = form();
            let _ = form.submit();
            assert!(logs_contain("form submission rejected"));
        }
    }
}
