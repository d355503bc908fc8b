//! Form state driven the way a UI layer would drive it

use composable_validation::form::FormState;
use composable_validation::prelude::*;
use composable_validation::validators::{max_items, min_length, valid_email};

#[derive(Debug, Clone, Default, PartialEq)]
struct Registration {
    username: String,
    email: Option<String>,
    newsletter: bool,
    interests: Vec<String>,
}

fn registration_form() -> FormState<Registration> {
    FormState::new(Registration::default(), |values: &Registration| {
        let newsletter = values.newsletter;
        Validator::<Registration>::nested()
            .field("username", |r: &Registration| &r.username, min_length(3))
            .field(
                "email",
                |r: &Registration| &r.email,
                only_if(newsletter, required().with(valid_email())),
            )
            .field("interests", |r: &Registration| &r.interests, max_items(2))
            .build()
    })
}

#[test]
fn errors_appear_as_fields_are_left() {
    let mut form = registration_form();
    assert!(form.has_errors());
    assert!(!form.has_visible_errors());

    form.change(|r| r.username = "ab".into());
    assert!(!form.has_visible_errors());

    form.blur("username");
    assert_eq!(
        form.visible_errors().errors_at(["username"]),
        ["Must be at least 3 characters"]
    );
}

#[test]
fn validator_follows_sibling_values() {
    let mut form = registration_form();
    form.change(|r| r.username = "alice".into());
    assert!(!form.has_errors());

    form.change(|r| r.newsletter = true);
    assert_eq!(form.errors().errors_at(["email"]), ["Please complete this field"]);

    form.change(|r| r.email = Some("alice@example.com".into()));
    assert!(!form.has_errors());
}

#[test]
fn rejected_submission_reveals_everything() {
    let mut form = registration_form();
    form.change(|r| {
        r.interests = vec!["a".into(), "b".into(), "c".into()];
    });

    let failure = form.submit().unwrap_err();
    assert_eq!(failure.error_count(), 2);
    assert!(form.is_touched("interests"));
    assert_eq!(
        form.visible_errors().errors_at(["interests"]),
        ["Must be at most 2"]
    );
}

#[test]
fn if_valid_hands_values_to_callback() {
    let mut form = registration_form();
    form.change(|r| r.username = "carol".into());

    let submitted = form.if_valid(|r| r.username.clone());
    assert_eq!(submitted.as_deref(), Some("carol"));
    assert!(!form.has_visible_errors());
}
