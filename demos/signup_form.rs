//! Signup form example
//!
//! Walks a form through the events a UI would send: typing, leaving fields,
//! and submitting.
//!
//! Run with: cargo run --example signup_form

use composable_validation::form::FormState;
use composable_validation::prelude::*;
use composable_validation::validators::{max_length, min_length, min_value, trimmed, valid_email};

#[derive(Debug, Clone, Default)]
struct Signup {
    username: String,
    email: Option<String>,
    password: String,
    password_confirm: String,
    age: u32,
    wants_newsletter: bool,
}

// Rebuilt on every change, so it can look at sibling values.
fn signup_validator(values: &Signup) -> Validator<Signup> {
    let password = values.password.clone();
    let wants_newsletter = values.wants_newsletter;

    Validator::<Signup>::nested()
        .field(
            "username",
            |s: &Signup| &s.username,
            trimmed(rules((min_length(3), max_length(20)))),
        )
        .field(
            "email",
            |s: &Signup| &s.email,
            only_if(
                wants_newsletter,
                required_with_message("We need an email to send the newsletter")
                    .with(valid_email()),
            ),
        )
        .field("password", |s: &Signup| &s.password, min_length(8))
        .field(
            "password_confirm",
            |s: &Signup| &s.password_confirm,
            move |confirm: &String| -> ValidationErrors {
                if *confirm == password {
                    Vec::new()
                } else {
                    vec!["Passwords must match".to_string()]
                }
            },
        )
        .field("age", |s: &Signup| &s.age, min_value(18))
        .build()
}

fn print_visible(form: &FormState<Signup>) {
    let visible = form.visible_errors();
    if !visible.has_errors() {
        println!("  (no visible errors)");
    }
    for (path, message) in visible.flatten() {
        println!("  {}: {}", path, message);
    }
}

fn main() {
    println!("=== Signup Form ===\n");

    let mut form = FormState::new(Signup::default(), signup_validator);

    println!("1. User types a short username and leaves the field:");
    form.change(|s| s.username = " al ".into());
    form.blur("username");
    print_visible(&form);

    println!("\n2. User ticks the newsletter box, email is now required:");
    form.change(|s| s.wants_newsletter = true);
    form.blur("email");
    print_visible(&form);

    println!("\n3. User submits too early:");
    match form.submit() {
        Ok(values) => println!("  submitted {:?}", values),
        Err(failure) => println!("  {}", failure),
    }
    print_visible(&form);

    println!("\n4. User fixes everything:");
    form.change(|s| {
        s.username = "alice".into();
        s.email = Some("alice@example.com".into());
        s.password = "correct horse".into();
        s.password_confirm = "correct horse".into();
        s.age = 34;
    });
    print_visible(&form);

    let welcome = form.if_valid(|s| format!("Welcome, {}!", s.username));
    println!("\n{}", welcome.unwrap_or_else(|| "Still invalid".to_string()));
}
