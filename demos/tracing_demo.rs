//! Demonstrates tracing output from form state
//!
//! Run with: cargo run --example tracing_demo --features tracing

use composable_validation::form::FormState;
use composable_validation::prelude::*;
use composable_validation::validators::{min_length, valid_email};

#[derive(Debug, Default)]
struct Login {
    email: Option<String>,
    password: String,
}

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let mut form = FormState::new(Login::default(), |_: &Login| {
        Validator::<Login>::nested()
            .field("email", |l: &Login| &l.email, required().with(valid_email()))
            .field("password", |l: &Login| &l.password, min_length(8))
            .build()
    });

    if let Err(failure) = form.submit() {
        tracing::warn!("Login rejected: {}", failure);
    }

    form.change(|l| {
        l.email = Some("dev@example.com".into());
        l.password = "long enough".into();
    });

    match form.submit() {
        Ok(login) => tracing::info!("Logged in as {:?}", login.email),
        Err(failure) => tracing::error!("Unexpected failure: {}", failure),
    }
}
