//! Nested validation example
//!
//! Builds a validator for a record with nested and optional parts, and shows
//! the pruned result shape.
//!
//! Run with: cargo run --example nested_validation

use std::collections::BTreeMap;

use composable_validation::prelude::*;
use composable_validation::validators::{
    has_file_type, max_file_size_in_megabytes, max_items, max_length, min_length, FileInfo,
};

#[derive(Debug, Clone)]
struct Address {
    line1: String,
    postcode: String,
}

impl Blank for Address {}

#[derive(Debug, Clone)]
struct Application {
    name: Option<String>,
    home: Address,
    correspondence: Option<Address>,
    references: Vec<String>,
    cv: Option<FileInfo>,
    answers: BTreeMap<String, String>,
}

fn address() -> Validator<Address> {
    Validator::<Address>::nested()
        .field("line1", |a: &Address| &a.line1, required())
        .field("postcode", |a: &Address| &a.postcode, max_length(8))
        .build()
}

fn application() -> Validator<Application> {
    Validator::<Application>::nested()
        .field("name", |a: &Application| &a.name, required().with(min_length(2)))
        .nest("home", |a: &Application| &a.home, address())
        .nest(
            "correspondence",
            |a: &Application| &a.correspondence,
            address().optional(),
        )
        .field("references", |a: &Application| &a.references, max_items(3))
        .field(
            "cv",
            |a: &Application| &a.cv,
            rules((has_file_type(["pdf", "docx"]), max_file_size_in_megabytes(5))),
        )
        .nest(
            "answers",
            |a: &Application| &a.answers,
            Validator::<BTreeMap<String, String>>::nested()
                .entry("motivation", min_length(20))
                .entry("availability", required())
                .build(),
        )
        .build()
}

fn show(label: &str, result: &ValidationResult) {
    println!("{}:", label);
    if !has_validation_errors(result) {
        println!("  valid\n");
        return;
    }
    for (path, message) in result.flatten() {
        println!("  {} -> {}", path, message);
    }
    println!();
}

fn main() {
    println!("=== Nested Validation ===\n");

    let validator = application();

    let mut answers = BTreeMap::new();
    answers.insert("motivation".to_string(), "I like it".to_string());

    let draft = Application {
        name: Some(" ".into()),
        home: Address {
            line1: "1 High Street".into(),
            postcode: "AB1 2CD EFG".into(),
        },
        correspondence: Some(Address {
            line1: String::new(),
            postcode: "AB1".into(),
        }),
        references: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        cv: Some(FileInfo::new("cv.png", 12 * 1024 * 1024)),
        answers,
    };

    let result = validate(&validator, &draft);
    show("Draft", &result);
    println!("Result tree: {:#?}\n", result);

    let mut fixed = draft.clone();
    fixed.name = Some("Jo".into());
    fixed.home.postcode = "AB1 2CD".into();
    fixed.correspondence = None;
    fixed.references.truncate(2);
    fixed.cv = Some(FileInfo::new("cv.pdf", 200 * 1024));
    fixed
        .answers
        .insert("motivation".into(), "I have wanted this job for years".into());

    show("Fixed", &validate(&validator, &fixed));
}
