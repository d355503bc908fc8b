//! Validators and the recursive evaluator
//!
//! A [`Validator<T>`] is either a leaf function from `&T` to a list of messages,
//! or a nested set of keyed entries, each holding the validator for one part of
//! `T`. [`validate`] walks the validator and the value side by side and builds a
//! [`ValidationResult`] of the same shape, keeping only the keys that failed.
//!
//! # Example
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::validators::{max_length, min_length};
//!
//! struct Address {
//!     postcode: String,
//! }
//!
//! struct Person {
//!     name: String,
//!     address: Address,
//! }
//!
//! let validator = Validator::<Person>::nested()
//!     .field("name", |p: &Person| &p.name, min_length(5))
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
//!     name: String::new(),
//!     address: Address { postcode: "123456".into() },
//! };
//!
//! let result = validate(&validator, &person);
//! assert!(!result.errors_at(["name"]).is_empty());
//! assert!(!result.errors_at(["address", "postcode"]).is_empty());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::combinators::{Condition, OnlyIf, Optional, Required, Rules};
use crate::presence::Blank;
use crate::result::{ValidationErrors, ValidationResult};

/// A pure check from a value to a list of messages.
///
/// An empty list means the value is valid. Implementations must not panic on
/// malformed input and must return the same messages for the same value.
///
/// Any `Fn(&T) -> ValidationErrors + Send + Sync` is a value validator:
///
/// ```rust
/// use composable_validation::{ValidationErrors, ValueValidator};
///
/// let starts_with_a = |s: &str| -> ValidationErrors {
///     if s.starts_with('a') { Vec::new() } else { vec!["must start with a".into()] }
/// };
///
/// assert!(starts_with_a.validate("apple").is_empty());
/// assert_eq!(starts_with_a.validate("pear"), vec!["must start with a"]);
/// ```
pub trait ValueValidator<T: ?Sized>: Send + Sync {
    /// Check `value`, returning every message that applies.
    fn validate(&self, value: &T) -> ValidationErrors;
}

impl<T: ?Sized, F> ValueValidator<T> for F
where
    F: Fn(&T) -> ValidationErrors + Send + Sync,
{
    #[inline]
    fn validate(&self, value: &T) -> ValidationErrors {
        self(value)
    }
}

/// Chaining methods for value validators.
///
/// Validators that accept several input types (such as the text validators,
/// which accept both `str` and `String`) need the input type spelled out when
/// chained: `ValueValidatorExt::<String>::and(min_length(3), max_length(10))`.
pub trait ValueValidatorExt<T: ?Sized>: ValueValidator<T> + Sized {
    /// Run both validators and concatenate their messages.
    fn and<V: ValueValidator<T>>(self, other: V) -> Rules<(Self, V)> {
        Rules((self, other))
    }

    /// Only run this validator when `condition` holds.
    fn only_if<C: Condition<T>>(self, condition: C) -> OnlyIf<C, Self> {
        OnlyIf::new(condition, self)
    }

    /// Accept absent values, validate present ones.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Erase the concrete type.
    fn boxed(self) -> Arc<dyn ValueValidator<T>>
    where
        Self: 'static,
    {
        Arc::new(self)
    }

    /// Wrap as a leaf [`Validator`].
    fn into_validator(self) -> Validator<T>
    where
        Self: 'static,
    {
        Validator::leaf(self)
    }
}

impl<T: ?Sized, V: ValueValidator<T>> ValueValidatorExt<T> for V {}

/// A shared leaf, so combinator structs can wrap an erased validator.
pub(crate) struct SharedLeaf<T: ?Sized>(pub(crate) Arc<dyn ValueValidator<T>>);

impl<T: ?Sized> ValueValidator<T> for SharedLeaf<T> {
    #[inline]
    fn validate(&self, value: &T) -> ValidationErrors {
        self.0.validate(value)
    }
}

/// A validator for values of type `T`.
///
/// Validators are immutable once built and cheap to clone; a single instance
/// can be evaluated from many threads at once.
pub enum Validator<T: ?Sized> {
    /// A function checked directly against the value.
    Leaf(Arc<dyn ValueValidator<T>>),
    /// Keyed validators for the parts of a composite value.
    Nested(Fields<T>),
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Validator::Leaf(leaf) => Validator::Leaf(Arc::clone(leaf)),
            Validator::Nested(fields) => Validator::Nested(fields.clone()),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Leaf(_) => f.write_str("Leaf(..)"),
            Validator::Nested(fields) => f.debug_tuple("Nested").field(fields).finish(),
        }
    }
}

impl<T: ?Sized> From<Fields<T>> for Validator<T> {
    fn from(fields: Fields<T>) -> Self {
        Validator::Nested(fields)
    }
}

impl<T: ?Sized> Validator<T> {
    /// Wrap a value validator as a leaf.
    pub fn leaf<V>(validator: V) -> Self
    where
        V: ValueValidator<T> + 'static,
    {
        Validator::Leaf(Arc::new(validator))
    }

    /// Start building a nested validator.
    pub fn nested() -> Fields<T> {
        Fields::new()
    }

    /// `true` for the leaf variant.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Validator::Leaf(_))
    }

    /// Evaluate against `value`. Same as [`validate`].
    #[inline]
    pub fn validate(&self, value: &T) -> ValidationResult {
        validate(self, value)
    }
}

impl<T: ?Sized + 'static> Validator<T> {
    /// Only evaluate when `condition` holds for the value under validation.
    ///
    /// The condition is checked on every evaluation. When it does not hold the
    /// wrapped validator is not invoked and no messages are produced.
    ///
    /// On a nested validator, repeated calls are checked outermost first, and a
    /// skipped node yields an empty nested result.
    pub fn only_if<C>(self, condition: C) -> Self
    where
        C: Condition<T> + 'static,
    {
        match self {
            Validator::Leaf(leaf) => Validator::leaf(OnlyIf::new(condition, SharedLeaf(leaf))),
            Validator::Nested(mut fields) => {
                let guard: Guard<T> = Arc::new(move |value: &T| {
                    (!condition.holds(value)).then(ValidationErrors::new)
                });
                fields.guards.insert(0, guard);
                Validator::Nested(fields)
            }
        }
    }
}

impl<T: 'static> Validator<T> {
    /// Accept `None`, validate `Some`.
    pub fn optional(self) -> Validator<Option<T>> {
        match self {
            Validator::Leaf(leaf) => Validator::leaf(Optional::new(SharedLeaf(leaf))),
            Validator::Nested(fields) => Validator::Nested(fields.lift_option(Arc::new(
                |value: &Option<T>| value.is_none().then(ValidationErrors::new),
            ))),
        }
    }

    /// Reject `None` and blank values with the default message, validate the
    /// rest.
    pub fn required(self) -> Validator<Option<T>>
    where
        T: Blank,
    {
        self.required_by(crate::combinators::required())
    }

    /// Reject `None` and blank values according to `presence`, validate the
    /// rest.
    ///
    /// ```rust
    /// use composable_validation::prelude::*;
    ///
    /// let v = Validator::leaf(|n: &u32| -> ValidationErrors { Vec::new() })
    ///     .required_by(required_with_message("Pick a number"));
    ///
    /// assert_eq!(v.validate(&None).errors_at([]), ["Pick a number"]);
    /// ```
    pub fn required_by<V>(self, presence: Required<V>) -> Validator<Option<T>>
    where
        T: Blank,
    {
        let presence = presence.with(crate::combinators::Valid);
        match self {
            Validator::Leaf(leaf) => Validator::leaf(presence.with(SharedLeaf(leaf))),
            Validator::Nested(fields) => {
                Validator::Nested(fields.lift_option(Arc::new(move |value: &Option<T>| {
                    presence.missing(value)
                })))
            }
        }
    }
}

/// Runs before the entries of a nested validator. `Some` short-circuits the
/// node with those messages.
type Guard<T> = Arc<dyn Fn(&T) -> Option<ValidationErrors> + Send + Sync>;

/// One keyed entry of a nested validator.
pub(crate) trait FieldCheck<T: ?Sized>: Send + Sync {
    fn key(&self) -> &str;

    /// `None` when the key is absent from `parent`.
    fn check(&self, parent: &T) -> Option<ValidationResult>;
}

struct Projected<T: ?Sized, U: ?Sized, F> {
    key: String,
    project: F,
    validator: Validator<U>,
    _parent: PhantomData<fn(&T)>,
}

impl<T, U, F> FieldCheck<T> for Projected<T, U, F>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> &U + Send + Sync,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn check(&self, parent: &T) -> Option<ValidationResult> {
        Some(validate(&self.validator, (self.project)(parent)))
    }
}

struct KeyedEntry<V: ?Sized> {
    key: String,
    validator: Validator<V>,
}

impl<M> FieldCheck<M> for KeyedEntry<M::Item>
where
    M: Keyed + ?Sized,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn check(&self, parent: &M) -> Option<ValidationResult> {
        parent
            .lookup(&self.key)
            .map(|value| validate(&self.validator, value))
    }
}

struct LiftedEntry<T>(Arc<dyn FieldCheck<T>>);

impl<T> FieldCheck<Option<T>> for LiftedEntry<T> {
    fn key(&self) -> &str {
        self.0.key()
    }

    fn check(&self, parent: &Option<T>) -> Option<ValidationResult> {
        parent.as_ref().and_then(|value| self.0.check(value))
    }
}

/// Map-like values whose entries can be looked up by string key.
pub trait Keyed {
    /// The type stored under each key.
    type Item: ?Sized;

    /// The value stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<&Self::Item>;
}

impl<V, S: BuildHasher> Keyed for HashMap<String, V, S> {
    type Item = V;

    #[inline]
    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl<V> Keyed for BTreeMap<String, V> {
    type Item = V;

    #[inline]
    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

/// The keyed entries of a nested validator, in insertion order.
///
/// Built with [`Validator::nested`]; finish with [`Fields::build`].
pub struct Fields<T: ?Sized> {
    guards: Vec<Guard<T>>,
    entries: Vec<Arc<dyn FieldCheck<T>>>,
}

impl<T: ?Sized> Clone for Fields<T> {
    fn clone(&self) -> Self {
        Fields {
            guards: self.guards.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Fields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fields")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .field("guards", &self.guards.len())
            .finish()
    }
}

impl<T: ?Sized> Default for Fields<T> {
    fn default() -> Self {
        Fields::new()
    }
}

impl<T: ?Sized> Fields<T> {
    /// An empty set of entries.
    pub fn new() -> Self {
        Fields {
            guards: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Keys of the entries, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> Validator<T> {
        Validator::Nested(self)
    }

    fn evaluate(&self, value: &T) -> ValidationResult {
        for guard in &self.guards {
            if let Some(errors) = guard(value) {
                if errors.is_empty() {
                    return ValidationResult::default();
                }
                return ValidationResult::Errors(errors);
            }
        }

        let mut results: BTreeMap<String, ValidationResult> = BTreeMap::new();
        for entry in &self.entries {
            let Some(result) = entry.check(value) else {
                continue;
            };
            if !result.has_errors() {
                continue;
            }
            let merged = match results.remove(entry.key()) {
                Some(existing) => existing.merge(result),
                None => result,
            };
            results.insert(entry.key().to_owned(), merged);
        }
        ValidationResult::Nested(results)
    }
}

impl<T: ?Sized + 'static> Fields<T> {
    /// Validate the part of `T` returned by `project` with a leaf validator.
    pub fn field<U, F, V>(self, key: impl Into<String>, project: F, validator: V) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(&T) -> &U + Send + Sync + 'static,
        V: ValueValidator<U> + 'static,
    {
        self.nest(key, project, Validator::leaf(validator))
    }

    /// Validate the part of `T` returned by `project` with any validator.
    pub fn nest<U, F>(mut self, key: impl Into<String>, project: F, validator: Validator<U>) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        self.entries.push(Arc::new(Projected {
            key: key.into(),
            project,
            validator,
            _parent: PhantomData,
        }));
        self
    }
}

impl<T> Fields<T>
where
    T: Keyed + ?Sized + 'static,
    T::Item: 'static,
{
    /// Validate the entry stored under `key` with a leaf validator.
    ///
    /// A key missing from the value contributes nothing to the result.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use composable_validation::prelude::*;
    /// use composable_validation::validators::min_length;
    ///
    /// let validator = Validator::<HashMap<String, String>>::nested()
    ///     .entry("name", min_length(3))
    ///     .entry("nickname", min_length(3))
    ///     .build();
    ///
    /// let mut values = HashMap::new();
    /// values.insert("name".to_string(), "al".to_string());
    ///
    /// let result = validate(&validator, &values);
    /// assert!(result.get("name").is_some());
    /// assert!(result.get("nickname").is_none());
    /// ```
    pub fn entry<V>(self, key: impl Into<String>, validator: V) -> Self
    where
        V: ValueValidator<T::Item> + 'static,
    {
        self.nest_entry(key, Validator::leaf(validator))
    }

    /// Validate the entry stored under `key` with any validator.
    pub fn nest_entry(mut self, key: impl Into<String>, validator: Validator<T::Item>) -> Self {
        self.entries.push(Arc::new(KeyedEntry {
            key: key.into(),
            validator,
        }));
        self
    }
}

impl<T: 'static> Fields<T> {
    fn lift_option(self, first: Guard<Option<T>>) -> Fields<Option<T>> {
        let mut guards: Vec<Guard<Option<T>>> = Vec::with_capacity(self.guards.len() + 1);
        guards.push(first);
        for inner in self.guards {
            let lifted: Guard<Option<T>> =
                Arc::new(move |value: &Option<T>| value.as_ref().and_then(|v| inner(v)));
            guards.push(lifted);
        }

        let entries = self
            .entries
            .into_iter()
            .map(|entry| Arc::new(LiftedEntry(entry)) as Arc<dyn FieldCheck<Option<T>>>)
            .collect();

        Fields { guards, entries }
    }
}

/// Evaluate `validator` against `value`.
///
/// A leaf produces its messages directly. A nested validator evaluates every
/// entry against the matching part of the value and keeps only the keys whose
/// sub-result holds a message, recursively.
///
/// # Examples
///
/// ```rust
/// use composable_validation::prelude::*;
/// use composable_validation::validators::min_length;
///
/// let result = validate(&Validator::leaf(min_length(10)), "fail");
/// assert_eq!(result.errors_at([]), ["Must be at least 10 characters"]);
/// ```
pub fn validate<T: ?Sized>(validator: &Validator<T>, value: &T) -> ValidationResult {
    match validator {
        Validator::Leaf(leaf) => ValidationResult::Errors(leaf.validate(value)),
        Validator::Nested(fields) => fields.evaluate(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{required, rules};
    use crate::testing::SpyValidator;
    use std::sync::Mutex;

    fn min_len(min: usize) -> impl ValueValidator<String> + Clone {
        move |value: &String| -> ValidationErrors {
            if value.chars().count() < min {
                vec![format!("Must be at least {} characters", min)]
            } else {
                Vec::new()
            }
        }
    }

    fn max_len(max: usize) -> impl ValueValidator<String> + Clone {
        move |value: &String| -> ValidationErrors {
            if value.chars().count() > max {
                vec![format!("Text must be less than {} characters", max)]
            } else {
                Vec::new()
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Address {
        postcode: String,
    }

    impl Blank for Address {}

    #[derive(Debug, Clone)]
    struct Person {
        name: String,
        valid_key: u32,
        address: Address,
    }

    fn person(name: &str, postcode: &str) -> Person {
        Person {
            name: name.into(),
            valid_key: 6,
            address: Address {
                postcode: postcode.into(),
            },
        }
    }

    fn address_validator() -> Validator<Address> {
        Validator::<Address>::nested()
            .field("postcode", |a: &Address| &a.postcode, max_len(5))
            .build()
    }

    fn person_validator() -> Validator<Person> {
        Validator::<Person>::nested()
            .field("name", |p: &Person| &p.name, rules((min_len(5), max_len(10))))
            .field("valid_key", |p: &Person| &p.valid_key, |_: &u32| -> ValidationErrors {
                Vec::new()
            })
            .nest("address", |p: &Person| &p.address, address_validator())
            .build()
    }

    #[test]
    fn leaf_returns_flat_errors() {
        let result = validate(&Validator::<String>::leaf(min_len(10)), &"fail".to_string());
        assert!(!result.errors_at([]).is_empty());
        assert!(result.as_errors().is_some());
    }

    #[test]
    fn nested_reports_failing_keys() {
        let result = validate(&person_validator(), &person("", ""));
        assert_eq!(result.errors_at(["name"]), ["Must be at least 5 characters"]);
    }

    #[test]
    fn passing_keys_are_pruned() {
        let result = validate(&person_validator(), &person("", ""));
        assert!(result.get("valid_key").is_none());
        assert!(result.get("address").is_none());
    }

    #[test]
    fn valid_value_yields_empty_object() {
        let result = validate(&person_validator(), &person("abcdef", "123"));
        assert_eq!(result, ValidationResult::default());
    }

    #[test]
    fn nested_failures_keep_their_path() {
        let result = validate(&person_validator(), &person("abcdef", "123456"));
        assert_eq!(
            result.errors_at(["address", "postcode"]),
            ["Text must be less than 5 characters"]
        );
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn leaf_at_any_depth() {
        struct Outer {
            inner: Inner,
        }
        struct Inner {
            deeper: Deeper,
        }
        struct Deeper {
            value: String,
        }

        let validator = Validator::<Outer>::nested()
            .nest(
                "inner",
                |o: &Outer| &o.inner,
                Validator::<Inner>::nested()
                    .nest(
                        "deeper",
                        |i: &Inner| &i.deeper,
                        Validator::<Deeper>::nested()
                            .field("value", |d: &Deeper| &d.value, min_len(2))
                            .build(),
                    )
                    .build(),
            )
            .build();

        let value = Outer {
            inner: Inner {
                deeper: Deeper { value: "x".into() },
            },
        };

        let result = validate(&validator, &value);
        assert!(result.at(["inner", "deeper", "value"]).is_some());
    }

    #[test]
    fn absent_sub_value_is_delegated() {
        struct Form {
            nickname: Option<String>,
            email: Option<String>,
        }

        let validator = Validator::<Form>::nested()
            .field(
                "nickname",
                |f: &Form| &f.nickname,
                crate::combinators::optional(min_len(3)),
            )
            .field("email", |f: &Form| &f.email, required())
            .build();

        let result = validate(
            &validator,
            &Form {
                nickname: None,
                email: None,
            },
        );

        assert!(result.get("nickname").is_none());
        assert_eq!(result.errors_at(["email"]), ["Please complete this field"]);
    }

    #[test]
    fn duplicate_keys_merge_in_order() {
        let validator = Validator::<Person>::nested()
            .field("name", |p: &Person| &p.name, min_len(5))
            .field("name", |p: &Person| &p.name, |_: &String| -> ValidationErrors {
                vec!["second".into()]
            })
            .build();

        let result = validate(&validator, &person("", ""));
        assert_eq!(
            result.errors_at(["name"]),
            ["Must be at least 5 characters", "second"]
        );
    }

    #[test]
    fn keyed_entries_skip_missing_keys() {
        let validator = Validator::<BTreeMap<String, String>>::nested()
            .entry("present", min_len(5))
            .entry("missing", min_len(5))
            .build();

        let mut values = BTreeMap::new();
        values.insert("present".to_string(), "abc".to_string());

        let result = validate(&validator, &values);
        assert_eq!(result.errors_at(["present"]), ["Must be at least 5 characters"]);
        assert!(result.get("missing").is_none());
    }

    #[test]
    fn only_if_false_skips_nested_validator() {
        #[derive(Debug, Clone, PartialEq)]
        struct Ant {
            bat: String,
            cat: String,
        }
        struct Model {
            ant: Ant,
        }

        let seen: Arc<Mutex<Vec<Ant>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let spy = SpyValidator::failing(["never"]);

        let validator = Validator::<Model>::nested()
            .nest(
                "ant",
                |m: &Model| &m.ant,
                Validator::<Ant>::nested()
                    .field("bat", |a: &Ant| &a.bat, spy.clone())
                    .field("cat", |a: &Ant| &a.cat, min_len(3))
                    .build()
                    .only_if(move |ant: &Ant| {
                        recorder.lock().unwrap().push(ant.clone());
                        false
                    }),
            )
            .build();

        let nested_value = Ant {
            bat: "two".into(),
            cat: "three".into(),
        };
        let result = validate(
            &validator,
            &Model {
                ant: nested_value.clone(),
            },
        );

        assert_eq!(result, ValidationResult::default());
        assert_eq!(*seen.lock().unwrap(), vec![nested_value]);
        assert_eq!(spy.calls(), 0);
    }

    #[test]
    fn only_if_true_runs_nested_validator() {
        let validator = address_validator().only_if(true);
        let result = validate(
            &validator,
            &Address {
                postcode: "1234567".into(),
            },
        );
        assert!(result.get("postcode").is_some());
    }

    #[test]
    fn skipped_nested_node_keeps_nested_shape() {
        let skipped = address_validator().only_if(false);
        let result = validate(
            &skipped,
            &Address {
                postcode: "1234567".into(),
            },
        );
        assert_eq!(result, ValidationResult::default());
        assert!(result.as_errors().is_none());

        let absent = validate(&address_validator().optional(), &None);
        assert_eq!(absent, ValidationResult::default());
    }

    #[test]
    fn repeated_nested_only_if_checks_outermost_first() {
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let inner_log = Arc::clone(&order);
        let outer_log = Arc::clone(&order);
        let validator = address_validator()
            .only_if(move |_: &Address| {
                inner_log.lock().unwrap().push("inner");
                true
            })
            .only_if(move |_: &Address| {
                outer_log.lock().unwrap().push("outer");
                true
            });

        let _ = validate(
            &validator,
            &Address {
                postcode: "1".into(),
            },
        );
        assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
    }

    #[test]
    fn only_if_on_leaf() {
        let spy = SpyValidator::failing(["nope"]);
        let skipped = Validator::<String>::leaf(spy.clone()).only_if(false);
        assert!(validate(&skipped, &String::new()).is_valid());
        assert_eq!(spy.calls(), 0);

        let checked = Validator::<String>::leaf(spy.clone()).only_if(|s: &String| s.is_empty());
        assert_eq!(validate(&checked, &String::new()).errors_at([]), ["nope"]);
        assert_eq!(spy.calls(), 1);
    }

    #[test]
    fn optional_nested_accepts_none() {
        let validator = address_validator().optional();

        assert!(validate(&validator, &None).is_valid());
        let result = validate(
            &validator,
            &Some(Address {
                postcode: "1234567".into(),
            }),
        );
        assert!(result.get("postcode").is_some());
    }

    #[test]
    fn required_nested_rejects_none() {
        let validator = address_validator().required();

        assert_eq!(
            validate(&validator, &None).errors_at([]),
            ["Please complete this field"]
        );
        assert!(validate(
            &validator,
            &Some(Address {
                postcode: "1".into()
            })
        )
        .is_valid());
    }

    #[test]
    fn required_nested_keeps_inner_guards_behind_presence() {
        let spy = SpyValidator::passing();
        let counter = spy.clone();
        let validator = address_validator()
            .only_if(move |_: &Address| {
                let _ = counter.validate(&());
                true
            })
            .required();

        let _ = validate(&validator, &None);
        assert_eq!(spy.calls(), 0);

        let _ = validate(
            &validator,
            &Some(Address {
                postcode: "1".into(),
            }),
        );
        assert_eq!(spy.calls(), 1);
    }

    #[test]
    fn optional_and_required_leaf() {
        let optional = Validator::<String>::leaf(min_len(3)).optional();
        assert!(validate(&optional, &None).is_valid());
        assert!(validate(&optional, &Some("ab".to_string())).has_errors());

        let required = Validator::<String>::leaf(min_len(3)).required();
        assert!(validate(&required, &None).has_errors());
        assert!(validate(&required, &Some("   ".to_string())).has_errors());
        assert!(validate(&required, &Some("abc".to_string())).is_valid());
    }

    #[test]
    fn validators_are_shareable_across_threads() {
        let validator = person_validator();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = validator.clone();
                std::thread::spawn(move || {
                    let name = "x".repeat(i * 3);
                    validate(&validator, &person(&name, "1")).has_errors()
                })
            })
            .collect();

        let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outcomes, vec![true, true, false, false]);
    }

    #[test]
    fn debug_lists_keys() {
        let rendered = format!("{:?}", person_validator());
        assert!(rendered.contains("name"));
        assert!(rendered.contains("address"));
        assert_eq!(format!("{:?}", Validator::<String>::leaf(min_len(1))), "Leaf(..)");
    }

    #[test]
    fn fields_builder_reports_keys() {
        let fields = Validator::<Person>::nested()
            .field("name", |p: &Person| &p.name, min_len(1))
            .field("valid_key", |p: &Person| &p.valid_key, crate::combinators::Valid);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["name", "valid_key"]);
        assert_eq!(fields.len(), 2);
        assert!(!fields.is_empty());
        assert!(!fields.build().is_leaf());
    }
}
