//! Validation results
//!
//! Evaluating a [`Validator`](crate::Validator) produces a [`ValidationResult`]
//! whose shape mirrors the validator: a flat list of messages for a leaf, or a
//! keyed map of sub-results for a nested validator.
//!
//! Results built by [`validate`](crate::validate) are *pruned*: a key is only
//! present when its sub-result holds at least one message, so an object with no
//! invalid fields is an empty map.
//!
//! # Examples
//!
//! ```
//! use composable_validation::{has_validation_errors, ValidationResult};
//!
//! let result = ValidationResult::object([
//!     ("name", ValidationResult::from(vec!["Must be at least 5 characters"])),
//!     ("address", ValidationResult::object([
//!         ("postcode", ValidationResult::from(Vec::<String>::new())),
//!     ])),
//! ]);
//!
//! assert!(has_validation_errors(&result));
//! assert_eq!(result.errors_at(["name"]), ["Must be at least 5 characters"]);
//! assert!(result.clone().prune().get("address").is_none());
//! ```

use std::collections::BTreeMap;

use crate::error::ValidationFailure;

/// An ordered list of human-readable messages. Empty means valid.
pub type ValidationErrors = Vec<String>;

/// The outcome of evaluating a validator against a value.
///
/// With the `serde` feature the result serializes untagged: messages become a
/// JSON array and nested results an object keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ValidationResult {
    /// Messages produced by a leaf validator.
    Errors(ValidationErrors),
    /// Sub-results of a nested validator, keyed by field name.
    Nested(BTreeMap<String, ValidationResult>),
}

impl Default for ValidationResult {
    fn default() -> Self {
        ValidationResult::Nested(BTreeMap::new())
    }
}

impl ValidationResult {
    /// Build a nested result from `(key, result)` pairs.
    ///
    /// Later pairs with a repeated key are merged into the earlier entry.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValidationResult)>,
    {
        entries.into_iter().collect()
    }

    /// `true` when any leaf, at any depth, holds a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_validation::ValidationResult;
    ///
    /// let clean = ValidationResult::object([
    ///     ("a", ValidationResult::from(Vec::<String>::new())),
    ///     ("b", ValidationResult::object([("c", ValidationResult::from(Vec::<String>::new()))])),
    /// ]);
    /// assert!(!clean.has_errors());
    /// ```
    pub fn has_errors(&self) -> bool {
        match self {
            ValidationResult::Errors(errors) => !errors.is_empty(),
            ValidationResult::Nested(fields) => fields.values().any(ValidationResult::has_errors),
        }
    }

    /// `true` when no leaf holds a message.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Messages of a leaf result, `None` for a nested one.
    pub fn as_errors(&self) -> Option<&[String]> {
        match self {
            ValidationResult::Errors(errors) => Some(errors),
            ValidationResult::Nested(_) => None,
        }
    }

    /// Sub-result stored under `key`, if this is a nested result.
    pub fn get(&self, key: &str) -> Option<&ValidationResult> {
        match self {
            ValidationResult::Nested(fields) => fields.get(key),
            ValidationResult::Errors(_) => None,
        }
    }

    /// Follow a path of keys through nested results.
    ///
    /// An empty path returns `self`.
    pub fn at<'a, P>(&self, path: P) -> Option<&ValidationResult>
    where
        P: IntoIterator<Item = &'a str>,
    {
        path.into_iter()
            .try_fold(self, |current, key| current.get(key))
    }

    /// Messages of the leaf found at `path`, empty when the path is absent or
    /// ends on a nested result.
    pub fn errors_at<'a, P>(&self, path: P) -> &[String]
    where
        P: IntoIterator<Item = &'a str>,
    {
        self.at(path)
            .and_then(ValidationResult::as_errors)
            .unwrap_or(&[])
    }

    /// Drop every branch that holds no message.
    ///
    /// A leaf at the root is kept as-is, even when empty. Pruning is
    /// idempotent.
    pub fn prune(self) -> Self {
        match self {
            ValidationResult::Errors(errors) => ValidationResult::Errors(errors),
            ValidationResult::Nested(fields) => ValidationResult::Nested(
                fields
                    .into_iter()
                    .map(|(key, result)| (key, result.prune()))
                    .filter(|(_, result)| result.has_errors())
                    .collect(),
            ),
        }
    }

    /// Combine two results for the same node.
    ///
    /// Leaf messages are concatenated in order, nested maps are merged key by
    /// key, and a leaf meeting a nested result keeps whichever side has errors
    /// (the right-hand side when both do).
    pub fn merge(self, other: ValidationResult) -> Self {
        match (self, other) {
            (ValidationResult::Errors(mut left), ValidationResult::Errors(right)) => {
                left.extend(right);
                ValidationResult::Errors(left)
            }
            (ValidationResult::Nested(mut left), ValidationResult::Nested(right)) => {
                for (key, result) in right {
                    let merged = match left.remove(&key) {
                        Some(existing) => existing.merge(result),
                        None => result,
                    };
                    left.insert(key, merged);
                }
                ValidationResult::Nested(left)
            }
            (left, right) => {
                if right.has_errors() || !left.has_errors() {
                    right
                } else {
                    left
                }
            }
        }
    }

    /// Total number of messages in the tree.
    pub fn error_count(&self) -> usize {
        match self {
            ValidationResult::Errors(errors) => errors.len(),
            ValidationResult::Nested(fields) => fields.values().map(Self::error_count).sum(),
        }
    }

    /// Every message paired with its dotted field path.
    ///
    /// Messages of a root leaf have an empty path. Keys are visited in sorted
    /// order and messages in the order they were produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_validation::ValidationResult;
    ///
    /// let result = ValidationResult::object([
    ///     ("address", ValidationResult::object([
    ///         ("postcode", ValidationResult::from(vec!["Must be less than 5 characters"])),
    ///     ])),
    /// ]);
    ///
    /// assert_eq!(
    ///     result.flatten(),
    ///     vec![("address.postcode".to_string(), "Must be less than 5 characters")]
    /// );
    /// ```
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, path: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            ValidationResult::Errors(errors) => {
                out.extend(errors.iter().map(|message| (path.clone(), message.as_str())));
            }
            ValidationResult::Nested(fields) => {
                for (key, result) in fields {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    result.flatten_into(child, out);
                }
            }
        }
    }

    /// `Ok(())` when valid, otherwise the result wrapped in a
    /// [`ValidationFailure`].
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_validation::ValidationResult;
    ///
    /// assert!(ValidationResult::default().into_result().is_ok());
    ///
    /// let failed = ValidationResult::from(vec!["Please enter a valid email"]);
    /// let err = failed.into_result().unwrap_err();
    /// assert_eq!(err.error_count(), 1);
    /// ```
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.has_errors() {
            Err(ValidationFailure::new(self))
        } else {
            Ok(())
        }
    }
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        ValidationResult::Errors(errors)
    }
}

impl From<Vec<&str>> for ValidationResult {
    fn from(errors: Vec<&str>) -> Self {
        ValidationResult::Errors(errors.into_iter().map(String::from).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, ValidationResult)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (K, ValidationResult)>>(iter: I) -> Self {
        let mut fields: BTreeMap<String, ValidationResult> = BTreeMap::new();
        for (key, result) in iter {
            let key = key.into();
            let merged = match fields.remove(&key) {
                Some(existing) => existing.merge(result),
                None => result,
            };
            fields.insert(key, merged);
        }
        ValidationResult::Nested(fields)
    }
}

/// `true` when any leaf of `result`, at any depth, holds a message.
///
/// Consumers use this to gate submission without caring how deep the result
/// goes.
///
/// # Examples
///
/// ```
/// use composable_validation::{has_validation_errors, ValidationResult};
///
/// assert!(!has_validation_errors(&ValidationResult::default()));
/// assert!(has_validation_errors(&ValidationResult::object([
///     ("a", ValidationResult::from(vec!["x"])),
/// ])));
/// ```
#[inline]
pub fn has_validation_errors(result: &ValidationResult) -> bool {
    result.has_errors()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(messages: &[&str]) -> ValidationResult {
        ValidationResult::from(messages.to_vec())
    }

    #[test]
    fn empty_object_has_no_errors() {
        assert!(!has_validation_errors(&ValidationResult::default()));
    }

    #[test]
    fn any_failing_property_is_reported() {
        let result = ValidationResult::object([("key", leaf(&["error"])), ("other", leaf(&[]))]);
        assert!(has_validation_errors(&result));
    }

    #[test]
    fn all_empty_leaves_are_valid() {
        let result = ValidationResult::object([
            ("a", leaf(&[])),
            ("b", ValidationResult::object([("c", leaf(&[]))])),
        ]);
        assert!(!has_validation_errors(&result));
    }

    #[test]
    fn deep_failure_is_reported() {
        let result = ValidationResult::object([
            ("a", leaf(&[])),
            ("b", ValidationResult::object([("c", leaf(&["x"]))])),
        ]);
        assert!(has_validation_errors(&result));
    }

    #[test]
    fn prune_removes_empty_branches() {
        let result = ValidationResult::object([
            ("a", leaf(&[])),
            ("b", ValidationResult::object([("c", leaf(&[]))])),
            ("d", ValidationResult::object([("e", leaf(&["x"])), ("f", leaf(&[]))])),
        ]);

        let pruned = result.prune();

        assert_eq!(
            pruned,
            ValidationResult::object([("d", ValidationResult::object([("e", leaf(&["x"]))]))])
        );
    }

    #[test]
    fn prune_is_idempotent() {
        let result = ValidationResult::object([
            ("a", leaf(&["one"])),
            ("b", ValidationResult::object([("c", leaf(&[]))])),
        ]);

        let once = result.prune();
        let twice = once.clone().prune();
        assert_eq!(once, twice);
    }

    #[test]
    fn prune_keeps_root_leaf() {
        assert_eq!(leaf(&[]).prune(), leaf(&[]));
    }

    #[test]
    fn at_follows_paths() {
        let result = ValidationResult::object([(
            "address",
            ValidationResult::object([("postcode", leaf(&["too long"]))]),
        )]);

        assert_eq!(result.errors_at(["address", "postcode"]), ["too long"]);
        assert!(result.at(["address", "street"]).is_none());
        assert_eq!(result.at(std::iter::empty()), Some(&result));
        assert!(result.errors_at(["address"]).is_empty());
    }

    #[test]
    fn merge_concatenates_leaves_in_order() {
        let merged = leaf(&["a"]).merge(leaf(&["b", "c"]));
        assert_eq!(merged, leaf(&["a", "b", "c"]));
    }

    #[test]
    fn merge_unions_nested_maps() {
        let left = ValidationResult::object([("x", leaf(&["1"]))]);
        let right = ValidationResult::object([("x", leaf(&["2"])), ("y", leaf(&["3"]))]);

        assert_eq!(
            left.merge(right),
            ValidationResult::object([("x", leaf(&["1", "2"])), ("y", leaf(&["3"]))])
        );
    }

    #[test]
    fn merge_prefers_the_side_with_errors() {
        let nested = ValidationResult::object([("x", leaf(&["1"]))]);
        assert_eq!(nested.clone().merge(leaf(&[])), nested);
        assert_eq!(leaf(&[]).merge(nested.clone()), nested);
    }

    #[test]
    fn repeated_keys_are_merged_on_collect() {
        let result = ValidationResult::object([("x", leaf(&["1"])), ("x", leaf(&["2"]))]);
        assert_eq!(result.errors_at(["x"]), ["1", "2"]);
    }

    #[test]
    fn counts_and_flattens() {
        let result = ValidationResult::object([
            ("name", leaf(&["short", "odd"])),
            ("address", ValidationResult::object([("postcode", leaf(&["long"]))])),
        ]);

        assert_eq!(result.error_count(), 3);
        assert_eq!(
            result.flatten(),
            vec![
                ("address.postcode".to_string(), "long"),
                ("name".to_string(), "short"),
                ("name".to_string(), "odd"),
            ]
        );
    }

    #[test]
    fn root_leaf_flattens_with_empty_path() {
        assert_eq!(leaf(&["bad"]).flatten(), vec![(String::new(), "bad")]);
    }

    #[test]
    fn into_result_wraps_failures() {
        assert!(leaf(&[]).into_result().is_ok());

        let err = leaf(&["bad"]).into_result().unwrap_err();
        assert_eq!(err.result(), &leaf(&["bad"]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_untagged() {
        let result = ValidationResult::object([
            ("name", leaf(&["short"])),
            ("address", ValidationResult::object([("postcode", leaf(&["long"]))])),
        ]);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"address":{"postcode":["long"]},"name":["short"]}"#);

        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
