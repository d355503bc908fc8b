//! Presence checks
//!
//! [`required`](crate::required) and [`optional`](crate::optional) need two
//! answers about a value: is it there at all ([`Presence`]), and if it is, does
//! it still count as missing ([`Blank`]) under the active [`BlankPolicy`].
//!
//! The default policy treats `None`, the empty string and whitespace-only
//! strings as missing. Empty collections are present unless the policy opts in
//! with [`BlankPolicy::reject_empty_collections`]; compose with
//! [`min_items`](crate::validators::min_items) when an empty list should fail
//! with its own message instead.
//!
//! # Examples
//!
//! ```
//! use composable_validation::{Blank, BlankPolicy};
//!
//! let policy = BlankPolicy::default();
//! assert!("   ".is_blank(&policy));
//! assert!(!"a".is_blank(&policy));
//! assert!(!Vec::<i32>::new().is_blank(&policy));
//! assert!(Vec::<i32>::new().is_blank(&BlankPolicy::strict()));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Rules deciding which present values still count as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlankPolicy {
    trim_whitespace: bool,
    empty_collections: bool,
}

impl Default for BlankPolicy {
    fn default() -> Self {
        BlankPolicy::new()
    }
}

impl BlankPolicy {
    /// Whitespace-only strings are blank, empty collections are not.
    pub const fn new() -> Self {
        BlankPolicy {
            trim_whitespace: true,
            empty_collections: false,
        }
    }

    /// Whitespace-only strings and empty collections are both blank.
    pub const fn strict() -> Self {
        BlankPolicy {
            trim_whitespace: true,
            empty_collections: true,
        }
    }

    /// Only the empty string is blank; `"  "` counts as present.
    pub fn allow_whitespace(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }

    /// Treat empty collections as blank.
    pub fn reject_empty_collections(mut self) -> Self {
        self.empty_collections = true;
        self
    }

    /// Whether strings are trimmed before the emptiness check.
    pub fn trims_whitespace(&self) -> bool {
        self.trim_whitespace
    }

    /// Whether empty collections count as blank.
    pub fn rejects_empty_collections(&self) -> bool {
        self.empty_collections
    }
}

/// A present value that may still count as missing.
///
/// The default method says "never blank", so record-like types opt in with an
/// empty impl:
///
/// ```
/// use composable_validation::Blank;
///
/// struct Address {
///     postcode: String,
/// }
///
/// impl Blank for Address {}
/// ```
pub trait Blank {
    /// Whether the value counts as missing under `policy`.
    fn is_blank(&self, policy: &BlankPolicy) -> bool {
        let _ = policy;
        false
    }
}

impl Blank for str {
    fn is_blank(&self, policy: &BlankPolicy) -> bool {
        if policy.trims_whitespace() {
            self.trim().is_empty()
        } else {
            self.is_empty()
        }
    }
}

impl Blank for String {
    #[inline]
    fn is_blank(&self, policy: &BlankPolicy) -> bool {
        self.as_str().is_blank(policy)
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    #[inline]
    fn is_blank(&self, policy: &BlankPolicy) -> bool {
        (**self).is_blank(policy)
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self, policy: &BlankPolicy) -> bool {
        match self {
            Some(value) => value.is_blank(policy),
            None => true,
        }
    }
}

macro_rules! impl_blank_collection {
    ($($ty:ty => [$($param:ident),*]),+ $(,)?) => {
        $(
            impl<$($param),*> Blank for $ty {
                #[inline]
                fn is_blank(&self, policy: &BlankPolicy) -> bool {
                    policy.rejects_empty_collections() && self.is_empty()
                }
            }
        )+
    };
}

impl_blank_collection!(
    Vec<T> => [T],
    [T] => [T],
    VecDeque<T> => [T],
    BTreeSet<T> => [T],
    HashSet<T, S> => [T, S],
    BTreeMap<K, V> => [K, V],
    HashMap<K, V, S> => [K, V, S],
);

macro_rules! impl_never_blank {
    ($($ty:ty),+ $(,)?) => {
        $( impl Blank for $ty {} )+
    };
}

impl_never_blank!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(feature = "chrono")]
impl Blank for chrono::NaiveDate {}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Blank for chrono::DateTime<Tz> {}

/// Values that may be absent.
///
/// `Option<T>` is absent when `None`; plain strings, string slices and
/// vectors are always present and rely on [`Blank`] to decide whether they are empty.
pub trait Presence {
    /// The type seen by the wrapped validator once the value is present.
    type Value: ?Sized;

    /// The present value, or `None` when absent.
    fn present(&self) -> Option<&Self::Value>;
}

impl<T> Presence for Option<T> {
    type Value = T;

    #[inline]
    fn present(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl Presence for str {
    type Value = str;

    #[inline]
    fn present(&self) -> Option<&str> {
        Some(self)
    }
}

impl Presence for String {
    type Value = String;

    #[inline]
    fn present(&self) -> Option<&String> {
        Some(self)
    }
}

impl<T> Presence for Vec<T> {
    type Value = Vec<T>;

    #[inline]
    fn present(&self) -> Option<&Vec<T>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_trims_strings() {
        let policy = BlankPolicy::default();
        assert!("".is_blank(&policy));
        assert!("   ".is_blank(&policy));
        assert!("\t\n".to_string().is_blank(&policy));
        assert!(!" a ".is_blank(&policy));
    }

    #[test]
    fn whitespace_can_be_allowed() {
        let policy = BlankPolicy::default().allow_whitespace();
        assert!("".is_blank(&policy));
        assert!(!"   ".is_blank(&policy));
    }

    #[test]
    fn collections_are_present_by_default() {
        let policy = BlankPolicy::default();
        assert!(!Vec::<u8>::new().is_blank(&policy));
        assert!(!HashMap::<String, u8>::new().is_blank(&policy));
    }

    #[test]
    fn strict_policy_rejects_empty_collections() {
        let policy = BlankPolicy::strict();
        assert!(Vec::<u8>::new().is_blank(&policy));
        assert!(!vec![Vec::<u8>::new()].is_blank(&policy));
        assert!(BTreeSet::<u8>::new().is_blank(&policy));
        assert_eq!(BlankPolicy::default().reject_empty_collections(), policy);
    }

    #[test]
    fn none_is_always_blank() {
        assert!(None::<u32>.is_blank(&BlankPolicy::default()));
        assert!(!Some(0u32).is_blank(&BlankPolicy::default()));
        assert!(Some(String::from(" ")).is_blank(&BlankPolicy::default()));
    }

    #[test]
    fn numbers_are_never_blank() {
        assert!(!0i32.is_blank(&BlankPolicy::strict()));
        assert!(!false.is_blank(&BlankPolicy::strict()));
    }

    #[test]
    fn presence_of_options_and_strings() {
        assert_eq!(Some(3).present(), Some(&3));
        assert_eq!(None::<i32>.present(), None);
        assert_eq!(String::new().present(), Some(&String::new()));
        assert_eq!("abc".present(), Some("abc"));
    }
}
