//! Key-set extraction and disjointness checks.
//!
//! # Example
//!
//! ```
//! use grabbag::util::keys::{assert_disjoint, KeyCollection};
//!
//! let first = KeyCollection::from(["a", "c"]);
//! let second = KeyCollection::from(["b", "d"]);
//! assert!(assert_disjoint(&[first, second]).is_ok());
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Return the set of own keys of a defaults object.
pub fn key_set_of(defaults: &Map<String, Value>) -> HashSet<String> {
    defaults.keys().cloned().collect()
}

/// Serialize `value` and return the keys of the resulting object.
///
/// # Errors
///
/// [`Error::Serialization`] if serialization fails, or
/// [`Error::InvalidArgument`] if the value does not serialize to an object.
pub fn key_set_of_serialize<T: Serialize + ?Sized>(value: &T) -> Result<HashSet<String>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(key_set_of(&map)),
        other => Err(Error::invalid_argument(format!(
            "expected a value serializing to an object, got {other}"
        ))),
    }
}

// ============================================================================
// KeyCollection
// ============================================================================

/// A collection of keys taking part in a disjointness check.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCollection {
    /// Keys in list order; repeats within the list are allowed
    List(Vec<String>),
    /// Keys in sorted order
    Set(BTreeSet<String>),
    /// An object whose own keys are used
    Object(Map<String, Value>),
}

impl KeyCollection {
    /// Iterate the keys in the collection's natural order.
    pub fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::List(keys) => Box::new(keys.iter().map(String::as_str)),
            Self::Set(keys) => Box::new(keys.iter().map(String::as_str)),
            Self::Object(map) => Box::new(map.keys().map(String::as_str)),
        }
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for KeyCollection {
    fn from(keys: [S; N]) -> Self {
        Self::List(keys.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for KeyCollection {
    fn from(keys: Vec<String>) -> Self {
        Self::List(keys)
    }
}

impl From<BTreeSet<String>> for KeyCollection {
    fn from(keys: BTreeSet<String>) -> Self {
        Self::Set(keys)
    }
}

impl From<HashSet<String>> for KeyCollection {
    fn from(keys: HashSet<String>) -> Self {
        Self::Set(keys.into_iter().collect())
    }
}

impl From<Map<String, Value>> for KeyCollection {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}

impl TryFrom<&Value> for KeyCollection {
    type Error = Error;

    /// Arrays of strings become lists, objects contribute their keys.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => string_list(items).map(Self::List).ok_or_else(|| {
                Error::invalid_argument(format!("expected a list of keys, got {value}"))
            }),
            Value::Object(map) => Ok(Self::Object(map.clone())),
            other => Err(Error::invalid_argument(format!(
                "expected a key list or object, got {other}"
            ))),
        }
    }
}

/// Collect an array of JSON strings, or `None` if any item is not a string.
pub(crate) fn string_list(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

// ============================================================================
// Disjointness
// ============================================================================

#[derive(Default)]
struct DisjointChecker {
    seen: HashSet<String>,
}

impl DisjointChecker {
    fn check(&mut self, index: usize, collection: &KeyCollection) -> Result<()> {
        let mut own = HashSet::new();
        for key in collection.keys() {
            if self.seen.contains(key) {
                log::debug!("Key '{key}' repeated in collection {index}");
                return Err(Error::DuplicateKey {
                    key: key.to_string(),
                    collection: index,
                });
            }
            own.insert(key);
        }
        self.seen.extend(own.into_iter().map(str::to_string));
        Ok(())
    }
}

/// Verify that no key appears in more than one collection.
///
/// Collections are checked in order, each in its natural iteration order.
///
/// # Errors
///
/// [`Error::DuplicateKey`] at the first key already seen in an earlier
/// collection.
pub fn assert_disjoint(collections: &[KeyCollection]) -> Result<()> {
    let mut checker = DisjointChecker::default();
    for (index, collection) in collections.iter().enumerate() {
        checker.check(index, collection)?;
    }
    Ok(())
}

/// Verify disjointness of dynamically typed collections.
///
/// Each value is converted with [`KeyCollection::try_from`] right before its
/// keys are compared, so earlier collections are fully checked before a
/// malformed later one is reported.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a value that is neither a list of strings
/// nor an object, [`Error::DuplicateKey`] as in [`assert_disjoint`].
pub fn assert_disjoint_values(collections: &[Value]) -> Result<()> {
    let mut checker = DisjointChecker::default();
    for (index, value) in collections.iter().enumerate() {
        let collection = KeyCollection::try_from(value)?;
        checker.check(index, &collection)?;
    }
    Ok(())
}
