//! Property partitioning.
//!
//! [`select`] splits the properties of a source object into one bucket per
//! selector, in selector order, plus a trailing leftovers bucket. A key goes
//! to the first selector that names it; keys no selector names go to the
//! leftovers.
//!
//! A [`Selector::Defaults`] selector names the keys of its object and also
//! seeds its bucket with those key/value pairs, so source values override
//! defaults and unmatched defaults are kept.
//!
//! # Example
//!
//! ```
//! use grabbag::util::select::{select, Selector};
//! use serde_json::json;
//!
//! let source = json!({"one": 1, "two": 2, "three": 3});
//! let buckets = select(source.as_object(), &[Selector::keys(["one"]), Selector::keys(["two"])]);
//!
//! assert_eq!(buckets.len(), 3);
//! assert_eq!(buckets[0]["one"], 1);
//! assert_eq!(buckets[1]["two"], 2);
//! assert_eq!(buckets[2]["three"], 3);
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::util::keys::string_list;

/// A property object: string keys to JSON values.
pub type Object = Map<String, Value>;

/// Selects the keys that go into one output bucket.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// An explicit list of key names
    KeyList(Vec<String>),
    /// A set of key names
    KeySet(BTreeSet<String>),
    /// Default values; their keys are selected and seed the bucket
    Defaults(Object),
}

impl Selector {
    /// A key-list selector.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::KeyList(keys.into_iter().map(Into::into).collect())
    }

    /// A key-set selector.
    pub fn key_set<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::KeySet(keys.into_iter().map(Into::into).collect())
    }

    /// A defaults selector.
    pub fn defaults(defaults: Object) -> Self {
        Self::Defaults(defaults)
    }

    /// A defaults selector built from any serializable value.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] if serialization fails, or
    /// [`Error::InvalidArgument`] if the value is not an object.
    pub fn defaults_from<T: Serialize + ?Sized>(defaults: &T) -> Result<Self> {
        match serde_json::to_value(defaults)? {
            Value::Object(map) => Ok(Self::Defaults(map)),
            other => Err(Error::invalid_argument(format!(
                "defaults must serialize to an object, got {other}"
            ))),
        }
    }

    fn normalize(&self) -> (HashSet<&str>, Object) {
        match self {
            Self::KeyList(keys) => (keys.iter().map(String::as_str).collect(), Object::new()),
            Self::KeySet(keys) => (keys.iter().map(String::as_str).collect(), Object::new()),
            Self::Defaults(defaults) => (
                defaults.keys().map(String::as_str).collect(),
                defaults.clone(),
            ),
        }
    }
}

impl From<Object> for Selector {
    fn from(defaults: Object) -> Self {
        Self::Defaults(defaults)
    }
}

impl From<Vec<String>> for Selector {
    fn from(keys: Vec<String>) -> Self {
        Self::KeyList(keys)
    }
}

impl From<BTreeSet<String>> for Selector {
    fn from(keys: BTreeSet<String>) -> Self {
        Self::KeySet(keys)
    }
}

impl TryFrom<&Value> for Selector {
    type Error = Error;

    /// Arrays of strings become key lists, objects become defaults.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => string_list(items).map(Self::KeyList).ok_or_else(|| {
                Error::invalid_argument(format!("selector lists must hold strings, got {value}"))
            }),
            Value::Object(map) => Ok(Self::Defaults(map.clone())),
            other => Err(Error::invalid_argument(format!(
                "expected a key list or defaults object selector, got {other}"
            ))),
        }
    }
}

/// Partition `source` into one bucket per selector plus leftovers.
///
/// Always returns `selectors.len() + 1` buckets. A `None` source yields the
/// seeded buckets and an empty leftovers bucket. Neither the source nor the
/// selectors are modified.
pub fn select(source: Option<&Object>, selectors: &[Selector]) -> Vec<Object> {
    let (key_sets, mut buckets): (Vec<HashSet<&str>>, Vec<Object>) =
        selectors.iter().map(Selector::normalize).unzip();
    let mut leftovers = Object::new();

    if let Some(source) = source {
        for (key, value) in source {
            let target = key_sets
                .iter()
                .position(|keys| keys.contains(key.as_str()));
            log::trace!("Assigning '{key}' to bucket {target:?}");
            let bucket = match target {
                Some(index) => &mut buckets[index],
                None => &mut leftovers,
            };
            bucket.insert(key.clone(), value.clone());
        }
    }

    log::debug!(
        "Partitioned {} keys into {} buckets ({} left over)",
        source.map_or(0, Map::len),
        selectors.len() + 1,
        leftovers.len()
    );

    buckets.push(leftovers);
    buckets
}

/// Partition dynamically typed input.
///
/// A `null` source is treated as absent. Each selector is converted with
/// [`Selector::try_from`].
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the source is neither `null` nor an
/// object, or if a selector is malformed.
pub fn select_values(source: &Value, selectors: &[Value]) -> Result<Vec<Object>> {
    let source = match source {
        Value::Null => None,
        Value::Object(map) => Some(map),
        other => {
            return Err(Error::invalid_argument(format!(
                "expected an object or null source, got {other}"
            )));
        }
    };

    let selectors = selectors
        .iter()
        .map(Selector::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(select(source, &selectors))
}

/// Partition the serialized form of a typed source.
///
/// # Errors
///
/// [`Error::Serialization`] if serialization fails, or
/// [`Error::InvalidArgument`] if the source serializes to something other
/// than an object or `null`.
pub fn select_serialize<T: Serialize + ?Sized>(
    source: &T,
    selectors: &[Selector],
) -> Result<Vec<Object>> {
    match serde_json::to_value(source)? {
        Value::Null => Ok(select(None, selectors)),
        Value::Object(map) => Ok(select(Some(&map), selectors)),
        other => Err(Error::invalid_argument(format!(
            "expected a source serializing to an object, got {other}"
        ))),
    }
}
