//! Continuous-integration environment detection.
//!
//! The process is considered to run under CI when any of the variables in
//! [`CI_ENV_VARS`] is set to a non-empty value. The value itself is not
//! interpreted: `CI=false` still counts as set.
//!
//! Tests and embedding applications can bypass the environment with
//! [`CiOverrides`].
//!
//! # Example
//!
//! ```
//! use grabbag::util::ci::{is_continuous_integration, CiOverrides};
//!
//! let forced = CiOverrides::forced(false);
//! assert!(!is_continuous_integration(Some(&forced)));
//! ```

use std::env;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Environment variables that indicate a CI run.
pub const CI_ENV_VARS: &[&str] = &["CI", "CONTINUOUS_INTEGRATION", "BUILD_NUMBER", "RUN_ID"];

/// Caller-supplied overrides for CI detection.
///
/// Deserializable so it can sit inside an application's own config file:
///
/// ```toml
/// [ci]
/// CI = true
/// ```
///
/// Non-boolean values are coerced: `0`, `""` and `false` are false, other
/// numbers, strings, lists and tables are true. `null` counts as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CiOverrides {
    /// Forced CI flag; `None` falls through to the environment
    #[serde(alias = "CI", deserialize_with = "deserialize_truthy")]
    pub ci: Option<bool>,
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| is_truthy(&v)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl CiOverrides {
    /// Overrides that force the CI flag to `ci`.
    pub fn forced(ci: bool) -> Self {
        Self { ci: Some(ci) }
    }
}

/// Determine whether the process runs under continuous integration.
///
/// An explicit `ci` override wins, including `false`. Otherwise the
/// process environment is inspected.
pub fn is_continuous_integration(overrides: Option<&CiOverrides>) -> bool {
    is_continuous_integration_with(overrides, |name| env::var(name).ok())
}

/// Same as [`is_continuous_integration`] with an injectable variable lookup.
pub fn is_continuous_integration_with<F>(overrides: Option<&CiOverrides>, lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ci) = overrides.and_then(|o| o.ci) {
        log::debug!("CI detection overridden: {ci}");
        return ci;
    }

    let detected = CI_ENV_VARS
        .iter()
        .find(|name| lookup(name).is_some_and(|value| !value.is_empty()));

    match detected {
        Some(name) => {
            log::debug!("CI detected via {name}");
            true
        }
        None => false,
    }
}
