//! Integration tests for CI detection.

use grabbag::util::ci::is_continuous_integration_with;
use grabbag::{CiOverrides, is_continuous_integration};

#[test]
fn test_overrides_win() {
    assert!(is_continuous_integration(Some(&CiOverrides::forced(true))));
    assert!(!is_continuous_integration(Some(&CiOverrides::forced(false))));
}

#[test]
fn test_empty_overrides_match_environment() {
    assert_eq!(
        is_continuous_integration(Some(&CiOverrides::default())),
        is_continuous_integration(None)
    );
}

#[test]
fn test_unset_environment_is_not_ci() {
    assert!(!is_continuous_integration_with(None, |_| None));
}

#[test]
fn test_overrides_embedded_in_app_config() {
    #[derive(serde::Deserialize)]
    struct AppConfig {
        #[serde(default)]
        ci: CiOverrides,
    }

    let config: AppConfig = toml::from_str("[ci]\nCI = false\n").unwrap();
    assert!(!is_continuous_integration_with(Some(&config.ci), |_| {
        Some("1".to_string())
    }));

    let config: AppConfig = toml::from_str("").unwrap();
    assert!(is_continuous_integration_with(Some(&config.ci), |name| {
        (name == "RUN_ID").then(|| "1234".to_string())
    }));
}
