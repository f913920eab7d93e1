//! Unit tests for settings layering and credential validation.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use repodex::config::{Credential, DEFAULT_API_BASE, Settings};
use repodex_core::{Category, DisabledBehavior, RepodexError};
use std::path::PathBuf;

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.staleness_days, 365);
    assert_eq!(settings.fallback().unwrap(), Category::Uncategorized);
    assert_eq!(settings.when_disabled, DisabledBehavior::Fallback);
    assert_eq!(settings.data_dir, PathBuf::from("data"));
    assert_eq!(settings.output_dir, PathBuf::from("readme"));
    assert_eq!(settings.api_base, DEFAULT_API_BASE);
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
}

#[test]
fn test_toml_overrides() {
    let settings = Settings::from_toml(
        r#"
staleness_days = 180
fallback_category = "Solutions"
when_disabled = "keywords"
data_dir = "out/data"

[[categories]]
name = "Libraries"
keywords = ["crate", "lib"]
"#,
    )
    .unwrap();

    assert_eq!(settings.staleness_days, 180);
    assert_eq!(settings.fallback().unwrap(), Category::Solutions);
    assert_eq!(settings.when_disabled, DisabledBehavior::Keywords);
    assert_eq!(settings.data_dir, PathBuf::from("out/data"));
    assert_eq!(settings.categories.len(), 1);

    let categorizer = settings.categorizer(true).unwrap();
    assert_eq!(categorizer.classify("serde-crate", "").category, Category::Libraries);
    assert_eq!(categorizer.classify("my-bot", "").category, Category::Solutions);
}

#[test]
fn test_configured_unknown_label_falls_back() {
    let settings = Settings::from_toml(
        r#"
[[categories]]
name = "Games"
keywords = ["game"]
"#,
    )
    .unwrap();

    let result = settings.categorizer(true).unwrap().classify("chess-game", "");
    assert_eq!(result.category, Category::Uncategorized);
    assert!(result.fell_back);
}

#[test]
fn test_disabled_classification_uses_fallback() {
    let settings = Settings::from_toml("fallback_category = \"Platforms\"").unwrap();
    let categorizer = settings.categorizer(false).unwrap();
    assert_eq!(categorizer.classify("my-bot", "").category, Category::Platforms);
}

#[test]
fn test_unknown_fallback_rejected() {
    let result = Settings::from_toml("fallback_category = \"Games\"");
    assert!(matches!(result, Err(RepodexError::Configuration(_))));
}

#[test]
fn test_unknown_key_rejected() {
    let result = Settings::from_toml("stale_days = 10");
    assert!(matches!(result, Err(RepodexError::Configuration(_))));
}

#[test]
fn test_negative_staleness_rejected() {
    let result = Settings::from_toml("staleness_days = -1");
    assert!(matches!(result, Err(RepodexError::Configuration(_))));
}

#[test]
fn test_env_overrides() {
    let settings = Settings::default()
        .with_env(|key| match key {
            "REPODEX_DATA_DIR" => Some("/tmp/buckets".to_string()),
            "REPODEX_STALENESS_DAYS" => Some(" 30 ".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(settings.data_dir, PathBuf::from("/tmp/buckets"));
    assert_eq!(settings.output_dir, PathBuf::from("readme"));
    assert_eq!(settings.staleness_days, 30);
}

#[test]
fn test_env_bad_staleness_rejected() {
    let result = Settings::default().with_env(|key| {
        (key == "REPODEX_STALENESS_DAYS").then(|| "a year".to_string())
    });
    assert!(matches!(result, Err(RepodexError::Configuration(_))));
}

#[test]
fn test_missing_explicit_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::from_file(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(RepodexError::Configuration(_))));
}

// =============================================================================
// CREDENTIAL TESTS
// =============================================================================

#[test]
fn test_credential_accepts_real_token() {
    let credential = Credential::from_value(Some("  ghp_realtoken  ".to_string())).unwrap();
    assert_eq!(credential.expose(), "ghp_realtoken");
}

#[test]
fn test_credential_rejects_missing_empty_and_placeholder() {
    for value in [None, Some(String::new()), Some("   ".to_string()), Some("ghp_example_token".to_string())] {
        assert!(matches!(
            Credential::from_value(value),
            Err(RepodexError::Configuration(_))
        ));
    }
}

#[test]
fn test_credential_debug_is_redacted() {
    let credential = Credential::from_value(Some("secret".to_string())).unwrap();
    assert!(!format!("{:?}", credential).contains("secret"));
}
