//! # Configuration
//!
//! Settings are layered, highest precedence first:
//! 1. CLI flags (applied by the command layer)
//! 2. Environment variables (`REPODEX_DATA_DIR`, `REPODEX_OUTPUT_DIR`,
//!    `REPODEX_STALENESS_DAYS`)
//! 3. `repodex.toml` (optional; a missing default file means defaults)
//! 4. Built-in defaults
//!
//! The GitHub credential is handled separately by [`Credential`]: it is
//! read once at startup and injected into the client.

use chrono::{DateTime, Duration, Utc};
use repodex_core::{
    Categorizer, Category, CategoryRule, DisabledBehavior, Partitioner, RepodexError, RuleTable,
    primitives::{DEFAULT_STALENESS_DAYS, PLACEHOLDER_TOKEN},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "repodex.toml";

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Upper bound for `staleness_days` (about a thousand years).
const MAX_STALENESS_DAYS: i64 = 365_000;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

// =============================================================================
// SETTINGS
// =============================================================================

/// Runtime settings for collect and render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Age, in days, after which a live-fetched repository is inactive.
    pub staleness_days: i64,
    /// Label of the category used when nothing else applies.
    pub fallback_category: String,
    /// Behavior of `--no-classify`.
    pub when_disabled: DisabledBehavior,
    /// Directory of the bucket documents.
    pub data_dir: PathBuf,
    /// Directory of the rendered tables.
    pub output_dir: PathBuf,
    /// GitHub REST base URL.
    pub api_base: String,
    /// Per-request timeout for metadata fetches.
    pub request_timeout_secs: u64,
    /// Replacement rule table. Empty means the built-in table.
    pub categories: Vec<CategoryRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            staleness_days: DEFAULT_STALENESS_DAYS,
            fallback_category: Category::Uncategorized.label().to_string(),
            when_disabled: DisabledBehavior::Fallback,
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("readme"),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
            categories: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file and the process environment.
    ///
    /// An explicitly requested file must exist; the default file is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self, RepodexError> {
        let settings = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        settings.with_env(|key| std::env::var(key).ok())
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, RepodexError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RepodexError::Configuration(format!(
                "Cannot read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&text)
    }

    /// Parse settings from TOML text and validate them.
    pub fn from_toml(text: &str) -> Result<Self, RepodexError> {
        let settings: Self = toml::from_str(text)
            .map_err(|e| RepodexError::Configuration(format!("Invalid config: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment overrides through a lookup function.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, RepodexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("REPODEX_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("REPODEX_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(days) = lookup("REPODEX_STALENESS_DAYS") {
            self.staleness_days = days.trim().parse().map_err(|_| {
                RepodexError::Configuration(format!(
                    "REPODEX_STALENESS_DAYS must be a whole number of days, got '{}'",
                    days
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), RepodexError> {
        if !(0..=MAX_STALENESS_DAYS).contains(&self.staleness_days) {
            return Err(RepodexError::Configuration(format!(
                "staleness_days must be between 0 and {}, got {}",
                MAX_STALENESS_DAYS, self.staleness_days
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(RepodexError::Configuration(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        self.fallback()?;
        Ok(())
    }

    /// The designated fallback category.
    pub fn fallback(&self) -> Result<Category, RepodexError> {
        Category::from_label(&self.fallback_category).ok_or_else(|| {
            RepodexError::Configuration(format!(
                "Unknown fallback_category '{}'",
                self.fallback_category
            ))
        })
    }

    /// Build the categorizer for a run.
    pub fn categorizer(&self, classify: bool) -> Result<Categorizer, RepodexError> {
        let rules = if self.categories.is_empty() {
            RuleTable::default()
        } else {
            RuleTable::new(self.categories.clone())
        };
        Ok(Categorizer::new(rules)
            .with_fallback(self.fallback()?)
            .enabled(classify)
            .when_disabled(self.when_disabled))
    }

    /// Build the partitioner for a run at `now`.
    pub fn partitioner(&self, now: DateTime<Utc>) -> Partitioner {
        Partitioner::new(Duration::days(self.staleness_days), now)
    }

    /// Request timeout as a std duration.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// CREDENTIAL
// =============================================================================

/// GitHub access token.
///
/// Construction fails when the token is absent, blank, or still the sample
/// placeholder. `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Read the token from `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self, RepodexError> {
        Self::from_value(std::env::var(TOKEN_ENV).ok())
    }

    /// Validate a raw token value.
    pub fn from_value(value: Option<String>) -> Result<Self, RepodexError> {
        let token = value.map(|v| v.trim().to_string()).unwrap_or_default();
        if token.is_empty() || token == PLACEHOLDER_TOKEN {
            return Err(RepodexError::Configuration(format!(
                "No GitHub token could be found; set {} (the sample value '{}' does not count)",
                TOKEN_ENV, PLACEHOLDER_TOKEN
            )));
        }
        Ok(Self(token))
    }

    /// The raw token, for the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
