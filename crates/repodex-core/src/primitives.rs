//! # Innate Primitives
//!
//! Hardcoded constants for the repodex CORE.
//!
//! These values are compiled into the binary. Anything an operator may
//! want to change (threshold, rule table, fallback category) has a runtime
//! override in the app configuration; the constants here are the defaults.

/// Hostname every reference must point at.
pub const SOURCE_HOST: &str = "github.com";

/// Alternate spelling of [`SOURCE_HOST`] accepted by the parser.
pub const SOURCE_HOST_WWW: &str = "www.github.com";

/// Default staleness threshold, in days.
///
/// A live-fetched record whose last push is strictly older than this is
/// inactive.
pub const DEFAULT_STALENESS_DAYS: i64 = 365;

/// Base URL for generated badges.
pub const BADGE_BASE_URL: &str = "https://img.shields.io/github";

/// Query string appended to every badge URL.
pub const BADGE_STYLE: &str = "style=flat-square";

/// Top-level key of a persisted bucket document.
pub const BUCKET_KEY: &str = "repositories";

/// Placeholder token shipped in sample `.env` files.
///
/// A credential equal to this value is treated as missing.
pub const PLACEHOLDER_TOKEN: &str = "ghp_example_token";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a single reference string.
///
/// Longer lines are rejected as `InvalidReference` before URL parsing.
pub const MAX_REFERENCE_LENGTH: usize = 2048;

/// Maximum number of references in one input list.
pub const MAX_REFERENCE_COUNT: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staleness_default_is_one_year() {
        assert_eq!(DEFAULT_STALENESS_DAYS, 365);
    }

    #[test]
    fn www_host_extends_source_host() {
        assert_eq!(SOURCE_HOST_WWW, format!("www.{SOURCE_HOST}"));
    }
}
