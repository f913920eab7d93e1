//! # Reference Parsing
//!
//! Turns an input reference (a repository web URL) into an owner/name pair.
//!
//! - Host must be the source site, with or without `www.`, on the default
//!   port (hostnames compare case-insensitively)
//! - First path segment is the owner, second is the repository name
//! - Trailing slashes and extra segments (`/tree/main`, `/issues`) are ignored
//! - No network access; this is a pure string transformation

use crate::primitives::{
    MAX_REFERENCE_COUNT, MAX_REFERENCE_LENGTH, SOURCE_HOST, SOURCE_HOST_WWW,
};
use crate::RepodexError;
use url::Url;

/// Owner/name identifier of a repository on the source site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Build an identifier from already-validated parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a reference string.
    ///
    /// Returns `RepodexError::InvalidReference` when the string is not a
    /// URL on the source site or lacks an owner or name segment.
    pub fn parse(reference: &str) -> Result<Self, RepodexError> {
        let invalid = || RepodexError::InvalidReference(reference.to_string());

        if reference.len() > MAX_REFERENCE_LENGTH {
            return Err(invalid());
        }

        let url = Url::parse(reference.trim_end_matches('/')).map_err(|_| invalid())?;
        match url.host_str() {
            Some(SOURCE_HOST | SOURCE_HOST_WWW) => {}
            _ => return Err(invalid()),
        }
        if url.port().is_some() {
            return Err(invalid());
        }

        let mut segments = url.path().trim_matches('/').split('/');
        let owner = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(owner, name))
    }

    /// Account or organization name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name` form used by the source site's API.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// =============================================================================
// INPUT LIST
// =============================================================================

/// Split an input list document into reference strings.
///
/// One reference per line; surrounding whitespace is trimmed, blank lines
/// and `#` comment lines are skipped. References are not validated here.
pub fn parse_reference_list(text: &str) -> Result<Vec<String>, RepodexError> {
    let references: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if references.len() > MAX_REFERENCE_COUNT {
        return Err(RepodexError::Configuration(format!(
            "Input list has {} references, maximum is {}",
            references.len(),
            MAX_REFERENCE_COUNT
        )));
    }

    Ok(references)
}

// =============================================================================
// TESTS
// =============================================================================
