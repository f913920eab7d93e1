//! # Core Type Definitions
//!
//! This module contains the closed data model of the catalog:
//! - Classification (`Category`)
//! - Badge display URLs (`BadgeKind`, `Badges`)
//! - Fetched metadata and the persisted unit (`RepoMetadata`, `Record`)
//! - Error types (`RepodexError`)
//!
//! ## Determinism Guarantees
//!
//! - `Category` implements `Ord` in priority order, so it can key `BTreeMap`s
//! - Badge URLs are a pure function of owner and name
//! - Records are immutable values; there are no setters

use crate::primitives::{BADGE_BASE_URL, BADGE_STYLE};
use crate::reference::RepoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// The fixed set of categories a record can belong to.
///
/// Variants are declared in classification priority order: the default
/// rule table is evaluated top to bottom in this same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Bots")]
    Bots,
    #[serde(rename = "Dashboards")]
    Dashboards,
    #[serde(rename = "Bot Templates")]
    BotTemplates,
    #[serde(rename = "Developer Tools")]
    DeveloperTools,
    #[serde(rename = "Libraries")]
    Libraries,
    #[serde(rename = "Website Templates")]
    WebsiteTemplates,
    #[serde(rename = "Discovery Sites")]
    DiscoverySites,
    #[serde(rename = "Platforms")]
    Platforms,
    #[serde(rename = "Solutions")]
    Solutions,
    #[serde(rename = "Uncategorized")]
    Uncategorized,
}

impl Category {
    /// Every category, in priority order.
    pub const ALL: [Category; 10] = [
        Category::Bots,
        Category::Dashboards,
        Category::BotTemplates,
        Category::DeveloperTools,
        Category::Libraries,
        Category::WebsiteTemplates,
        Category::DiscoverySites,
        Category::Platforms,
        Category::Solutions,
        Category::Uncategorized,
    ];

    /// Display label, as written in documents and headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Bots => "Bots",
            Category::Dashboards => "Dashboards",
            Category::BotTemplates => "Bot Templates",
            Category::DeveloperTools => "Developer Tools",
            Category::Libraries => "Libraries",
            Category::WebsiteTemplates => "Website Templates",
            Category::DiscoverySites => "Discovery Sites",
            Category::Platforms => "Platforms",
            Category::Solutions => "Solutions",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Resolve a display label back to a category.
    ///
    /// Returns `None` for labels outside the enumerated set.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// BADGES
// =============================================================================

/// The four badge kinds attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BadgeKind {
    StarCount,
    LastCommit,
    TopLanguage,
    License,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::StarCount,
        BadgeKind::LastCommit,
        BadgeKind::TopLanguage,
        BadgeKind::License,
    ];

    /// shields.io path segment for this badge.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            BadgeKind::StarCount => "stars",
            BadgeKind::LastCommit => "last-commit",
            BadgeKind::TopLanguage => "languages/top",
            BadgeKind::License => "license",
        }
    }

    /// Build the display URL of this badge for a repository.
    #[must_use]
    pub fn url_for(self, owner: &str, name: &str) -> String {
        format!(
            "{}/{}/{}/{}?{}",
            BADGE_BASE_URL,
            self.path(),
            owner,
            name,
            BADGE_STYLE
        )
    }
}

/// Badge kind → display URL, persisted as a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badges {
    pub star_count: String,
    pub last_commit: String,
    pub top_language: String,
    pub license: String,
}

impl Badges {
    /// Derive the four badge URLs for a repository.
    #[must_use]
    pub fn for_repo(repo: &RepoId) -> Self {
        let (owner, name) = (repo.owner(), repo.name());
        Self {
            star_count: BadgeKind::StarCount.url_for(owner, name),
            last_commit: BadgeKind::LastCommit.url_for(owner, name),
            top_language: BadgeKind::TopLanguage.url_for(owner, name),
            license: BadgeKind::License.url_for(owner, name),
        }
    }

    /// Display URL of one badge kind.
    #[must_use]
    pub fn get(&self, kind: BadgeKind) -> &str {
        match kind {
            BadgeKind::StarCount => &self.star_count,
            BadgeKind::LastCommit => &self.last_commit,
            BadgeKind::TopLanguage => &self.top_language,
            BadgeKind::License => &self.license,
        }
    }
}

// =============================================================================
// REPO METADATA (fetch result)
// =============================================================================

/// Metadata describing one repository, before classification.
///
/// Produced either by a live [`MetadataSource`](crate::MetadataSource)
/// fetch or offline from the reference alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    /// Numeric id assigned by the source site.
    pub id: Option<u64>,
    /// Repository short name.
    pub name: String,
    /// Owning account or organization.
    pub owner: String,
    /// Canonical web URL.
    pub html_url: String,
    /// Free-text description, empty when absent.
    pub description: String,
    /// Last push time. `None` when no live fetch happened.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Whether the repository is archived upstream.
    pub archived: bool,
}

impl RepoMetadata {
    /// Metadata for an offline entry: everything comes from the reference.
    #[must_use]
    pub fn offline(repo: &RepoId, reference: &str) -> Self {
        Self {
            id: None,
            name: repo.name().to_string(),
            owner: repo.owner().to_string(),
            html_url: reference.to_string(),
            description: String::new(),
            pushed_at: None,
            archived: false,
        }
    }

    /// True when the metadata came from a live fetch.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.pushed_at.is_some()
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One cataloged repository, as persisted in a bucket document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "author")]
    pub owner: String,
    #[serde(rename = "source")]
    pub source_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "pushed_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
    pub category: Category,
    pub badges: Badges,
}

impl Record {
    /// Assemble a record from metadata and its assigned category.
    ///
    /// Badges are derived from the parsed reference, not from the
    /// metadata, so a renamed upstream repository keeps working links.
    #[must_use]
    pub fn new(repo: &RepoId, metadata: RepoMetadata, category: Category) -> Self {
        Self {
            name: metadata.name,
            id: metadata.id,
            owner: metadata.owner,
            source_url: metadata.html_url,
            description: metadata.description,
            updated_at: metadata.pushed_at,
            archived: metadata.archived,
            category,
            badges: Badges::for_repo(repo),
        }
    }

    /// True when the record was built from a live fetch.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.updated_at.is_some()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in repodex.
///
/// `InvalidReference` and `Fetch` are per-item: the collector captures them
/// and moves on. `Configuration`, `Persistence` and `Io` are fatal for the
/// operation that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepodexError {
    /// The reference string does not name a repository on the source site.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The remote metadata lookup failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Missing or unusable configuration (credential, input list, config file).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A bucket document could not be encoded or decoded.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RepodexError {
    /// True for errors confined to a single reference.
    #[must_use]
    pub fn is_per_item(&self) -> bool {
        matches!(self, Self::InvalidReference(_) | Self::Fetch(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
