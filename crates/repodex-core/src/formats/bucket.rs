//! # Bucket Document Format
//!
//! YAML serialization for bucket documents.
//!
//! Format: a single mapping with one key, `repositories`, whose value is
//! the ordered record list:
//!
//! ```yaml
//! repositories:
//! - name: my-bot
//!   author: acme
//!   source: https://github.com/acme/my-bot
//!   ...
//! ```
//!
//! - Records are written in insertion order, never re-sorted
//! - A document without the key (or an empty document) loads as an empty list

use crate::{Record, RepodexError};
use serde::{Deserialize, Serialize};

/// Top-level shape of a bucket document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDocument {
    #[serde(default)]
    pub repositories: Vec<Record>,
}

/// Serialize records to a bucket document.
///
/// This is a pure transformation - no file I/O.
pub fn bucket_to_yaml(records: &[Record]) -> Result<String, RepodexError> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        repositories: &'a [Record],
    }

    serde_yaml::to_string(&Borrowed {
        repositories: records,
    })
    .map_err(|e| RepodexError::Persistence(format!("Failed to encode bucket: {}", e)))
}

/// Deserialize records from a bucket document.
///
/// This is a pure transformation - no file I/O.
pub fn bucket_from_yaml(text: &str) -> Result<Vec<Record>, RepodexError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    // `null` / `~` documents carry no mapping at all
    let document: Option<BucketDocument> = serde_yaml::from_str(text)
        .map_err(|e| RepodexError::Persistence(format!("Failed to decode bucket: {}", e)))?;

    Ok(document.map(|d| d.repositories).unwrap_or_default())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, RepoId, RepoMetadata};
    use chrono::{TimeZone, Utc};

    fn live_record() -> Record {
        let repo = RepoId::new("acme", "dash");
        let meta = RepoMetadata {
            id: Some(480_281_047),
            name: "dash".to_string(),
            owner: "acme".to_string(),
            html_url: "https://github.com/acme/dash".to_string(),
            description: "Server dashboard: stats & more".to_string(),
            pushed_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single(),
            archived: true,
        };
        Record::new(&repo, meta, Category::Dashboards)
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let offline = Record::new(
            &RepoId::new("acme", "my-bot"),
            RepoMetadata::offline(
                &RepoId::new("acme", "my-bot"),
                "https://github.com/acme/my-bot",
            ),
            Category::Bots,
        );
        let records = vec![live_record(), offline];

        let yaml = bucket_to_yaml(&records).expect("encode");
        let restored = bucket_from_yaml(&yaml).expect("decode");

        assert_eq!(restored, records);
    }

    #[test]
    fn document_uses_single_top_level_key() {
        let yaml = bucket_to_yaml(&[live_record()]).expect("encode");
        assert!(yaml.starts_with("repositories:"));
        assert!(yaml.contains("author: acme"));
        assert!(yaml.contains("category: Dashboards"));
        assert!(yaml.contains("star_count:"));
    }

    #[test]
    fn offline_record_omits_timestamp() {
        let repo = RepoId::new("acme", "x");
        let record = Record::new(
            &repo,
            RepoMetadata::offline(&repo, "https://github.com/acme/x"),
            Category::Uncategorized,
        );
        let yaml = bucket_to_yaml(&[record]).expect("encode");
        assert!(!yaml.contains("pushed_at"));
        assert!(!yaml.contains("id:"));
    }

    #[test]
    fn missing_key_is_empty() {
        assert!(bucket_from_yaml("other: 1\n").expect("decode").is_empty());
        assert!(bucket_from_yaml("").expect("decode").is_empty());
        assert!(bucket_from_yaml("~\n").expect("decode").is_empty());
    }

    #[test]
    fn empty_bucket_roundtrip() {
        let yaml = bucket_to_yaml(&[]).expect("encode");
        assert!(bucket_from_yaml(&yaml).expect("decode").is_empty());
    }

    #[test]
    fn malformed_document_is_persistence_error() {
        let result = bucket_from_yaml("repositories: [ {name: ");
        assert!(matches!(result, Err(RepodexError::Persistence(_))));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let yaml = "repositories:\n- name: a\n  author: b\n  source: s\n  category: Games\n  badges: {star_count: x, last_commit: x, top_language: x, license: x}\n";
        assert!(bucket_from_yaml(yaml).is_err());
    }
}
