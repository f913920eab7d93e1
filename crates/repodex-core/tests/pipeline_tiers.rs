//! # Pipeline Tier Tests (T0-T3)
//!
//! Each tier exercises one stage of the pipeline through the public API.
//!
//! ## Tiers
//! - T0: Reference Integrity
//! - T1: Deterministic Classification
//! - T2: Staleness Partitioning
//! - T3: Persist and Render

use chrono::{DateTime, Duration, TimeZone, Utc};
use repodex_core::{
    Bucket, Categorizer, Category, Collector, Columns, Partitioner, Record, RepoId, RepoMetadata,
    RepodexError, TableRenderer, bucket_from_yaml, bucket_to_yaml, parse_reference_list,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0)
        .single()
        .expect("instant")
}

fn live(name: &str, description: &str, pushed_at: DateTime<Utc>, archived: bool) -> Record {
    let repo = RepoId::new("acme", name);
    let meta = RepoMetadata {
        id: Some(1),
        name: name.to_string(),
        owner: "acme".to_string(),
        html_url: format!("https://github.com/acme/{}", name),
        description: description.to_string(),
        pushed_at: Some(pushed_at),
        archived,
    };
    let category = Categorizer::default().classify(name, description).category;
    Record::new(&repo, meta, category)
}

// =============================================================================
// TIER T0: REFERENCE INTEGRITY
// =============================================================================

mod t0_reference_integrity {
    use super::*;

    /// T0.1: Well-formed references yield owner and name.
    #[test]
    fn valid_reference_accepted() {
        let repo = RepoId::parse("https://github.com/rust-lang/cargo").expect("parse");
        assert_eq!((repo.owner(), repo.name()), ("rust-lang", "cargo"));
    }

    /// T0.2: Foreign hosts are rejected.
    #[test]
    fn foreign_host_rejected() {
        let result = RepoId::parse("https://codeberg.org/rust-lang/cargo");
        assert!(matches!(result, Err(RepodexError::InvalidReference(_))));
    }

    /// T0.3: A missing name segment is rejected.
    #[test]
    fn owner_only_rejected() {
        let result = RepoId::parse("https://github.com/rust-lang/");
        assert!(matches!(result, Err(RepodexError::InvalidReference(_))));
    }

    /// T0.4: Input lists drop blank lines and surrounding whitespace.
    #[test]
    fn input_list_normalized() {
        let refs = parse_reference_list("\n  https://github.com/a/b \n\n").expect("parse");
        assert_eq!(refs, vec!["https://github.com/a/b"]);
    }
}

// =============================================================================
// TIER T1: DETERMINISTIC CLASSIFICATION
// =============================================================================

mod t1_classification {
    use super::*;

    /// T1.1: Priority order decides between overlapping keywords.
    #[test]
    fn first_matching_category_wins() {
        let c = Categorizer::default();
        assert_eq!(c.classify("discord-bot-template", "").category, Category::Bots);
    }

    /// T1.2: Identical inputs always yield the identical category.
    #[test]
    fn classification_is_repeatable() {
        let c = Categorizer::default();
        let first = c.classify("landing-page", "A website starter");
        for _ in 0..10 {
            assert_eq!(c.classify("landing-page", "A website starter"), first);
        }
        assert_eq!(first.category, Category::WebsiteTemplates);
    }

    /// T1.3: Every default classification stays inside the enumerated set.
    #[test]
    fn categories_are_closed() {
        let c = Categorizer::default();
        for name in ["x", "api-client", "help-desk", "status-service", "discover"] {
            let category = c.classify(name, "").category;
            assert!(Category::ALL.contains(&category));
        }
    }
}

// =============================================================================
// TIER T2: STALENESS PARTITIONING
// =============================================================================

mod t2_partitioning {
    use super::*;

    /// T2.1: The threshold itself is still valid.
    #[test]
    fn boundary_is_valid() {
        let p = Partitioner::at(now());
        let r = live("edge", "", now() - Duration::days(365), false);
        assert_eq!(p.bucket(&r), Bucket::Valid);
    }

    /// T2.2: One second past the threshold is inactive.
    #[test]
    fn past_boundary_is_inactive() {
        let p = Partitioner::at(now());
        let r = live(
            "edge",
            "",
            now() - Duration::days(365) - Duration::seconds(1),
            false,
        );
        assert_eq!(p.bucket(&r), Bucket::Inactive);
    }

    /// T2.3: A record can be inactive and archived at once.
    #[test]
    fn archived_overlaps_inactive() {
        let p = Partitioner::at(now());
        let partition = p.partition(vec![live("old", "", now() - Duration::days(900), true)]);
        assert_eq!(partition.inactive.len(), 1);
        assert_eq!(partition.archived(), partition.inactive);
    }
}

// =============================================================================
// TIER T3: PERSIST AND RENDER
// =============================================================================

mod t3_persist_render {
    use super::*;

    /// T3.1: End-to-end offline run for a single bot reference.
    #[test]
    fn offline_bot_end_to_end() {
        let collector = Collector::new(Categorizer::default(), Partitioner::at(now()));
        let refs = vec!["https://github.com/acme/my-bot".to_string()];
        let collection = collector.collect_offline(&refs, |_| {});

        assert_eq!(collection.skipped(), 0);
        assert!(collection.partition.inactive.is_empty());
        let record = &collection.partition.valid[0];
        assert_eq!(record.owner, "acme");
        assert_eq!(record.name, "my-bot");
        assert_eq!(record.category, Category::Bots);
        assert_eq!(
            record.badges.last_commit,
            "https://img.shields.io/github/last-commit/acme/my-bot?style=flat-square"
        );

        let yaml = bucket_to_yaml(&collection.partition.valid).expect("encode");
        let stored = bucket_from_yaml(&yaml).expect("decode");
        assert_eq!(stored, collection.partition.valid);

        let doc = TableRenderer::new(Columns::for_bucket(Bucket::Valid)).render(&stored);
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines.iter().filter(|l| l.starts_with("## ")).count(), 1);
        assert_eq!(lines[0], "## Bots");

        let header = lines[2];
        assert_eq!(header.matches(" | ").count() + 1, 6);
        assert!(lines[4].starts_with("| [my-bot](https://github.com/acme/my-bot) |"));
    }

    /// T3.2: Persisting preserves insertion order; rendering sorts.
    #[test]
    fn storage_keeps_order_render_sorts() {
        let records = vec![
            live("zulu-bot", "", now(), false),
            live("Alpha-bot", "", now(), false),
        ];
        let stored = bucket_from_yaml(&bucket_to_yaml(&records).expect("encode")).expect("decode");
        assert_eq!(stored[0].name, "zulu-bot");

        let doc = TableRenderer::default().render(&stored);
        let alpha = doc.find("[Alpha-bot]").expect("alpha");
        let zulu = doc.find("[zulu-bot]").expect("zulu");
        assert!(alpha < zulu);
    }
}
