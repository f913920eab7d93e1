//! # Collector
//!
//! Per-item pipeline: parse → fetch → categorize → partition.
//!
//! Each reference is processed to completion before the next one starts.
//! Failures are captured per item as an [`ItemOutcome`] and never abort
//! the run; the caller inspects them for logging only.
//!
//! The remote lookup is the [`MetadataSource`] seam. The CORE ships no
//! implementation of it; the app provides one over HTTP, tests provide
//! in-memory ones.

use crate::categorizer::Categorizer;
use crate::partition::{Bucket, Partition, Partitioner};
use crate::{Category, Record, RepoId, RepoMetadata, RepodexError};
use std::future::Future;

// =============================================================================
// METADATA SOURCE
// =============================================================================

/// Remote lookup of repository metadata.
///
/// Implementors return `RepodexError::Fetch` for any lookup failure
/// (not found, rate limited, transport error), carrying the provider's
/// message when one is available.
pub trait MetadataSource {
    fn fetch(
        &self,
        repo: &RepoId,
    ) -> impl Future<Output = Result<RepoMetadata, RepodexError>> + Send;
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Where a successfully processed reference ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub category: Category,
    pub bucket: Bucket,
    /// The classifier substituted the fallback category.
    pub fell_back: bool,
}

/// Result of processing one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// 1-based position in the input list.
    pub index: usize,
    pub reference: String,
    pub result: Result<Placement, RepodexError>,
}

/// Everything a collection run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub partition: Partition,
    pub outcomes: Vec<ItemOutcome>,
}

impl Collection {
    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Number of skipped references.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.failures().count()
    }
}

// =============================================================================
// COLLECTOR
// =============================================================================

/// Runs the per-item pipeline over a reference list.
#[derive(Debug, Clone)]
pub struct Collector {
    categorizer: Categorizer,
    partitioner: Partitioner,
}

impl Collector {
    #[must_use]
    pub fn new(categorizer: Categorizer, partitioner: Partitioner) -> Self {
        Self {
            categorizer,
            partitioner,
        }
    }

    /// Build records from the references alone, without any fetch.
    ///
    /// Offline records carry no timestamp and are therefore always valid.
    pub fn collect_offline(
        &self,
        references: &[String],
        mut observe: impl FnMut(&ItemOutcome),
    ) -> Collection {
        let mut collection = Collection::default();
        for (i, reference) in references.iter().enumerate() {
            let result = RepoId::parse(reference).map(|repo| {
                let metadata = RepoMetadata::offline(&repo, reference);
                self.place(&mut collection.partition, &repo, metadata)
            });
            let outcome = ItemOutcome {
                index: i + 1,
                reference: reference.clone(),
                result,
            };
            observe(&outcome);
            collection.outcomes.push(outcome);
        }
        collection
    }

    /// Fetch metadata for each reference, one at a time.
    pub async fn collect_live<S: MetadataSource>(
        &self,
        source: &S,
        references: &[String],
        mut observe: impl FnMut(&ItemOutcome),
    ) -> Collection {
        let mut collection = Collection::default();
        for (i, reference) in references.iter().enumerate() {
            let result = match RepoId::parse(reference) {
                Ok(repo) => source
                    .fetch(&repo)
                    .await
                    .map(|metadata| self.place(&mut collection.partition, &repo, metadata)),
                Err(e) => Err(e),
            };
            let outcome = ItemOutcome {
                index: i + 1,
                reference: reference.clone(),
                result,
            };
            observe(&outcome);
            collection.outcomes.push(outcome);
        }
        collection
    }

    /// Classify, build the record and append it to its bucket.
    fn place(
        &self,
        partition: &mut Partition,
        repo: &RepoId,
        metadata: RepoMetadata,
    ) -> Placement {
        let classification = self
            .categorizer
            .classify(&metadata.name, &metadata.description);
        let record = Record::new(repo, metadata, classification.category);
        let bucket = self.partitioner.bucket(&record);
        let placement = Placement {
            name: record.name.clone(),
            category: record.category,
            bucket,
            fell_back: classification.fell_back,
        };
        // `bucket` is Valid or Inactive; archived records stay in their
        // staleness bucket and surface through `Partition::archived`.
        partition.push(bucket, record);
        placement
    }
}

// =============================================================================
// TESTS
// =============================================================================
