//! # Partitioner
//!
//! Splits records into the two exclusive buckets by staleness and derives
//! the archived view.
//!
//! - A record is **inactive** when it was live-fetched and
//!   `now - updated_at > threshold` (strictly greater)
//! - Everything else is **valid**, including offline records, which carry
//!   no timestamp
//! - The **archived** subset is a filter over both buckets, not a bucket

use crate::primitives::DEFAULT_STALENESS_DAYS;
use crate::Record;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The three persisted documents.
///
/// `Valid` and `Inactive` are exclusive; `Archived` is derived from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Valid,
    Inactive,
    Archived,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Valid, Bucket::Inactive, Bucket::Archived];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Bucket::Valid => "valid",
            Bucket::Inactive => "inactive",
            Bucket::Archived => "archived",
        }
    }

    /// File name of the persisted bucket document.
    #[must_use]
    pub fn document_file(self) -> String {
        format!("{}.yml", self.name())
    }

    /// File name of the rendered table document.
    #[must_use]
    pub fn rendered_file(self) -> String {
        format!("{}.md", self.name().to_uppercase())
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Staleness rule evaluated against a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    threshold: Duration,
    now: DateTime<Utc>,
}

impl Partitioner {
    /// Create a partitioner with an explicit threshold and clock reading.
    #[must_use]
    pub fn new(threshold: Duration, now: DateTime<Utc>) -> Self {
        Self { threshold, now }
    }

    /// Default one-year threshold at the given instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::new(Duration::days(DEFAULT_STALENESS_DAYS), now)
    }

    /// The configured threshold.
    #[must_use]
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// The instant records are judged against.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Decide the exclusive bucket of one record.
    #[must_use]
    pub fn bucket(&self, record: &Record) -> Bucket {
        match record.updated_at {
            Some(updated) if self.now - updated > self.threshold => Bucket::Inactive,
            _ => Bucket::Valid,
        }
    }

    /// Split records into valid and inactive, keeping input order.
    #[must_use]
    pub fn partition(&self, records: Vec<Record>) -> Partition {
        let mut partition = Partition::default();
        for record in records {
            partition.push(self.bucket(&record), record);
        }
        partition
    }
}

/// The two exclusive buckets of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub valid: Vec<Record>,
    pub inactive: Vec<Record>,
}

impl Partition {
    /// Append a record to a bucket.
    ///
    /// `Archived` is a view over the other two, not a storage bucket; a
    /// record pushed with it is stored in `valid` and shows up in the
    /// archived view only if its `archived` flag is set.
    pub fn push(&mut self, bucket: Bucket, record: Record) {
        match bucket {
            Bucket::Inactive => self.inactive.push(record),
            Bucket::Valid | Bucket::Archived => self.valid.push(record),
        }
    }

    /// Archived records from both buckets, valid first.
    #[must_use]
    pub fn archived(&self) -> Vec<Record> {
        self.valid
            .iter()
            .chain(&self.inactive)
            .filter(|r| r.archived)
            .cloned()
            .collect()
    }

    /// Records of one document.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> Vec<Record> {
        match bucket {
            Bucket::Valid => self.valid.clone(),
            Bucket::Inactive => self.inactive.clone(),
            Bucket::Archived => self.archived(),
        }
    }

    /// Number of records across both exclusive buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.valid.len() + self.inactive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
