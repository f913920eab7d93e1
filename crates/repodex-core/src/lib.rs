//! # repodex-core
//!
//! The deterministic catalog pipeline for repodex - THE LOGIC.
//!
//! Given a list of repository references and (optionally) their fetched
//! metadata, this crate decides everything observable about the output:
//! which category each repository belongs to, whether it is valid or
//! inactive, what the persisted bucket documents look like and how the
//! Markdown tables are laid out.
//!
//! ## Pipeline
//!
//! ```text
//! reference ──► RepoId::parse ──► MetadataSource::fetch ──► Categorizer
//!                                  (app-provided)               │
//!                                                               ▼
//!   TableRenderer ◄── bucket_from_yaml ◄── bucket_to_yaml ◄── Partitioner
//! ```
//!
//! ## Architectural Constraints
//!
//! - No network, no file I/O, no logging: the app layer owns those
//! - The clock is an input (`Partitioner::new(threshold, now)`)
//! - Ordered collections only; classification never depends on map order

// =============================================================================
// MODULES
// =============================================================================

pub mod categorizer;
pub mod collector;
pub mod formats;
pub mod partition;
pub mod primitives;
pub mod reference;
pub mod render;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use reference::{RepoId, parse_reference_list};
pub use types::{BadgeKind, Badges, Category, Record, RepoMetadata, RepodexError};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use categorizer::{Categorizer, CategoryRule, Classification, DisabledBehavior, RuleTable};
pub use collector::{Collection, Collector, ItemOutcome, MetadataSource, Placement};
pub use partition::{Bucket, Partition, Partitioner};
pub use render::{Column, Columns, TableRenderer};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{BucketDocument, bucket_from_yaml, bucket_to_yaml};
