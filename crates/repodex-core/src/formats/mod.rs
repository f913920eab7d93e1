//! # Formats
//!
//! Persistence formats for repodex. File I/O lives in the app layer; this
//! module only converts between records and document text.

mod bucket;

pub use bucket::{BucketDocument, bucket_from_yaml, bucket_to_yaml};
