//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{CollectArgs, InspectArgs, RenderArgs};
use crate::config::{Credential, Settings};
use crate::github::GitHubClient;
use repodex_core::{
    Bucket, Collection, Collector, Columns, ItemOutcome, Record, RepodexError, TableRenderer,
    bucket_from_yaml, bucket_to_yaml, parse_reference_list,
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of an input list (10 MB).
const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum size of a bucket document (100 MB).
const MAX_BUCKET_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// File name of the combined rendering.
pub const COMBINED_FILE: &str = "README.md";

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RepodexError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RepodexError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RepodexError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, RepodexError> {
    let canonical = path.canonicalize().map_err(|e| {
        RepodexError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(RepodexError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Create a directory (and parents) if it does not exist yet.
fn ensure_dir(dir: &Path) -> Result<(), RepodexError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        RepodexError::Io(format!("Cannot create directory '{}': {}", dir.display(), e))
    })
}

// =============================================================================
// OUTPUT
// =============================================================================

/// How command summaries are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json_mode: bool,
    pub quiet: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) {
        if self.quiet {
            return;
        }
        if self.json_mode {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        } else {
            println!("{}", text());
        }
    }
}

/// Counts written by a collect run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectSummary {
    pub valid: usize,
    pub inactive: usize,
    pub archived: usize,
    pub skipped: usize,
}

/// Files written by a render run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
}

// =============================================================================
// COLLECT COMMAND
// =============================================================================

/// Read the input list, collect every reference and persist the buckets.
pub async fn cmd_collect(
    settings: &Settings,
    credential: &Credential,
    args: &CollectArgs,
    output: Output,
) -> Result<CollectSummary, RepodexError> {
    tracing::info!(
        "Collecting from {:?} (api: {}, classify: {})",
        args.txt,
        !args.no_api,
        !args.no_classify
    );

    let references = load_reference_list(&args.txt)?;
    let collector = Collector::new(
        settings.categorizer(!args.no_classify)?,
        settings.partitioner(chrono::Utc::now()),
    );

    let total = references.len();
    let observe = |outcome: &ItemOutcome| log_outcome(total, outcome);
    let collection = if args.no_api {
        collector.collect_offline(&references, observe)
    } else {
        let client = GitHubClient::new(
            settings.api_base.as_str(),
            credential.clone(),
            settings.request_timeout(),
        )?;
        collector.collect_live(&client, &references, observe).await
    };

    let summary = write_collection(&settings.data_dir, &collection)?;
    tracing::info!(
        "Collected {} repositories ({} skipped)",
        summary.valid + summary.inactive,
        summary.skipped
    );

    output.emit(&summary, || {
        format!(
            "valid: {}, inactive: {}, archived: {}, skipped: {}",
            summary.valid, summary.inactive, summary.archived, summary.skipped
        )
    });

    Ok(summary)
}

/// Per-item progress, only visible with `--verbose`.
fn log_outcome(total: usize, outcome: &ItemOutcome) {
    tracing::debug!("[{}/{}] {}", outcome.index, total, outcome.reference);
    match &outcome.result {
        Ok(placement) => {
            if placement.fell_back {
                tracing::debug!(
                    "  category outside the known set, defaulting to '{}'",
                    placement.category
                );
            }
            tracing::debug!("  → {} ({})", placement.bucket, placement.category);
        }
        Err(e) => tracing::debug!("  skip {}: {}", outcome.reference, e),
    }
}

/// Read an input list document.
///
/// A missing input list is a configuration error.
pub fn load_reference_list(path: &Path) -> Result<Vec<String>, RepodexError> {
    let validated = validate_file_path(path).map_err(|_| {
        RepodexError::Configuration(format!("Input list '{}' not found", path.display()))
    })?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated)
        .map_err(|e| RepodexError::Io(format!("Read input list: {}", e)))?;
    parse_reference_list(&text)
}

/// Write the three bucket documents, replacing previous ones.
pub fn write_collection(
    data_dir: &Path,
    collection: &Collection,
) -> Result<CollectSummary, RepodexError> {
    ensure_dir(data_dir)?;

    let partition = &collection.partition;
    let archived = partition.archived();
    for bucket in Bucket::ALL {
        let records = match bucket {
            Bucket::Valid => &partition.valid,
            Bucket::Inactive => &partition.inactive,
            Bucket::Archived => &archived,
        };
        save_bucket(data_dir, bucket, records)?;
    }

    Ok(CollectSummary {
        valid: partition.valid.len(),
        inactive: partition.inactive.len(),
        archived: archived.len(),
        skipped: collection.skipped(),
    })
}

// =============================================================================
// RENDER COMMAND
// =============================================================================

/// Render the persisted buckets as Markdown documents.
pub fn cmd_render(
    settings: &Settings,
    args: &RenderArgs,
    output: Output,
) -> Result<(), RepodexError> {
    let summary = render_documents(&settings.data_dir, &settings.output_dir, args)?;

    output.emit(&summary, || {
        summary
            .written
            .iter()
            .map(|p| format!("Wrote {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}

/// Load the three buckets and write the rendered documents.
pub fn render_documents(
    data_dir: &Path,
    output_dir: &Path,
    args: &RenderArgs,
) -> Result<RenderSummary, RepodexError> {
    let valid = load_bucket(data_dir, Bucket::Valid)?;
    let inactive = load_bucket(data_dir, Bucket::Inactive)?;
    let archived = load_bucket(data_dir, Bucket::Archived)?;

    ensure_dir(output_dir)?;
    let mut written = Vec::new();

    if args.combined {
        let renderer = TableRenderer::new(args.columns(Columns::for_bucket(Bucket::Valid)));
        let text = renderer.render_combined(&archived, &inactive, &valid);
        written.push(write_document(output_dir, COMBINED_FILE, &text)?);
    } else {
        for (bucket, records) in [
            (Bucket::Valid, &valid),
            (Bucket::Inactive, &inactive),
            (Bucket::Archived, &archived),
        ] {
            let renderer = TableRenderer::new(args.columns(Columns::for_bucket(bucket)));
            let text = renderer.render(records);
            written.push(write_document(output_dir, &bucket.rendered_file(), &text)?);
        }
    }

    tracing::info!("Rendered {} document(s) into {:?}", written.len(), output_dir);
    Ok(RenderSummary { written })
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Collect, then render with default columns.
pub async fn cmd_run(
    settings: &Settings,
    credential: &Credential,
    args: &CollectArgs,
    output: Output,
) -> Result<(), RepodexError> {
    cmd_collect(settings, credential, args, output).await?;
    cmd_render(settings, &RenderArgs::default(), output)
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Look a repository up by numeric ID and print its raw payload.
///
/// Without `--id` the ID is read from standard input.
pub async fn cmd_inspect(
    settings: &Settings,
    credential: &Credential,
    args: &InspectArgs,
) -> Result<serde_json::Value, RepodexError> {
    let id = match args.id {
        Some(id) => id,
        None => prompt_repository_id()?,
    };
    tracing::debug!("Looking up repository {}", id);

    let client = GitHubClient::new(
        settings.api_base.as_str(),
        credential.clone(),
        settings.request_timeout(),
    )?;
    let payload = client.repository_by_id(id).await?;

    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| RepodexError::Io(format!("Encode payload: {}", e)))?;
    println!("{}", text);
    Ok(payload)
}

/// Ask for a repository ID on stderr and read it from stdin.
fn prompt_repository_id() -> Result<u64, RepodexError> {
    eprint!("Enter GitHub repository ID: ");
    std::io::stderr()
        .flush()
        .map_err(|e| RepodexError::Io(format!("Write prompt: {}", e)))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| RepodexError::Io(format!("Read repository ID: {}", e)))?;
    parse_repository_id(&line)
}

/// Parse a user-supplied repository ID.
pub fn parse_repository_id(text: &str) -> Result<u64, RepodexError> {
    let text = text.trim();
    text.parse().map_err(|_| {
        RepodexError::Configuration(format!("ID must be a number, got '{}'", text))
    })
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Write one bucket document.
pub fn save_bucket(
    data_dir: &Path,
    bucket: Bucket,
    records: &[Record],
) -> Result<(), RepodexError> {
    let path = data_dir.join(bucket.document_file());
    let yaml = bucket_to_yaml(records)?;
    std::fs::write(&path, yaml).map_err(|e| {
        RepodexError::Persistence(format!("Write {}: {}", path.display(), e))
    })?;
    tracing::debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Load one bucket document.
pub fn load_bucket(data_dir: &Path, bucket: Bucket) -> Result<Vec<Record>, RepodexError> {
    let path = data_dir.join(bucket.document_file());
    if !path.is_file() {
        return Err(RepodexError::Persistence(format!(
            "Bucket document {} not found; run `repodex collect` first",
            path.display()
        )));
    }
    validate_file_size(&path, MAX_BUCKET_FILE_SIZE)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| RepodexError::Persistence(format!("Read {}: {}", path.display(), e)))?;
    bucket_from_yaml(&text)
}

/// Write a rendered document and return its path.
fn write_document(dir: &Path, file: &str, text: &str) -> Result<PathBuf, RepodexError> {
    let path = dir.join(file);
    std::fs::write(&path, text)
        .map_err(|e| RepodexError::Io(format!("Write {}: {}", path.display(), e)))?;
    Ok(path)
}
