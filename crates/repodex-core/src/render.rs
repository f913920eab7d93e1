//! # Table Renderer
//!
//! Renders a bucket of records as grouped Markdown tables.
//!
//! ## Layout
//!
//! For each category, in ascending order of its label:
//!
//! ```text
//! ## Bots
//!
//! | Project Name | ⭐ | ⏱️ | 🖥️ | 📄 | Description |
//! | ------------ | - | -- | -- | - | ----------- |
//! | [my-bot](https://github.com/acme/my-bot) | ![Star](...) | ... |  |
//!
//! ```
//!
//! Records inside a group are sorted by name, case-insensitively. There is
//! no global ordering across groups.

use crate::partition::Bucket;
use crate::{BadgeKind, Record};
use std::collections::BTreeMap;

// =============================================================================
// COLUMNS
// =============================================================================

/// One table column, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Name,
    Author,
    Star,
    LastCommit,
    Language,
    License,
    Archived,
    Description,
}

impl Column {
    /// Every column, in canonical order.
    pub const ALL: [Column; 8] = [
        Column::Name,
        Column::Author,
        Column::Star,
        Column::LastCommit,
        Column::Language,
        Column::License,
        Column::Archived,
        Column::Description,
    ];

    /// Header cell text.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Column::Name => "Project Name",
            Column::Author => "Author",
            Column::Star => "⭐",
            Column::LastCommit => "⏱️",
            Column::Language => "🖥️",
            Column::License => "📄",
            Column::Archived => "🏷️ Archived",
            Column::Description => "Description",
        }
    }

    /// Badge rendered in this column, with its image alt text.
    const fn badge(self) -> Option<(BadgeKind, &'static str)> {
        match self {
            Column::Star => Some((BadgeKind::StarCount, "Star")),
            Column::LastCommit => Some((BadgeKind::LastCommit, "Commit")),
            Column::Language => Some((BadgeKind::TopLanguage, "Lang")),
            Column::License => Some((BadgeKind::License, "License")),
            _ => None,
        }
    }

    /// Cell text for one record.
    fn cell(self, record: &Record) -> String {
        if let Some((kind, alt)) = self.badge() {
            return format!("![{}]({})", alt, record.badges.get(kind));
        }
        match self {
            Column::Name => format!("[{}]({})", escape_cell(&record.name), record.source_url),
            Column::Author => record.owner.clone(),
            Column::Archived => {
                if record.archived {
                    "✅".to_string()
                } else {
                    String::new()
                }
            }
            _ => escape_cell(&record.description),
        }
    }
}

/// Keep free text inside its cell: pipes are escaped, line breaks become
/// spaces.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Column visibility. The name column is always shown and always first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub author: bool,
    pub star: bool,
    pub last_commit: bool,
    pub language: bool,
    pub license: bool,
    pub archived: bool,
    pub description: bool,
}

impl Columns {
    /// Every optional column on.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            author: true,
            star: true,
            last_commit: true,
            language: true,
            license: true,
            archived: true,
            description: true,
        }
    }

    /// Default columns for a bucket document.
    ///
    /// Author is opt-in everywhere; the archived flag is shown for the
    /// inactive and archived documents only.
    #[must_use]
    pub const fn for_bucket(bucket: Bucket) -> Self {
        Self {
            author: false,
            star: true,
            last_commit: true,
            language: true,
            license: true,
            archived: !matches!(bucket, Bucket::Valid),
            description: true,
        }
    }

    /// Whether a column is shown.
    #[must_use]
    pub const fn shows(&self, column: Column) -> bool {
        match column {
            Column::Name => true,
            Column::Author => self.author,
            Column::Star => self.star,
            Column::LastCommit => self.last_commit,
            Column::Language => self.language,
            Column::License => self.license,
            Column::Archived => self.archived,
            Column::Description => self.description,
        }
    }

    /// Enabled columns, in canonical order.
    #[must_use]
    pub fn enabled(&self) -> Vec<Column> {
        Column::ALL.into_iter().filter(|c| self.shows(*c)).collect()
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::for_bucket(Bucket::Valid)
    }
}

// =============================================================================
// RENDERER
// =============================================================================

/// Markdown table renderer for one column configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    columns: Columns,
}

impl TableRenderer {
    #[must_use]
    pub fn new(columns: Columns) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Render one bucket as a grouped document.
    #[must_use]
    pub fn render(&self, records: &[Record]) -> String {
        let columns = self.columns.enabled();
        let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
        let separators: Vec<String> = headers
            .iter()
            .map(|h| "-".repeat(h.chars().count()))
            .collect();
        let header_line = table_row(&headers);
        let separator_line = table_row(&separators);

        let mut lines = Vec::new();
        for (label, mut group) in group_by_category(records) {
            group.sort_by_key(|r| r.name.to_lowercase());

            lines.push(format!("## {}\n", label));
            lines.push(header_line.clone());
            lines.push(separator_line.clone());
            for record in group {
                let cells: Vec<String> = columns.iter().map(|c| c.cell(record)).collect();
                lines.push(table_row(&cells));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Render archived, inactive and valid records as one document.
    ///
    /// The archived column is always present. Records appearing in both
    /// the archived view and another bucket are listed twice.
    #[must_use]
    pub fn render_combined(
        &self,
        archived: &[Record],
        inactive: &[Record],
        valid: &[Record],
    ) -> String {
        let all: Vec<Record> = archived
            .iter()
            .chain(inactive)
            .chain(valid)
            .cloned()
            .collect();
        let columns = Columns {
            archived: true,
            ..self.columns
        };
        TableRenderer::new(columns).render(&all)
    }
}

/// Group records by category label, in ascending label order.
fn group_by_category(records: &[Record]) -> BTreeMap<&'static str, Vec<&Record>> {
    let mut groups: BTreeMap<&'static str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.category.label()).or_default().push(record);
    }
    groups
}

fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let joined: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |", joined.join(" | "))
}

// =============================================================================
// TESTS
// =============================================================================
