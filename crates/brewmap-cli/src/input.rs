//! Reading the user's curated list from CSV.

use std::path::Path;

use anyhow::Context;
use brewmap_core::SourceEntry;

/// Column indices located by case-insensitive header match.
struct Columns {
    title: usize,
    url: usize,
    note: Option<usize>,
    tags: Option<usize>,
    comment: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> anyhow::Result<Self> {
        let find = |name: &str| {
            headers.iter().position(|h| {
                h.trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(name)
            })
        };
        let title = find("Title").context("input CSV has no \"Title\" column")?;
        let url = find("URL").context("input CSV has no \"URL\" column")?;
        Ok(Self {
            title,
            url,
            note: find("Note"),
            tags: find("Tags"),
            comment: find("Comment"),
        })
    }
}

/// Reads source entries from a CSV file with a header row.
///
/// `Title` and `URL` are required; `Note`, `Tags` and `Comment` are optional.
/// Rows where both title and URL are empty are skipped. Empty optional cells
/// become `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// missing, or a row is not valid CSV.
pub(crate) fn read_source_entries(path: &Path) -> anyhow::Result<Vec<SourceEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;

    let columns = Columns::locate(reader.headers()?)?;

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // +2: one for the header row, one for 1-based line numbers.
        let record = record.with_context(|| format!("invalid CSV at row {}", index + 2))?;
        let cell = |i: usize| record.get(i).map(str::trim).unwrap_or_default();
        let optional = |i: Option<usize>| {
            i.map(cell)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        let title = cell(columns.title);
        let url = cell(columns.url);
        if title.is_empty() && url.is_empty() {
            continue;
        }

        entries.push(SourceEntry {
            title: title.to_owned(),
            note: optional(columns.note),
            url: url.to_owned(),
            tags: optional(columns.tags),
            comment: optional(columns.comment),
        });
    }

    tracing::debug!(path = %path.display(), count = entries.len(), "read source entries");
    Ok(entries)
}
