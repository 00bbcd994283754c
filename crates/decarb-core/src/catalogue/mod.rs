pub mod columns;
pub mod delimited;
pub mod xlsx;

use crate::error::DecarbError;
use crate::model::{RawField, RawProject};
use columns::HeaderMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A row the reader saw but could not turn into a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based row number in the source sheet.
    pub row_number: usize,
    pub row_text: String,
    pub reason: String,
}

/// Reader output: project rows in catalogue order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCatalogue {
    pub projects: Vec<RawProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}

/// Trait for catalogue file backends.
pub trait CatalogueReader: Send + Sync {
    /// Parse raw file bytes into project rows.
    fn read_catalogue(&self, bytes: &[u8]) -> Result<ParsedCatalogue, DecarbError>;

    /// Name of this backend (for diagnostics).
    fn format_name(&self) -> &str;
}

/// Reads a JSON array of `RawProject`.
///
/// Rows follow the same rules as the spreadsheet readers: `{}` is dropped,
/// entries with no name and no numbers are reported, and an array with no
/// projects left is `EmptyCatalogue`.
pub struct JsonCatalogueReader;

impl CatalogueReader for JsonCatalogueReader {
    fn read_catalogue(&self, bytes: &[u8]) -> Result<ParsedCatalogue, DecarbError> {
        let rows: Vec<RawProject> = serde_json::from_slice(bytes)?;

        let mut projects = Vec::with_capacity(rows.len());
        let mut skipped_rows = Vec::new();
        for (i, project) in rows.into_iter().enumerate() {
            if project == RawProject::default() {
                continue;
            }
            if columns::is_unusable(&project) {
                skipped_rows.push(SkippedRow {
                    row_number: i + 1,
                    row_text: serde_json::to_string(&project)?,
                    reason: "no project name or numeric values".into(),
                });
                continue;
            }
            projects.push(project);
        }

        if projects.is_empty() {
            return Err(DecarbError::EmptyCatalogue);
        }

        Ok(ParsedCatalogue {
            projects,
            skipped_rows,
        })
    }

    fn format_name(&self) -> &str {
        "json"
    }
}

/// Turn data rows into projects using a resolved header.
///
/// Rows are `(1-based row number, cells)`. Blank rows are dropped silently;
/// rows with cells but no name and no numeric values are reported as skipped.
pub(crate) fn collect_projects<I>(
    header: &HeaderMap,
    rows: I,
) -> Result<ParsedCatalogue, DecarbError>
where
    I: IntoIterator<Item = (usize, Vec<Option<RawField>>)>,
{
    let mut projects = Vec::new();
    let mut skipped_rows = Vec::new();

    for (row_number, cells) in rows {
        if cells.iter().all(Option::is_none) {
            continue;
        }

        let row_text = cells
            .iter()
            .map(|c| c.as_ref().map(|v| v.to_string()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" | ");

        let mut project = RawProject::default();
        for (idx, cell) in cells.into_iter().enumerate() {
            if let (Some(column), Some(value)) = (header.column_at(idx), cell) {
                columns::assign(&mut project, column, value);
            }
        }

        if columns::is_unusable(&project) {
            skipped_rows.push(SkippedRow {
                row_number,
                row_text,
                reason: "no project name or numeric values".into(),
            });
            continue;
        }

        projects.push(project);
    }

    if projects.is_empty() {
        return Err(DecarbError::EmptyCatalogue);
    }

    Ok(ParsedCatalogue {
        projects,
        skipped_rows,
    })
}

/// Pick a reader from the file extension.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn CatalogueReader>, DecarbError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" => Ok(Box::new(xlsx::XlsxCatalogueReader)),
        "csv" => Ok(Box::new(delimited::CsvCatalogueReader::default())),
        "json" => Ok(Box::new(JsonCatalogueReader)),
        other => Err(DecarbError::UnsupportedFormat(other.to_string())),
    }
}

/// Read a catalogue file, choosing the backend by extension.
pub fn read_catalogue_file(path: &Path) -> Result<ParsedCatalogue, DecarbError> {
    let reader = reader_for_path(path)?;
    let bytes = std::fs::read(path)?;
    let parsed = reader.read_catalogue(&bytes)?;
    tracing::info!(
        target: "decarb::catalogue",
        path = %path.display(),
        format = reader.format_name(),
        projects = parsed.projects.len(),
        skipped = parsed.skipped_rows.len(),
        "catalogue loaded"
    );
    Ok(parsed)
}
