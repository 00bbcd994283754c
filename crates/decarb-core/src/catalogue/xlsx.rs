use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::catalogue::columns::HeaderMap;
use crate::catalogue::{collect_projects, CatalogueReader, ParsedCatalogue};
use crate::error::DecarbError;
use crate::model::RawField;

/// The header row is expected near the top; title rows above it are allowed.
const HEADER_SEARCH_ROWS: usize = 10;

/// Reads the first worksheet of a project template workbook.
pub struct XlsxCatalogueReader;

impl CatalogueReader for XlsxCatalogueReader {
    fn read_catalogue(&self, bytes: &[u8]) -> Result<ParsedCatalogue, DecarbError> {
        parse_catalogue_xlsx(bytes)
    }

    fn format_name(&self) -> &str {
        "xlsx"
    }
}

/// Parse a project catalogue xlsx file.
///
/// Uses the first sheet, locates the header row by its column names, then
/// reads every following row until the end of the used range.
pub fn parse_catalogue_xlsx(bytes: &[u8]) -> Result<ParsedCatalogue, DecarbError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| DecarbError::Spreadsheet(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DecarbError::Spreadsheet("workbook has no sheets".into()))?
        .map_err(|e| DecarbError::Spreadsheet(format!("failed to read first sheet: {e}")))?;

    // Range rows are relative to the first used cell.
    let first_row = sheet.start().map(|(r, _)| r as usize).unwrap_or(0);
    let rows: Vec<&[Data]> = sheet.rows().collect();

    let (header_idx, header) = rows
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .find_map(|(i, row)| {
            let cells: Vec<String> = row
                .iter()
                .map(|c| cell_as_string(c).unwrap_or_default())
                .collect();
            HeaderMap::detect(&cells).map(|h| (i, h))
        })
        .ok_or_else(|| {
            DecarbError::Spreadsheet(
                "no header row found. Expected columns like 'Project' and 'Estimated Investment in Rs.'"
                    .into(),
            )
        })?;

    let data_rows = rows
        .iter()
        .enumerate()
        .skip(header_idx + 1)
        .map(|(i, row)| {
            let cells: Vec<Option<RawField>> = row.iter().map(cell_as_field).collect();
            (first_row + i + 1, cells)
        });

    collect_projects(&header, data_rows)
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_field(cell: &Data) -> Option<RawField> {
    match cell {
        Data::Float(f) => Some(RawField::Number(*f)),
        Data::Int(i) => Some(RawField::Number(*i as f64)),
        Data::Empty => None,
        other => cell_as_string(other).map(RawField::Text),
    }
}
