use crate::catalogue::columns::HeaderMap;
use crate::catalogue::{collect_projects, CatalogueReader, ParsedCatalogue};
use crate::error::DecarbError;
use crate::model::RawField;

const HEADER_SEARCH_ROWS: usize = 10;

/// Reads a delimited text export of the project template.
#[derive(Debug, Clone)]
pub struct CsvCatalogueReader {
    pub delimiter: u8,
}

impl Default for CsvCatalogueReader {
    fn default() -> Self {
        CsvCatalogueReader { delimiter: b',' }
    }
}

impl CatalogueReader for CsvCatalogueReader {
    fn read_catalogue(&self, bytes: &[u8]) -> Result<ParsedCatalogue, DecarbError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let records = reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

        let (header_idx, header) = records
            .iter()
            .take(HEADER_SEARCH_ROWS)
            .enumerate()
            .find_map(|(i, record)| {
                let cells: Vec<&str> = record.iter().collect();
                HeaderMap::detect(&cells).map(|h| (i, h))
            })
            .ok_or_else(|| {
                DecarbError::Spreadsheet("no header row found in CSV catalogue".into())
            })?;

        let data_rows = records
            .iter()
            .enumerate()
            .skip(header_idx + 1)
            .map(|(i, record)| {
                let cells: Vec<Option<RawField>> = record
                    .iter()
                    .map(|c| {
                        let trimmed = c.trim();
                        if trimmed.is_empty() {
                            None
                        } else {
                            Some(RawField::Text(trimmed.to_string()))
                        }
                    })
                    .collect();
                // Blank lines produce no record, so the index can drift from the file.
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(i + 1);
                (line, cells)
            });

        collect_projects(&header, data_rows)
    }

    fn format_name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
Project,Category,Approach,Estimated Carbon Reduction in Kg/CO2 per annum,Estimated Investment in Rs.,Estimated Timeline
LED retrofit,Energy,Efficiency,5000,\"1,20,000\",3
Solar rooftop,Energy,Renewables,42000,2500000,10
,,,,,
";

    #[test]
    fn test_reads_template_rows() {
        let parsed = CsvCatalogueReader::default()
            .read_catalogue(TEMPLATE.as_bytes())
            .unwrap();
        assert_eq!(parsed.projects.len(), 2);
        let led = &parsed.projects[0];
        assert_eq!(led.name.as_deref(), Some("LED retrofit"));
        assert_eq!(led.category.as_deref(), Some("Energy"));
        assert_eq!(led.investment, Some(RawField::Text("1,20,000".into())));
        assert_eq!(led.timeline_months, Some(RawField::Text("3".into())));
        assert!(parsed.skipped_rows.is_empty());
    }

    #[test]
    fn test_title_rows_before_header_are_ignored() {
        let csv = "Plant A candidate projects\n\nProject,Estimated Timeline\nHeat pump,8\n";
        let parsed = CsvCatalogueReader::default()
            .read_catalogue(csv.as_bytes())
            .unwrap();
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.projects[0].name.as_deref(), Some("Heat pump"));
    }

    #[test]
    fn test_rows_without_usable_data_are_reported() {
        let csv = "Project,Category,Estimated Timeline\nBoiler,Heat,4\n,Notes only,\n";
        let parsed = CsvCatalogueReader::default()
            .read_catalogue(csv.as_bytes())
            .unwrap();
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.skipped_rows.len(), 1);
        assert_eq!(parsed.skipped_rows[0].row_number, 3);
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let err = CsvCatalogueReader::default()
            .read_catalogue(b"a,b,c\n1,2,3\n")
            .unwrap_err();
        assert!(matches!(err, DecarbError::Spreadsheet(_)));
    }

    #[test]
    fn test_header_only_is_empty_catalogue() {
        let err = CsvCatalogueReader::default()
            .read_catalogue(b"Project,Estimated Timeline\n")
            .unwrap_err();
        assert!(matches!(err, DecarbError::EmptyCatalogue));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let reader = CsvCatalogueReader { delimiter: b';' };
        let parsed = reader
            .read_catalogue(b"Project;Estimated Investment in Rs.\nChiller;900\n")
            .unwrap();
        assert_eq!(
            parsed.projects[0].investment,
            Some(RawField::Text("900".into()))
        );
    }

    #[test]
    fn test_skipped_row_numbers_count_blank_lines() {
        let csv = "Project,Category,Estimated Timeline\n\nBoiler,Heat,4\n,Notes only,\n";
        let parsed = CsvCatalogueReader::default()
            .read_catalogue(csv.as_bytes())
            .unwrap();
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.skipped_rows.len(), 1);
        assert_eq!(parsed.skipped_rows[0].row_number, 4);
    }
}
