use crate::catalogue::columns::{
    APPROACH, CATEGORY, EXPORT_CARBON_REDUCTION, EXPORT_INVESTMENT, EXPORT_TIMELINE, PROJECT,
};
use crate::error::DecarbError;
use crate::model::Project;
use chrono::NaiveDate;
use std::io::Write;

/// Export columns, in order. Must stay in step with the input template so an
/// export can be read back as a catalogue.
pub const EXPORT_HEADERS: [&str; 6] = [
    PROJECT,
    CATEGORY,
    APPROACH,
    EXPORT_CARBON_REDUCTION,
    EXPORT_INVESTMENT,
    EXPORT_TIMELINE,
];

/// Write selected projects as CSV rows under `EXPORT_HEADERS`.
pub fn write_selection_csv<W: Write>(projects: &[Project], writer: W) -> Result<(), DecarbError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(EXPORT_HEADERS)?;

    for p in projects {
        out.write_record([
            p.name.clone(),
            p.category.clone().unwrap_or_default(),
            p.approach.clone().unwrap_or_default(),
            p.carbon_reduction_per_year.normalize().to_string(),
            p.investment_cost.normalize().to_string(),
            p.timeline_months.normalize().to_string(),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// `FilteredProjects_<business>_<plant>_<YYYY-MM-DD>.csv`
pub fn export_file_name(business: &str, plant: &str, date: NaiveDate) -> String {
    format!(
        "FilteredProjects_{}_{}_{}.csv",
        business,
        plant,
        date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::delimited::CsvCatalogueReader;
    use crate::catalogue::CatalogueReader;
    use crate::model::RawField;
    use rust_decimal_macros::dec;

    fn project() -> Project {
        Project {
            index: 0,
            name: "Solar rooftop, phase 1".into(),
            category: Some("Energy".into()),
            approach: None,
            description: Some("not exported".into()),
            investment_cost: dec!(2500000.00),
            carbon_reduction_per_year: dec!(42000),
            timeline_months: dec!(10),
        }
    }

    #[test]
    fn test_header_order_is_fixed() {
        let mut buf = Vec::new();
        write_selection_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Project,Category,Approach,Carbon Reduction (Kg),Investment (Rs.),Timeline\n"
        );
    }

    #[test]
    fn test_rows_are_quoted_and_normalized() {
        let mut buf = Vec::new();
        write_selection_csv(&[project()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "\"Solar rooftop, phase 1\",Energy,,42000,2500000,10");
    }

    #[test]
    fn test_export_reads_back_as_catalogue() {
        let mut buf = Vec::new();
        write_selection_csv(&[project()], &mut buf).unwrap();
        let parsed = CsvCatalogueReader::default().read_catalogue(&buf).unwrap();
        assert_eq!(parsed.projects.len(), 1);
        let p = &parsed.projects[0];
        assert_eq!(p.name.as_deref(), Some("Solar rooftop, phase 1"));
        assert_eq!(p.investment, Some(RawField::Text("2500000".into())));
        assert_eq!(p.timeline_months, Some(RawField::Text("10".into())));
    }

    #[test]
    fn test_file_name_includes_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            export_file_name("Acme", "Pune", date),
            "FilteredProjects_Acme_Pune_2025-03-09.csv"
        );
    }
}
