use decarb_core::catalogue::SkippedRow;
use decarb_core::error::DecarbError;
use decarb_core::normalize::NormalizedCatalogue;
use decarb_core::PlanReport;

pub fn print(report: &PlanReport) -> Result<(), DecarbError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

pub fn print_catalogue(
    catalogue: &NormalizedCatalogue,
    skipped_rows: &[SkippedRow],
) -> Result<(), DecarbError> {
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "projects": catalogue.projects,
        "warnings": catalogue.warnings,
        "skipped_rows": skipped_rows,
    }))?;
    println!("{json}");
    Ok(())
}
