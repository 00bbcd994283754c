use decarb_core::catalogue::read_catalogue_file;
use decarb_core::error::DecarbError;
use decarb_core::normalize::{normalize_catalogue, NumericPolicy};
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str, strict: bool) -> Result<(), DecarbError> {
    let parsed = read_catalogue_file(&input_file)?;
    let policy = if strict {
        NumericPolicy::Strict
    } else {
        NumericPolicy::Permissive
    };
    let normalized = normalize_catalogue(&parsed.projects, policy)?;

    match output_format {
        "json" => output::json::print_catalogue(&normalized, &parsed.skipped_rows)?,
        _ => output::table::print_catalogue(&normalized, &parsed.skipped_rows),
    }

    Ok(())
}
