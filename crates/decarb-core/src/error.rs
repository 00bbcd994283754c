use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DecarbError {
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("unsupported catalogue format '{0}'. Expected .xlsx, .csv or .json")]
    UnsupportedFormat(String),

    #[error("no project rows found in catalogue")]
    EmptyCatalogue,

    #[error("row {row} ({project}): field '{field}' has invalid value '{raw}': {reason}")]
    InvalidField {
        row: usize,
        project: String,
        field: String,
        raw: String,
        reason: String,
    },

    #[error("failed to load scenario from {path}: {reason}")]
    ScenarioLoad { path: PathBuf, reason: String },

    #[error("invalid scenario: {0}")]
    ScenarioInvalid(String),

    #[error("search space exceeded: {states} candidate totals (limit {limit}). Tighten the investment cap or raise max_frontier_states")]
    SearchSpaceExceeded { states: usize, limit: usize },

    #[error("amount overflow in {0}: totals exceed the supported decimal range")]
    AmountOverflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
