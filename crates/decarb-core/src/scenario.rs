use crate::constraints::{parse_target_date, RawConstraints};
use crate::error::DecarbError;
use crate::model::RawField;
use crate::normalize::NumericPolicy;
use crate::ranking::DEFAULT_TOP_N;
use crate::select::{SelectorOptions, DEFAULT_MAX_FRONTIER_STATES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved planning request: bounds plus the knobs that shape the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Investment cap in rupees. Number or text ("Rs. 2,50,000").
    #[serde(default)]
    pub investment: Option<RawField>,
    /// Annual carbon floor in kg.
    #[serde(default)]
    pub carbon_reduction: Option<RawField>,
    #[serde(default)]
    pub target_date: Option<String>,
    /// Pins "today" for reproducible month caps. Defaults to the run date.
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_max_frontier_states")]
    pub max_frontier_states: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_frontier_states() -> usize {
    DEFAULT_MAX_FRONTIER_STATES
}

impl Scenario {
    pub fn raw_constraints(&self) -> RawConstraints {
        RawConstraints {
            investment: self.investment.clone(),
            carbon_reduction: self.carbon_reduction.clone(),
            target_date: self.target_date.clone(),
        }
    }

    /// The pinned date, if any. Validated scenarios always parse.
    pub fn today(&self) -> Option<NaiveDate> {
        self.today.as_deref().and_then(parse_target_date)
    }

    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions {
            max_frontier_states: self.max_frontier_states,
        }
    }
}

/// Load a scenario from a JSON file.
pub fn load_scenario(path: &Path) -> Result<Scenario, DecarbError> {
    let content = std::fs::read_to_string(path).map_err(|e| DecarbError::ScenarioLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_scenario(&content, path)
}

/// Parse a scenario from a JSON string, reporting errors against `source`.
pub fn parse_scenario(json: &str, source: &Path) -> Result<Scenario, DecarbError> {
    let scenario: Scenario = serde_json::from_str(json).map_err(|e| DecarbError::ScenarioLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn parse_scenario_str(json: &str) -> Result<Scenario, DecarbError> {
    let scenario: Scenario = serde_json::from_str(json).map_err(DecarbError::Json)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Check the run knobs. Bounds are not checked here; malformed bounds are
/// dropped with a warning when the constraints are normalized.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), DecarbError> {
    if scenario.name.trim().is_empty() {
        return Err(DecarbError::ScenarioInvalid(
            "name must not be empty".into(),
        ));
    }

    if scenario.top_n == 0 {
        return Err(DecarbError::ScenarioInvalid(
            "top_n must be at least 1".into(),
        ));
    }

    if scenario.max_frontier_states == 0 {
        return Err(DecarbError::ScenarioInvalid(
            "max_frontier_states must be at least 1".into(),
        ));
    }

    if let Some(ref today) = scenario.today {
        if parse_target_date(today).is_none() {
            return Err(DecarbError::ScenarioInvalid(format!(
                "today '{}' is not a date (expected YYYY-MM-DD)",
                today
            )));
        }
    }

    Ok(())
}
