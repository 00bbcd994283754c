pub mod catalogue;
pub mod constraints;
pub mod error;
pub mod export;
pub mod forecast;
pub mod model;
pub mod normalize;
pub mod ranking;
pub mod scenario;
pub mod select;
pub mod trajectory;

use chrono::NaiveDate;
use constraints::{ConstraintSet, RawConstraints};
use error::DecarbError;
use forecast::{ChartPoint, PlantForecast, RenewableForecast};
use model::RawProject;
use normalize::{FieldWarning, NumericPolicy};
use ranking::{TopProject, DEFAULT_TOP_N};
use select::{SelectionResult, SelectorOptions};
use serde::{Deserialize, Serialize};
use trajectory::TrajectoryPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub numeric_policy: NumericPolicy,
    pub top_n: usize,
    pub selector: SelectorOptions,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            numeric_policy: NumericPolicy::default(),
            top_n: DEFAULT_TOP_N,
            selector: SelectorOptions::default(),
        }
    }
}

/// Everything a planning request produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// The bounds as interpreted, after normalization.
    pub constraints: ConstraintSet,
    pub selection: SelectionResult,
    /// Ranked over the whole catalogue, independent of the selection.
    pub top_projects: Vec<TopProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FieldWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Vec<TrajectoryPoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart: Vec<ChartPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewables: Option<RenewableForecast>,
}

/// Main API entry point: normalize a catalogue and a request, select projects,
/// rank the catalogue and draw the target line against the plant forecast.
///
/// `today` anchors the month cap derived from the target date. Without a
/// forecast there is no base year, so no trajectory or chart is produced.
pub fn plan(
    raw_projects: &[RawProject],
    raw_constraints: &RawConstraints,
    today: NaiveDate,
    forecast: Option<&PlantForecast>,
    options: &PlanOptions,
) -> Result<PlanReport, DecarbError> {
    let catalogue = normalize::normalize_catalogue(raw_projects, options.numeric_policy)?;
    let constraints = constraints::normalize_constraints(raw_constraints, today);

    let selection = select::select(&catalogue.projects, &constraints, &options.selector)?;
    let top_projects = ranking::top_projects(&catalogue.projects, options.top_n);

    let trajectory = match forecast {
        Some(f) => trajectory::trajectory_for_forecast(
            &f.emissions,
            &constraints,
            &selection.selected_projects,
        )?,
        None => None,
    };
    let chart = match forecast {
        Some(f) => forecast::emissions_chart(&f.emissions, trajectory.as_deref())?,
        None => Vec::new(),
    };

    Ok(PlanReport {
        constraints,
        selection,
        top_projects,
        warnings: catalogue.warnings,
        trajectory,
        chart,
        renewables: forecast.map(|f| f.renewables.clone()),
    })
}
