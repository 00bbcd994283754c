use crate::constraints::ConstraintSet;
use crate::error::DecarbError;
use crate::model::{checked_sum, Project};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    Optimal,
    Infeasible,
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStatus::Optimal => write!(f, "optimal"),
            SelectionStatus::Infeasible => write!(f, "infeasible"),
        }
    }
}

/// Which objective the selector applied, chosen from the bounds present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// No investment cap: reach the carbon floor with the largest reductions.
    CarbonWithTimelineOnly,
    /// Investment cap, no floor: maximize carbon within the cap.
    InvestmentWithTimelineOnly,
    /// Cap and floor: cheapest subset meeting the floor.
    FullyConstrained,
}

impl SelectionMode {
    pub fn for_constraints(constraints: &ConstraintSet) -> SelectionMode {
        match (constraints.max_investment, constraints.carbon_floor()) {
            (None, _) => SelectionMode::CarbonWithTimelineOnly,
            (Some(_), None) => SelectionMode::InvestmentWithTimelineOnly,
            (Some(_), Some(_)) => SelectionMode::FullyConstrained,
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::CarbonWithTimelineOnly => write!(f, "carbon-with-timeline-only"),
            SelectionMode::InvestmentWithTimelineOnly => {
                write!(f, "investment-with-timeline-only")
            }
            SelectionMode::FullyConstrained => write!(f, "fully-constrained"),
        }
    }
}

/// Why a project was left out before the search ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The project alone takes longer than the time left to the target date.
    TimelineExceedsCap {
        timeline_months: Decimal,
        cap_months: u32,
    },
    /// Zero cost and zero reduction: usually a row with no numeric data.
    NoImpactData,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::TimelineExceedsCap {
                timeline_months,
                cap_months,
            } => write!(
                f,
                "needs {timeline_months} months, only {cap_months} left before target date"
            ),
            ExclusionReason::NoImpactData => write!(f, "no cost or reduction data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    /// 0-based catalogue row.
    pub index: usize,
    pub project: String,
    pub reason: ExclusionReason,
}

/// Selector output for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub status: SelectionStatus,
    pub mode: SelectionMode,
    /// Chosen projects in catalogue order. Empty when infeasible.
    pub selected_projects: Vec<Project>,
    pub total_investment: Decimal,
    /// kg CO2 per year.
    pub total_carbon_reduction: Decimal,
    /// Longest single selected project, in months (0 if none).
    pub max_project_timeline: Decimal,
    /// Sum of selected timelines. Reported only, never constrained.
    pub total_timeline: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

impl SelectionResult {
    pub fn is_optimal(&self) -> bool {
        self.status == SelectionStatus::Optimal
    }

    pub(crate) fn from_projects(
        mode: SelectionMode,
        selected_projects: Vec<Project>,
        exclusions: Vec<Exclusion>,
    ) -> Result<Self, DecarbError> {
        let total_investment = checked_sum(
            selected_projects.iter().map(|p| p.investment_cost),
            "total investment",
        )?;
        let total_carbon_reduction = checked_sum(
            selected_projects.iter().map(|p| p.carbon_reduction_per_year),
            "total carbon reduction",
        )?;
        let max_project_timeline = selected_projects
            .iter()
            .map(|p| p.timeline_months)
            .max()
            .unwrap_or(Decimal::ZERO);
        let total_timeline = checked_sum(
            selected_projects.iter().map(|p| p.timeline_months),
            "total timeline",
        )?;

        Ok(SelectionResult {
            status: SelectionStatus::Optimal,
            mode,
            selected_projects,
            total_investment,
            total_carbon_reduction,
            max_project_timeline,
            total_timeline,
            exclusions,
        })
    }

    pub(crate) fn infeasible(mode: SelectionMode, exclusions: Vec<Exclusion>) -> Self {
        SelectionResult {
            status: SelectionStatus::Infeasible,
            mode,
            selected_projects: Vec::new(),
            total_investment: Decimal::ZERO,
            total_carbon_reduction: Decimal::ZERO,
            max_project_timeline: Decimal::ZERO,
            total_timeline: Decimal::ZERO,
            exclusions,
        }
    }
}
