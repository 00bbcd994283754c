use crate::constraints::ConstraintSet;
use crate::error::DecarbError;
use crate::model::Project;
use crate::select::candidate::Candidate;
use crate::select::outcome::{Exclusion, ExclusionReason, SelectionMode, SelectionResult};
use crate::select::{frontier, greedy, SelectorOptions};
use rust_decimal::Decimal;

/// Choose the subset of `projects` that best satisfies `constraints`.
///
/// The timeline cap is applied per project: anything that alone cannot finish
/// before the target date is dropped up front, as are rows with neither cost
/// nor reduction. The remaining projects are searched according to the mode
/// the bounds imply (see `SelectionMode`).
///
/// Infeasibility is a normal `Ok` result. Errors are `SearchSpaceExceeded`
/// when the knapsack frontier outgrows `options.max_frontier_states`, and
/// `AmountOverflow` when a total leaves the decimal range.
pub fn select(
    projects: &[Project],
    constraints: &ConstraintSet,
    options: &SelectorOptions,
) -> Result<SelectionResult, DecarbError> {
    let mode = SelectionMode::for_constraints(constraints);
    let (feasible, exclusions) = prefilter(projects, constraints);

    tracing::debug!(
        target: "decarb::select",
        %mode,
        catalogue = projects.len(),
        feasible = feasible.len(),
        excluded = exclusions.len(),
        "starting selection"
    );

    let best: Option<Candidate> = match mode {
        SelectionMode::CarbonWithTimelineOnly => greedy::fill_to_floor(
            &feasible,
            constraints.carbon_floor().unwrap_or(Decimal::ZERO),
        )?,
        SelectionMode::InvestmentWithTimelineOnly => {
            let cap = constraints.max_investment.unwrap_or(Decimal::MAX);
            frontier::pareto_frontier(&feasible, cap, options.max_frontier_states)?.pop()
        }
        SelectionMode::FullyConstrained => {
            let cap = constraints.max_investment.unwrap_or(Decimal::MAX);
            let floor = constraints.carbon_floor().unwrap_or(Decimal::ZERO);
            frontier::pareto_frontier(&feasible, cap, options.max_frontier_states)?
                .into_iter()
                .find(|c| c.carbon >= floor)
        }
    };

    let result = match best {
        Some(candidate) => {
            let selected = candidate
                .positions
                .iter()
                .map(|&pos| projects[pos].clone())
                .collect();
            SelectionResult::from_projects(mode, selected, exclusions)?
        }
        None => SelectionResult::infeasible(mode, exclusions),
    };

    tracing::info!(
        target: "decarb::select",
        %mode,
        status = %result.status,
        selected = result.selected_projects.len(),
        investment = %result.total_investment,
        carbon = %result.total_carbon_reduction,
        "selection finished"
    );

    Ok(result)
}

/// Split the catalogue into searchable projects and up-front exclusions.
fn prefilter<'a>(
    projects: &'a [Project],
    constraints: &ConstraintSet,
) -> (Vec<(usize, &'a Project)>, Vec<Exclusion>) {
    let mut feasible = Vec::with_capacity(projects.len());
    let mut exclusions = Vec::new();

    for (pos, project) in projects.iter().enumerate() {
        let reason = match constraints.max_timeline_months {
            Some(cap) if project.timeline_months > Decimal::from(cap) => {
                Some(ExclusionReason::TimelineExceedsCap {
                    timeline_months: project.timeline_months,
                    cap_months: cap,
                })
            }
            _ if project.has_no_impact_data() => Some(ExclusionReason::NoImpactData),
            _ => None,
        };

        match reason {
            Some(reason) => exclusions.push(Exclusion {
                index: project.index,
                project: project.name.clone(),
                reason,
            }),
            None => feasible.push((pos, project)),
        }
    }

    (feasible, exclusions)
}
