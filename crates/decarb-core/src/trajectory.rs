use crate::constraints::ConstraintSet;
use crate::error::DecarbError;
use crate::forecast::EmissionsForecast;
use crate::model::{checked_sum, Project};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One year of the reduction-target line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    pub value: Decimal,
    /// Only set on the final point: the reduction the line aims for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<Decimal>,
}

/// Straight line from the base-year emissions to the target-year value.
///
/// The target value comes from the stated carbon floor when there is one,
/// otherwise from the selection's actual reduction when an investment cap
/// drove it. Returns `Ok(None)` when there is no target date, the target year
/// is not after the base year, or an investment-only request selected
/// nothing. Fails with `AmountOverflow` when the target leaves the decimal
/// range.
pub fn build_trajectory(
    base_year: i32,
    base_value: Decimal,
    constraints: &ConstraintSet,
    selection: &[Project],
) -> Result<Option<Vec<TrajectoryPoint>>, DecarbError> {
    let Some(target_date) = constraints.target_date else {
        return Ok(None);
    };
    let target_year = target_date.year();
    if target_year <= base_year {
        return Ok(None);
    }

    let reduction = match (constraints.carbon_floor(), constraints.max_investment) {
        (Some(floor), _) => floor,
        (None, Some(_)) if selection.is_empty() => return Ok(None),
        (None, Some(_)) => checked_sum(
            selection.iter().map(|p| p.carbon_reduction_per_year),
            "target reduction",
        )?,
        (None, None) => Decimal::ZERO,
    };
    let target_value = base_value
        .checked_sub(reduction)
        .ok_or_else(|| DecarbError::AmountOverflow("target value".into()))?;

    // Each step is a fraction of the reduction, so intermediate values stay
    // between the two endpoints.
    let span = target_year - base_year;
    let mut points = Vec::with_capacity(span as usize + 1);
    for i in 0..=span {
        let last = i == span;
        let value = if last {
            target_value
        } else {
            let step = reduction
                .checked_mul(Decimal::from(i) / Decimal::from(span))
                .ok_or_else(|| DecarbError::AmountOverflow("target line".into()))?;
            base_value - step
        };
        points.push(TrajectoryPoint {
            year: base_year + i,
            value,
            reduction: last.then_some(reduction),
        });
    }

    Ok(Some(points))
}

/// `build_trajectory` anchored on the first year of a plant forecast.
pub fn trajectory_for_forecast(
    forecast: &EmissionsForecast,
    constraints: &ConstraintSet,
    selection: &[Project],
) -> Result<Option<Vec<TrajectoryPoint>>, DecarbError> {
    let Some(base) = forecast.base_year() else {
        return Ok(None);
    };
    build_trajectory(base.year, base.total()?, constraints, selection)
}
