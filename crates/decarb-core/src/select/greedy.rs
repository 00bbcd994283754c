use crate::error::DecarbError;
use crate::model::Project;
use crate::select::candidate::Candidate;
use rust_decimal::Decimal;

/// Take projects in descending carbon order until `floor` is reached.
///
/// Without an investment cap there is nothing to trade carbon against, so the
/// largest reductions first give the fewest projects needed. Ties on carbon go
/// to the cheaper project, then the earlier row. Returns `None` when the whole
/// list falls short of the floor, and `AmountOverflow` when a running total
/// leaves the decimal range.
pub(crate) fn fill_to_floor(
    projects: &[(usize, &Project)],
    floor: Decimal,
) -> Result<Option<Candidate>, DecarbError> {
    let mut order: Vec<(usize, &Project)> = projects.to_vec();
    order.sort_by(|(pa, a), (pb, b)| {
        b.carbon_reduction_per_year
            .cmp(&a.carbon_reduction_per_year)
            .then_with(|| a.investment_cost.cmp(&b.investment_cost))
            .then_with(|| pa.cmp(pb))
    });

    let mut chosen = Candidate::empty();
    for (pos, project) in order {
        if chosen.carbon >= floor {
            break;
        }
        chosen = chosen.with(pos, project)?;
    }

    if chosen.carbon < floor {
        return Ok(None);
    }
    chosen.positions.sort_unstable();
    Ok(Some(chosen))
}
