use crate::error::DecarbError;
use crate::model::Project;
use crate::select::candidate::Candidate;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// 0/1 knapsack over exact investment totals.
///
/// Walks the projects in catalogue order and keeps, for every reachable
/// investment total up to `cap`, only subsets that no other subset beats on
/// both cost and carbon. The returned frontier is sorted by investment with
/// strictly increasing carbon, so:
/// - the last entry is the maximum-carbon subset within the cap;
/// - the first entry meeting a carbon floor is the cheapest one that does.
///
/// Equal (investment, carbon) pairs are resolved with `Candidate::preference`.
pub(crate) fn pareto_frontier(
    projects: &[(usize, &Project)],
    cap: Decimal,
    limit: usize,
) -> Result<Vec<Candidate>, DecarbError> {
    let mut frontier = vec![Candidate::empty()];

    for &(pos, project) in projects {
        // Adding the same project keeps the frontier's sort order, so the
        // first total past the cap ends the extension.
        let mut extended = Vec::with_capacity(frontier.len());
        for c in &frontier {
            match c.investment.checked_add(project.investment_cost) {
                Some(total) if total <= cap => extended.push(c.with(pos, project)?),
                _ => break,
            }
        }

        frontier = prune(merge(frontier, extended));

        if frontier.len() > limit {
            return Err(DecarbError::SearchSpaceExceeded {
                states: frontier.len(),
                limit,
            });
        }
    }

    tracing::debug!(
        target: "decarb::select",
        projects = projects.len(),
        states = frontier.len(),
        "frontier complete"
    );

    Ok(frontier)
}

fn merge(a: Vec<Candidate>, b: Vec<Candidate>) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();

    loop {
        let take_a = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => x.preference(y) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_a { a.next() } else { b.next() };
        out.extend(next);
    }

    out
}

/// Drop dominated subsets from a preference-sorted list.
///
/// Within equal investment the first entry carries the most carbon; any later
/// entry that does not raise carbon costs at least as much for no gain.
fn prune(sorted: Vec<Candidate>) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(sorted.len());
    for c in sorted {
        if out.last().is_some_and(|last| c.carbon <= last.carbon) {
            continue;
        }
        out.push(c);
    }
    out
}
