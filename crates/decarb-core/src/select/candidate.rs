use crate::error::DecarbError;
use crate::model::Project;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// A subset of feasible projects with its running totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub investment: Decimal,
    pub carbon: Decimal,
    /// Positions in the caller's project slice, in insertion order.
    pub positions: Vec<usize>,
}

impl Candidate {
    pub fn empty() -> Self {
        Candidate {
            investment: Decimal::ZERO,
            carbon: Decimal::ZERO,
            positions: Vec::new(),
        }
    }

    /// This subset plus `project`. Fails rather than wrapping when a total
    /// leaves the decimal range.
    pub fn with(&self, pos: usize, project: &Project) -> Result<Candidate, DecarbError> {
        let investment = self
            .investment
            .checked_add(project.investment_cost)
            .ok_or_else(|| DecarbError::AmountOverflow("total investment".into()))?;
        let carbon = self
            .carbon
            .checked_add(project.carbon_reduction_per_year)
            .ok_or_else(|| DecarbError::AmountOverflow("total carbon reduction".into()))?;

        let mut positions = Vec::with_capacity(self.positions.len() + 1);
        positions.extend_from_slice(&self.positions);
        positions.push(pos);
        Ok(Candidate {
            investment,
            carbon,
            positions,
        })
    }

    /// Preference order between candidates: lower investment, then higher
    /// carbon, then fewer projects, then earliest catalogue positions.
    ///
    /// `Less` means `self` is preferred. Positions must be ascending on both
    /// sides for the last rule to mean "first found".
    pub fn preference(&self, other: &Candidate) -> Ordering {
        self.investment
            .cmp(&other.investment)
            .then_with(|| other.carbon.cmp(&self.carbon))
            .then_with(|| self.positions.len().cmp(&other.positions.len()))
            .then_with(|| self.positions.cmp(&other.positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cand(investment: Decimal, carbon: Decimal, positions: &[usize]) -> Candidate {
        Candidate {
            investment,
            carbon,
            positions: positions.to_vec(),
        }
    }

    fn project(cost: Decimal, reduction: Decimal) -> Project {
        Project {
            index: 0,
            name: "P0".into(),
            category: None,
            approach: None,
            description: None,
            investment_cost: cost,
            carbon_reduction_per_year: reduction,
            timeline_months: Decimal::ZERO,
        }
    }

    #[test]
    fn test_with_accumulates_totals() {
        let c = Candidate::empty()
            .with(2, &project(dec!(10), dec!(4)))
            .unwrap()
            .with(5, &project(dec!(1.5), dec!(0)))
            .unwrap();
        assert_eq!(c.investment, dec!(11.5));
        assert_eq!(c.carbon, dec!(4));
        assert_eq!(c.positions, vec![2, 5]);
    }

    #[test]
    fn test_with_overflow_is_an_error() {
        let big = dec!(50000000000000000000000000000);
        let one = Candidate::empty().with(0, &project(dec!(1), big)).unwrap();
        let err = one.with(1, &project(dec!(1), big)).unwrap_err();
        assert!(matches!(err, DecarbError::AmountOverflow(_)));
    }

    #[test]
    fn test_lower_investment_wins_first() {
        let a = cand(dec!(100), dec!(10), &[0]);
        let b = cand(dec!(150), dec!(90), &[1]);
        assert_eq!(a.preference(&b), Ordering::Less);
    }

    #[test]
    fn test_then_higher_carbon() {
        let a = cand(dec!(100), dec!(10), &[0]);
        let b = cand(dec!(100), dec!(20), &[1]);
        assert_eq!(a.preference(&b), Ordering::Greater);
    }

    #[test]
    fn test_then_fewer_projects_then_catalogue_order() {
        let a = cand(dec!(100), dec!(20), &[0, 3]);
        let b = cand(dec!(100), dec!(20), &[5]);
        assert_eq!(a.preference(&b), Ordering::Greater);

        let c = cand(dec!(100), dec!(20), &[1, 2]);
        assert_eq!(a.preference(&c), Ordering::Less);
    }
}
