//! Property tests: the selector against brute-force enumeration, plus the
//! monotonicity and determinism guarantees callers rely on.

use chrono::NaiveDate;
use decarb_core::constraints::ConstraintSet;
use decarb_core::model::Project;
use decarb_core::select::{select, SelectionStatus, SelectorOptions};
use decarb_core::trajectory::build_trajectory;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn catalogue(rows: &[(u32, u32, u32)]) -> Vec<Project> {
    rows.iter()
        .enumerate()
        .map(|(index, &(cost, reduction, months))| Project {
            index,
            name: format!("P{index}"),
            category: None,
            approach: None,
            description: None,
            investment_cost: Decimal::from(cost),
            carbon_reduction_per_year: Decimal::from(reduction),
            timeline_months: Decimal::from(months),
        })
        .collect()
}

fn rows_strategy() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
    prop::collection::vec((0u32..60, 0u32..60, 0u32..13), 0..=12)
}

fn within_timeline(p: &Project, month_cap: Option<u32>) -> bool {
    month_cap.map_or(true, |m| p.timeline_months <= Decimal::from(m))
}

/// (investment, carbon) of every subset that passes the timeline filter.
fn subsets(projects: &[Project], month_cap: Option<u32>) -> Vec<(Decimal, Decimal)> {
    let eligible: Vec<&Project> = projects
        .iter()
        .filter(|p| within_timeline(p, month_cap))
        .collect();
    (0u32..(1 << eligible.len()))
        .map(|mask| {
            eligible
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .fold((Decimal::ZERO, Decimal::ZERO), |(inv, co2), (_, p)| {
                    (inv + p.investment_cost, co2 + p.carbon_reduction_per_year)
                })
        })
        .collect()
}

fn constraints(cap: Option<u32>, floor: Option<u32>, month_cap: Option<u32>) -> ConstraintSet {
    ConstraintSet {
        max_investment: cap.map(Decimal::from),
        min_carbon_reduction: floor.map(Decimal::from),
        target_date: None,
        max_timeline_months: month_cap,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn proptest_investment_mode_matches_brute_force(
        rows in rows_strategy(),
        cap in 0u32..200,
        month_cap in prop::option::of(0u32..13)
    ) {
        let projects = catalogue(&rows);
        let c = constraints(Some(cap), None, month_cap);
        let r = select(&projects, &c, &SelectorOptions::default()).unwrap();

        let best = subsets(&projects, month_cap)
            .into_iter()
            .filter(|(inv, _)| *inv <= Decimal::from(cap))
            .map(|(_, co2)| co2)
            .max()
            .unwrap_or(Decimal::ZERO);

        prop_assert_eq!(r.status, SelectionStatus::Optimal);
        prop_assert_eq!(r.total_carbon_reduction, best);
        prop_assert!(r.total_investment <= Decimal::from(cap));
    }

    #[test]
    fn proptest_fully_constrained_matches_brute_force(
        rows in rows_strategy(),
        cap in 0u32..300,
        floor in 1u32..150,
        month_cap in prop::option::of(0u32..13)
    ) {
        let projects = catalogue(&rows);
        let c = constraints(Some(cap), Some(floor), month_cap);
        let r = select(&projects, &c, &SelectorOptions::default()).unwrap();

        let cheapest = subsets(&projects, month_cap)
            .into_iter()
            .filter(|(inv, co2)| *inv <= Decimal::from(cap) && *co2 >= Decimal::from(floor))
            .map(|(inv, _)| inv)
            .min();

        match cheapest {
            Some(inv) => {
                prop_assert_eq!(r.status, SelectionStatus::Optimal);
                prop_assert_eq!(r.total_investment, inv);
                prop_assert!(r.total_carbon_reduction >= Decimal::from(floor));
            }
            None => prop_assert_eq!(r.status, SelectionStatus::Infeasible),
        }
    }

    #[test]
    fn proptest_greedy_takes_shortest_prefix(
        rows in rows_strategy(),
        floor in 1u32..300,
        month_cap in prop::option::of(0u32..13)
    ) {
        let projects = catalogue(&rows);
        let c = constraints(None, Some(floor), month_cap);
        let r = select(&projects, &c, &SelectorOptions::default()).unwrap();

        let mut reductions: Vec<Decimal> = projects
            .iter()
            .filter(|p| within_timeline(p, month_cap) && !p.has_no_impact_data())
            .map(|p| p.carbon_reduction_per_year)
            .collect();
        reductions.sort_by(|a, b| b.cmp(a));

        let mut running = Decimal::ZERO;
        let needed = reductions.iter().position(|x| {
            running += *x;
            running >= Decimal::from(floor)
        });

        match needed {
            Some(i) => {
                prop_assert_eq!(r.status, SelectionStatus::Optimal);
                prop_assert_eq!(r.selected_projects.len(), i + 1);
                prop_assert!(r.total_carbon_reduction >= Decimal::from(floor));
            }
            None => prop_assert_eq!(r.status, SelectionStatus::Infeasible),
        }
    }

    #[test]
    fn proptest_timeline_cap_is_never_violated(
        rows in rows_strategy(),
        cap in prop::option::of(0u32..400),
        floor in prop::option::of(0u32..200),
        month_cap in 0u32..13
    ) {
        let projects = catalogue(&rows);
        let c = constraints(cap, floor, Some(month_cap));
        let r = select(&projects, &c, &SelectorOptions::default()).unwrap();
        prop_assert!(r
            .selected_projects
            .iter()
            .all(|p| p.timeline_months <= Decimal::from(month_cap)));
    }

    #[test]
    fn proptest_selection_is_deterministic(
        rows in rows_strategy(),
        cap in prop::option::of(0u32..400),
        floor in prop::option::of(0u32..200),
        month_cap in prop::option::of(0u32..13)
    ) {
        let projects = catalogue(&rows);
        let c = constraints(cap, floor, month_cap);
        let first = select(&projects, &c, &SelectorOptions::default()).unwrap();
        let second = select(&projects, &c, &SelectorOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn proptest_relaxing_a_bound_keeps_feasibility(
        rows in rows_strategy(),
        cap in prop::option::of(0u32..300),
        floor in 1u32..200,
        month_cap in 0u32..13,
        extra_cap in 0u32..100,
        less_floor in 0u32..100,
        extra_months in 0u32..6
    ) {
        let projects = catalogue(&rows);
        let options = SelectorOptions::default();
        let base = select(&projects, &constraints(cap, Some(floor), Some(month_cap)), &options)
            .unwrap();
        prop_assume!(base.is_optimal());

        let relaxed = [
            constraints(cap.map(|c| c + extra_cap), Some(floor), Some(month_cap)),
            constraints(cap, Some(floor.saturating_sub(less_floor).max(1)), Some(month_cap)),
            constraints(cap, Some(floor), Some(month_cap + extra_months)),
        ];
        for (i, c) in relaxed.iter().enumerate() {
            let r = select(&projects, c, &options).unwrap();
            prop_assert!(r.is_optimal());
            // With both bounds set the investment is minimized. Without a cap a
            // lower floor stops the greedy prefix earlier, but a later date can
            // admit a larger project ahead of the cheaper ones.
            let more_eligible_projects = i == 2 && cap.is_none();
            if !more_eligible_projects {
                prop_assert!(
                    r.total_investment <= base.total_investment,
                    "relaxation {} raised investment from {} to {}",
                    i,
                    base.total_investment,
                    r.total_investment
                );
            }
        }
    }

    #[test]
    fn proptest_trajectory_endpoints_are_exact(
        base_year in 2000i32..2050,
        span in 1i32..40,
        base_cents in 0i64..100_000_000,
        floor_cents in 1i64..100_000_000
    ) {
        let base_value = Decimal::new(base_cents, 2);
        let floor = Decimal::new(floor_cents, 2);
        let today = NaiveDate::from_ymd_opt(base_year, 1, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(base_year + span, 6, 30).unwrap();
        let c = ConstraintSet::default()
            .with_min_carbon_reduction(floor)
            .with_target_date(target, today);

        let line = build_trajectory(base_year, base_value, &c, &[]).unwrap().unwrap();
        prop_assert_eq!(line.len(), span as usize + 1);
        prop_assert_eq!(line[0].value, base_value);
        prop_assert_eq!(line[span as usize].value, base_value - floor);
        prop_assert_eq!(line[span as usize].reduction, Some(floor));
        prop_assert!(line[..span as usize].iter().all(|p| p.reduction.is_none()));
    }
}
