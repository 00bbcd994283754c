use crate::model::Project;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 5;

/// A row of the "top projects by impact" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProject {
    /// 1-based.
    pub rank: usize,
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// kg CO2 per year.
    pub carbon_reduction: Decimal,
    /// Tonnes CO2 per year, two decimals.
    pub reduction_tonnes: String,
    pub investment_cost: Decimal,
    pub investment_display: String,
    pub timeline_months: Decimal,
    pub timeline_display: String,
}

/// The `n` projects with the largest annual reduction.
///
/// Ranks whatever slice it is given; the planner passes the full normalized
/// catalogue, not the selection. Equal reductions keep catalogue order.
pub fn top_projects(projects: &[Project], n: usize) -> Vec<TopProject> {
    let mut ranked: Vec<&Project> = projects.iter().collect();
    ranked.sort_by(|a, b| b.carbon_reduction_per_year.cmp(&a.carbon_reduction_per_year));

    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, p)| TopProject {
            rank: i + 1,
            index: p.index,
            name: p.name.clone(),
            category: p.category.clone(),
            carbon_reduction: p.carbon_reduction_per_year,
            reduction_tonnes: format_tonnes(p.carbon_reduction_per_year),
            investment_cost: p.investment_cost,
            investment_display: format_grouped(p.investment_cost),
            timeline_months: p.timeline_months,
            timeline_display: format_months(p.timeline_months),
        })
        .collect()
}

/// kg → tonnes with exactly two decimals ("5.00").
pub fn format_tonnes(kg: Decimal) -> String {
    let mut t = (kg / Decimal::ONE_THOUSAND).round_dp(2);
    t.rescale(2);
    t.to_string()
}

/// Thousands-grouped amount, at most two decimals ("2,500,000", "1,200.5").
pub fn format_grouped(amount: Decimal) -> String {
    let s = amount.round_dp(2).normalize().to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_months(months: Decimal) -> String {
    let m = months.normalize();
    if m == Decimal::ONE {
        "1 month".to_string()
    } else {
        format!("{m} months")
    }
}
