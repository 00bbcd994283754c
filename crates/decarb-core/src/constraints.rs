use crate::model::{f64_to_decimal, RawField};
use crate::normalize::parse_amount;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Constraint values as entered on the form or in a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConstraints {
    #[serde(default)]
    pub investment: Option<RawField>,
    #[serde(default)]
    pub carbon_reduction: Option<RawField>,
    /// ISO-8601 date (`2030-12-31`) or RFC 3339 timestamp.
    #[serde(default)]
    pub target_date: Option<String>,
}

/// Normalized bounds. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub max_investment: Option<Decimal>,
    pub min_carbon_reduction: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub max_timeline_months: Option<u32>,
}

impl ConstraintSet {
    pub fn with_max_investment(mut self, cap: Decimal) -> Self {
        self.max_investment = Some(cap);
        self
    }

    pub fn with_min_carbon_reduction(mut self, floor: Decimal) -> Self {
        self.min_carbon_reduction = Some(floor);
        self
    }

    pub fn with_timeline_cap(mut self, months: u32) -> Self {
        self.max_timeline_months = Some(months);
        self
    }

    /// Set the target date and derive the month cap relative to `today`.
    pub fn with_target_date(mut self, target: NaiveDate, today: NaiveDate) -> Self {
        self.target_date = Some(target);
        self.max_timeline_months = Some(months_until(today, target));
        self
    }

    /// The carbon floor, if it actually constrains anything (> 0).
    pub fn carbon_floor(&self) -> Option<Decimal> {
        self.min_carbon_reduction.filter(|f| *f > Decimal::ZERO)
    }
}

/// Normalize raw constraints. Never fails: malformed bounds are dropped.
pub fn normalize_constraints(raw: &RawConstraints, today: NaiveDate) -> ConstraintSet {
    let max_investment = raw.investment.as_ref().and_then(non_negative);
    let min_carbon_reduction = raw.carbon_reduction.as_ref().and_then(non_negative);

    let target_date = raw.target_date.as_deref().and_then(|s| {
        let parsed = parse_target_date(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::warn!(
                target: "decarb::constraints",
                target_date = s,
                "unparseable target date, timeline left unconstrained"
            );
        }
        parsed
    });

    ConstraintSet {
        max_investment,
        min_carbon_reduction,
        target_date,
        max_timeline_months: target_date.map(|t| months_until(today, t)),
    }
}

fn non_negative(field: &RawField) -> Option<Decimal> {
    let value = match field {
        RawField::Number(n) => f64_to_decimal(*n),
        RawField::Text(t) => parse_amount(t),
    }?;
    if value.is_sign_negative() && !value.is_zero() {
        tracing::warn!(
            target: "decarb::constraints",
            value = %value,
            "negative bound ignored"
        );
        None
    } else {
        Some(value)
    }
}

/// Parse `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_target_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Whole calendar months from `today` until `target`, floored at zero.
///
/// A month only counts once the target's day-of-month has been reached, so
/// 2025-01-15 → 2025-03-14 is one month.
pub fn months_until(today: NaiveDate, target: NaiveDate) -> u32 {
    let mut months = (target.year() - today.year()) * 12 + target.month() as i32
        - today.month() as i32;
    if target.day() < today.day() {
        months -= 1;
    }
    months.max(0) as u32
}
