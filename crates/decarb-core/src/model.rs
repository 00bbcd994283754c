use crate::error::DecarbError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric cell as it arrived from the catalogue, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Number(n) => write!(f, "{n}"),
            RawField::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for RawField {
    fn from(n: f64) -> Self {
        RawField::Number(n)
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

/// The numeric fields of a project row the selector depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Investment,
    CarbonReduction,
    Timeline,
}

impl ProjectField {
    /// Column header used by the project template spreadsheet.
    pub fn column(&self) -> &'static str {
        match self {
            ProjectField::Investment => crate::catalogue::columns::INVESTMENT,
            ProjectField::CarbonReduction => crate::catalogue::columns::CARBON_REDUCTION,
            ProjectField::Timeline => crate::catalogue::columns::TIMELINE,
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One catalogue row as supplied by a reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub approach: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub carbon_reduction: Option<RawField>,
    #[serde(default)]
    pub investment: Option<RawField>,
    #[serde(default)]
    pub timeline_months: Option<RawField>,
}

impl RawProject {
    pub fn field(&self, field: ProjectField) -> Option<&RawField> {
        match field {
            ProjectField::Investment => self.investment.as_ref(),
            ProjectField::CarbonReduction => self.carbon_reduction.as_ref(),
            ProjectField::Timeline => self.timeline_months.as_ref(),
        }
    }

    /// Display label for diagnostics.
    pub fn label(&self, row: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("row {}", row + 1))
    }
}

/// A normalized candidate reduction project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// 0-based position in the catalogue.
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub approach: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub investment_cost: Decimal,
    /// kg CO2 per year.
    pub carbon_reduction_per_year: Decimal,
    pub timeline_months: Decimal,
}

impl Project {
    pub fn has_no_impact_data(&self) -> bool {
        self.investment_cost.is_zero() && self.carbon_reduction_per_year.is_zero()
    }
}

/// Convert f64 to Decimal without picking up binary floating-point noise.
///
/// Goes through the shortest `Display` form, so 0.0035_f64 becomes exactly
/// 0.0035 rather than 0.00349999...
pub(crate) fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    let s = format!("{f}");
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

/// Sum decimals, failing with `AmountOverflow` instead of panicking.
pub(crate) fn checked_sum<I>(values: I, what: &str) -> Result<Decimal, DecarbError>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| DecarbError::AmountOverflow(what.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(0.0035), Some(dec!(0.0035)));
        assert_eq!(f64_to_decimal(68.0), Some(dec!(68)));
        assert_eq!(f64_to_decimal(1.23), Some(dec!(1.23)));
    }

    #[test]
    fn test_f64_to_decimal_rejects_non_finite() {
        assert_eq!(f64_to_decimal(f64::NAN), None);
        assert_eq!(f64_to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_raw_field_deserializes_untagged() {
        let p: RawProject = serde_json::from_str(
            r#"{"name": "LED retrofit", "investment": 1200.5, "timeline_months": "6"}"#,
        )
        .unwrap();
        assert_eq!(p.investment, Some(RawField::Number(1200.5)));
        assert_eq!(p.timeline_months, Some(RawField::Text("6".into())));
        assert_eq!(p.carbon_reduction, None);
    }

    #[test]
    fn test_checked_sum_reports_overflow() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5)], "x").unwrap(), dec!(3.5));
        let big = dec!(50000000000000000000000000000);
        let err = checked_sum([big, big], "total investment").unwrap_err();
        assert!(matches!(err, DecarbError::AmountOverflow(ref w) if w == "total investment"));
    }

    #[test]
    fn test_label_falls_back_to_row_number() {
        let p = RawProject::default();
        assert_eq!(p.label(4), "row 5");
    }
}
