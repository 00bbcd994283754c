use crate::error::DecarbError;
use crate::model::{f64_to_decimal, Project, ProjectField, RawField, RawProject};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How malformed numeric project fields are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Missing, non-numeric or negative values become 0 and are reported.
    #[default]
    Permissive,
    /// The first malformed value fails normalization.
    Strict,
}

/// A project field that was coerced to zero under the permissive policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWarning {
    /// 0-based catalogue row.
    pub row: usize,
    pub project: String,
    pub field: ProjectField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedCatalogue {
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FieldWarning>,
}

/// Normalize raw catalogue rows into projects under the given policy.
pub fn normalize_catalogue(
    raw: &[RawProject],
    policy: NumericPolicy,
) -> Result<NormalizedCatalogue, DecarbError> {
    let mut projects = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (row, rp) in raw.iter().enumerate() {
        let mut field = |f: ProjectField| normalize_field(rp, row, f, policy, &mut warnings);
        let investment_cost = field(ProjectField::Investment)?;
        let carbon_reduction_per_year = field(ProjectField::CarbonReduction)?;
        let timeline_months = field(ProjectField::Timeline)?;

        projects.push(Project {
            index: row,
            name: rp.label(row),
            category: rp.category.clone(),
            approach: rp.approach.clone(),
            description: rp.description.clone(),
            investment_cost,
            carbon_reduction_per_year,
            timeline_months,
        });
    }

    if !warnings.is_empty() {
        tracing::warn!(
            target: "decarb::normalize",
            warnings = warnings.len(),
            "malformed project fields coerced to zero"
        );
    }

    Ok(NormalizedCatalogue { projects, warnings })
}

fn normalize_field(
    rp: &RawProject,
    row: usize,
    field: ProjectField,
    policy: NumericPolicy,
    warnings: &mut Vec<FieldWarning>,
) -> Result<Decimal, DecarbError> {
    let raw = rp.field(field);
    let problem = match raw {
        None => Err("missing value"),
        Some(RawField::Number(n)) => f64_to_decimal(*n).ok_or("not a finite number"),
        Some(RawField::Text(t)) => parse_amount(t).ok_or("not a number"),
    }
    .and_then(|v| {
        if v.is_sign_negative() && !v.is_zero() {
            Err("negative value")
        } else {
            Ok(v)
        }
    });

    match problem {
        Ok(v) => Ok(v),
        Err(reason) => {
            let raw_text = raw.map(|r| r.to_string());
            match policy {
                NumericPolicy::Strict => Err(DecarbError::InvalidField {
                    row: row + 1,
                    project: rp.label(row),
                    field: field.to_string(),
                    raw: raw_text.unwrap_or_default(),
                    reason: reason.to_string(),
                }),
                NumericPolicy::Permissive => {
                    tracing::debug!(
                        target: "decarb::normalize",
                        row,
                        field = %field,
                        reason,
                        "coercing field to zero"
                    );
                    warnings.push(FieldWarning {
                        row,
                        project: rp.label(row),
                        field,
                        raw: raw_text,
                        reason: reason.to_string(),
                    });
                    Ok(Decimal::ZERO)
                }
            }
        }
    }
}

/// Parse a monetary or quantity string as typed into a spreadsheet.
///
/// Accepts thousands separators in any grouping ("1,20,000", "1,200,000"),
/// a leading currency marker ("Rs.", "₹", "INR") and scientific notation.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let mut t = s.trim();
    for prefix in ["Rs.", "Rs", "INR", "₹"] {
        if let Some(rest) = t.strip_prefix(prefix) {
            t = rest.trim_start();
            break;
        }
    }

    let cleaned: String = t
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .ok()
        .or_else(|| Decimal::from_scientific(&cleaned).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(investment: Option<RawField>) -> RawProject {
        RawProject {
            name: Some("Boiler upgrade".into()),
            investment,
            carbon_reduction: Some(RawField::Number(120.0)),
            timeline_months: Some(RawField::Text("6".into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_amount_handles_indian_grouping() {
        assert_eq!(parse_amount("1,20,000"), Some(dec!(120000)));
        assert_eq!(parse_amount("Rs. 2,500.50"), Some(dec!(2500.50)));
        assert_eq!(parse_amount("₹ 900"), Some(dec!(900)));
        assert_eq!(parse_amount(" 42 "), Some(dec!(42)));
        assert_eq!(parse_amount("1e3"), Some(dec!(1000)));
    }

    #[test]
    fn test_parse_amount_rejects_text() {
        assert_eq!(parse_amount("tbd"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("Rs."), None);
    }

    #[test]
    fn test_permissive_coerces_missing_to_zero() {
        let out = normalize_catalogue(&[raw(None)], NumericPolicy::Permissive).unwrap();
        let p = &out.projects[0];
        assert_eq!(p.investment_cost, Decimal::ZERO);
        assert_eq!(p.carbon_reduction_per_year, dec!(120));
        assert_eq!(p.timeline_months, dec!(6));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, ProjectField::Investment);
        assert_eq!(out.warnings[0].raw, None);
    }

    #[test]
    fn test_permissive_coerces_negative_and_text() {
        let rows = vec![
            raw(Some(RawField::Number(-5.0))),
            raw(Some(RawField::Text("pending quote".into()))),
        ];
        let out = normalize_catalogue(&rows, NumericPolicy::Permissive).unwrap();
        assert!(out.projects.iter().all(|p| p.investment_cost.is_zero()));
        assert_eq!(out.warnings[0].reason, "negative value");
        assert_eq!(out.warnings[1].reason, "not a number");
        assert_eq!(out.warnings[1].raw.as_deref(), Some("pending quote"));
    }

    #[test]
    fn test_strict_rejects_malformed_field() {
        let err = normalize_catalogue(
            &[raw(Some(RawField::Text("n/a".into())))],
            NumericPolicy::Strict,
        )
        .unwrap_err();
        match err {
            DecarbError::InvalidField {
                row, field, raw, ..
            } => {
                assert_eq!(row, 1);
                assert_eq!(field, "Estimated Investment in Rs.");
                assert_eq!(raw, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_accepts_clean_rows() {
        let out = normalize_catalogue(
            &[raw(Some(RawField::Number(1500.0)))],
            NumericPolicy::Strict,
        )
        .unwrap();
        assert_eq!(out.projects[0].investment_cost, dec!(1500));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_descriptive_fields_pass_through() {
        let mut r = raw(Some(RawField::Number(1.0)));
        r.category = Some("Scope 2".into());
        r.description = Some("Replace chillers".into());
        let out = normalize_catalogue(&[r], NumericPolicy::Permissive).unwrap();
        assert_eq!(out.projects[0].category.as_deref(), Some("Scope 2"));
        assert_eq!(
            out.projects[0].description.as_deref(),
            Some("Replace chillers")
        );
        assert_eq!(out.projects[0].index, 0);
    }
}
