use crate::model::{RawField, RawProject};

pub const PROJECT: &str = "Project";
pub const CATEGORY: &str = "Category";
pub const APPROACH: &str = "Approach";
pub const DESCRIPTION: &str = "Description";
pub const CARBON_REDUCTION: &str = "Estimated Carbon Reduction in Kg/CO2 per annum";
pub const INVESTMENT: &str = "Estimated Investment in Rs.";
pub const TIMELINE: &str = "Estimated Timeline";

/// Headers written by the selection export. Accepted on input so an exported
/// sheet can be fed back in.
pub const EXPORT_CARBON_REDUCTION: &str = "Carbon Reduction (Kg)";
pub const EXPORT_INVESTMENT: &str = "Investment (Rs.)";
pub const EXPORT_TIMELINE: &str = "Timeline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Category,
    Approach,
    Description,
    CarbonReduction,
    Investment,
    Timeline,
}

impl Column {
    pub fn from_header(header: &str) -> Option<Column> {
        let h = normalize_header(header);
        let matches = |candidate: &str| h == normalize_header(candidate);

        if matches(PROJECT) || h == "project name" {
            Some(Column::Name)
        } else if matches(CATEGORY) {
            Some(Column::Category)
        } else if matches(APPROACH) {
            Some(Column::Approach)
        } else if matches(DESCRIPTION) {
            Some(Column::Description)
        } else if matches(CARBON_REDUCTION) || matches(EXPORT_CARBON_REDUCTION) {
            Some(Column::CarbonReduction)
        } else if matches(INVESTMENT) || matches(EXPORT_INVESTMENT) {
            Some(Column::Investment)
        } else if matches(TIMELINE) || matches(EXPORT_TIMELINE) {
            Some(Column::Timeline)
        } else {
            None
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            Column::CarbonReduction | Column::Investment | Column::Timeline
        )
    }
}

fn normalize_header(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: Vec<Option<Column>>,
}

impl HeaderMap {
    /// Recognize a header row. Needs at least two known columns, one of them
    /// numeric, so a title row that happens to say "Project" is not taken.
    pub fn detect<S: AsRef<str>>(cells: &[S]) -> Option<HeaderMap> {
        let columns: Vec<Option<Column>> = cells
            .iter()
            .map(|c| Column::from_header(c.as_ref()))
            .collect();

        let known = columns.iter().flatten().count();
        let numeric = columns.iter().flatten().filter(|c| c.is_numeric()).count();
        if known >= 2 && numeric >= 1 {
            Some(HeaderMap { columns })
        } else {
            None
        }
    }

    pub fn column_at(&self, idx: usize) -> Option<Column> {
        self.columns.get(idx).copied().flatten()
    }
}

/// Store a cell value into the matching project field.
pub fn assign(project: &mut RawProject, column: Column, value: RawField) {
    match column {
        Column::Name => project.name = Some(value.to_string()),
        Column::Category => project.category = Some(value.to_string()),
        Column::Approach => project.approach = Some(value.to_string()),
        Column::Description => project.description = Some(value.to_string()),
        Column::CarbonReduction => project.carbon_reduction = Some(value),
        Column::Investment => project.investment = Some(value),
        Column::Timeline => project.timeline_months = Some(value),
    }
}

/// True when the row carries nothing the selector can use.
pub fn is_unusable(project: &RawProject) -> bool {
    project.name.is_none()
        && project.carbon_reduction.is_none()
        && project.investment.is_none()
        && project.timeline_months.is_none()
}
