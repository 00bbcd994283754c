use crate::error::DecarbError;
use crate::model::{checked_sum, f64_to_decimal, RawField};
use crate::normalize::parse_amount;
use crate::trajectory::TrajectoryPoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsYear {
    pub year: i32,
    pub scope1: Decimal,
    pub scope2: Decimal,
}

impl EmissionsYear {
    pub fn total(&self) -> Result<Decimal, DecarbError> {
        self.scope1
            .checked_add(self.scope2)
            .ok_or_else(|| DecarbError::AmountOverflow(format!("{} emissions total", self.year)))
    }
}

/// Per-year scope 1 / scope 2 emissions, sorted by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsForecast {
    pub years: Vec<EmissionsYear>,
}

impl EmissionsForecast {
    /// The first forecast year; trajectories start here.
    pub fn base_year(&self) -> Option<&EmissionsYear> {
        self.years.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewableYear {
    pub year: i32,
    pub solar: Decimal,
    pub wind: Decimal,
    pub others: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewableForecast {
    pub years: Vec<RenewableYear>,
}

/// Everything the plant record stores about future years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantForecast {
    pub emissions: EmissionsForecast,
    pub renewables: RenewableForecast,
}

impl PlantForecast {
    /// Build from the flat `<series>_<year>` keys the plant store uses
    /// (`scope1_2025`, `solar_2026`, ...).
    ///
    /// Unknown keys are ignored. Missing or malformed values count as 0, and
    /// a year appears in a series if any of that series' keys mention it.
    pub fn from_flat(values: &BTreeMap<String, RawField>) -> Result<PlantForecast, DecarbError> {
        let mut emissions: BTreeMap<i32, EmissionsYear> = BTreeMap::new();
        let mut renewables: BTreeMap<i32, RenewableYear> = BTreeMap::new();

        for (key, raw) in values {
            let Some((series, year)) = key
                .rsplit_once('_')
                .and_then(|(s, y)| y.parse::<i32>().ok().map(|y| (s, y)))
            else {
                continue;
            };
            let value = decimal_or_zero(raw);

            match series.to_ascii_lowercase().as_str() {
                "scope1" => emissions_at(&mut emissions, year).scope1 = value,
                "scope2" => emissions_at(&mut emissions, year).scope2 = value,
                "solar" => renewables_at(&mut renewables, year).solar = value,
                "wind" => renewables_at(&mut renewables, year).wind = value,
                "others" => renewables_at(&mut renewables, year).others = value,
                _ => {}
            }
        }

        let renewables = renewables
            .into_values()
            .map(|mut r| -> Result<RenewableYear, DecarbError> {
                r.total = checked_sum(
                    [r.solar, r.wind, r.others],
                    &format!("{} renewables total", r.year),
                )?;
                Ok(r)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlantForecast {
            emissions: EmissionsForecast {
                years: emissions.into_values().collect(),
            },
            renewables: RenewableForecast { years: renewables },
        })
    }
}

fn emissions_at(map: &mut BTreeMap<i32, EmissionsYear>, year: i32) -> &mut EmissionsYear {
    map.entry(year).or_insert_with(|| EmissionsYear {
        year,
        ..Default::default()
    })
}

fn renewables_at(map: &mut BTreeMap<i32, RenewableYear>, year: i32) -> &mut RenewableYear {
    map.entry(year).or_insert_with(|| RenewableYear {
        year,
        ..Default::default()
    })
}

fn decimal_or_zero(raw: &RawField) -> Decimal {
    match raw {
        RawField::Number(n) => f64_to_decimal(*n),
        RawField::Text(t) => parse_amount(t),
    }
    .unwrap_or(Decimal::ZERO)
}

/// Load a flat-key forecast JSON object, e.g. a plant record export.
///
/// Non-numeric, non-string members (ids, nulls, nested objects) are skipped.
pub fn load_forecast(path: &Path) -> Result<PlantForecast, DecarbError> {
    let bytes = std::fs::read(path)?;
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&bytes)?;
    let values: BTreeMap<String, RawField> = object
        .into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::Number(n) => n.as_f64().map(|f| (k, RawField::Number(f))),
            serde_json::Value::String(s) => Some((k, RawField::Text(s))),
            _ => None,
        })
        .collect();
    PlantForecast::from_flat(&values)
}

/// One bar group of the emissions chart with the optional target overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: i32,
    pub scope1: Decimal,
    pub scope2: Decimal,
    pub total: Decimal,
    pub target_value: Option<Decimal>,
}

/// Left-join a trajectory onto the fixed bar series by year.
///
/// Bars always come from `bars` as given; only the overlay reflects the
/// current request.
pub fn emissions_chart(
    bars: &EmissionsForecast,
    trajectory: Option<&[TrajectoryPoint]>,
) -> Result<Vec<ChartPoint>, DecarbError> {
    bars.years
        .iter()
        .map(|y| -> Result<ChartPoint, DecarbError> {
            Ok(ChartPoint {
                year: y.year,
                scope1: y.scope1,
                scope2: y.scope2,
                total: y.total()?,
                target_value: trajectory
                    .and_then(|line| line.iter().find(|p| p.year == y.year))
                    .map(|p| p.value),
            })
        })
        .collect()
}
