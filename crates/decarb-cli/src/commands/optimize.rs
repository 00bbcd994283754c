use chrono::NaiveDate;
use decarb_core::catalogue::read_catalogue_file;
use decarb_core::error::DecarbError;
use decarb_core::export::write_selection_csv;
use decarb_core::forecast::load_forecast;
use decarb_core::model::RawField;
use decarb_core::normalize::NumericPolicy;
use decarb_core::ranking::DEFAULT_TOP_N;
use decarb_core::scenario::{load_scenario, validate_scenario, Scenario};
use decarb_core::select::DEFAULT_MAX_FRONTIER_STATES;
use decarb_core::PlanOptions;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::output;

pub struct OptimizeArgs {
    pub catalogue: PathBuf,
    pub scenario: Option<PathBuf>,
    pub investment: Option<String>,
    pub carbon: Option<String>,
    pub target_date: Option<String>,
    pub today: Option<NaiveDate>,
    pub forecast: Option<PathBuf>,
    pub strict: bool,
    pub top: Option<usize>,
    pub output_format: String,
    pub export: Option<PathBuf>,
}

pub fn run(args: OptimizeArgs) -> Result<(), DecarbError> {
    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario {
            name: "command line".into(),
            description: None,
            investment: None,
            carbon_reduction: None,
            target_date: None,
            today: None,
            numeric_policy: NumericPolicy::Permissive,
            top_n: DEFAULT_TOP_N,
            max_frontier_states: DEFAULT_MAX_FRONTIER_STATES,
        },
    };

    // Flags override the scenario file.
    if let Some(v) = args.investment {
        scenario.investment = Some(RawField::Text(v));
    }
    if let Some(v) = args.carbon {
        scenario.carbon_reduction = Some(RawField::Text(v));
    }
    if let Some(v) = args.target_date {
        scenario.target_date = Some(v);
    }
    if args.strict {
        scenario.numeric_policy = NumericPolicy::Strict;
    }
    if let Some(n) = args.top {
        scenario.top_n = n;
    }
    validate_scenario(&scenario)?;

    let today = args
        .today
        .or_else(|| scenario.today())
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let catalogue = read_catalogue_file(&args.catalogue)?;
    let forecast = args.forecast.as_deref().map(load_forecast).transpose()?;

    let options = PlanOptions {
        numeric_policy: scenario.numeric_policy,
        top_n: scenario.top_n,
        selector: scenario.selector_options(),
    };
    tracing::debug!(
        target: "decarb::cli",
        scenario = %scenario.name,
        %today,
        "planning"
    );

    let report = decarb_core::plan(
        &catalogue.projects,
        &scenario.raw_constraints(),
        today,
        forecast.as_ref(),
        &options,
    )?;

    if let Some(path) = &args.export {
        let file = File::create(path)?;
        write_selection_csv(&report.selection.selected_projects, BufWriter::new(file))?;
        eprintln!(
            "Wrote {} project(s) to {}",
            report.selection.selected_projects.len(),
            path.display()
        );
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report, &catalogue.skipped_rows),
    }

    Ok(())
}
