mod commands;
mod logging;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "decarb",
    version,
    about = "Pick carbon-reduction projects that fit a budget, a target and a deadline"
)]
struct Cli {
    /// Log selector decisions to stderr (same as RUST_LOG=decarb=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a project catalogue (XLSX, CSV or JSON) and show the normalized rows
    Parse {
        /// Path to the catalogue file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Fail on the first malformed numeric cell instead of using 0
        #[arg(long)]
        strict: bool,
    },
    /// Select projects for an investment cap, carbon target and/or date
    Optimize {
        /// Path to the catalogue file
        catalogue: PathBuf,

        /// Scenario file with saved bounds and options; flags override it
        #[arg(short, long, value_name = "FILE")]
        scenario: Option<PathBuf>,

        /// Investment cap in Rs. (e.g. 250000 or "2,50,000")
        #[arg(long, value_name = "AMOUNT")]
        investment: Option<String>,

        /// Minimum annual carbon reduction in kg
        #[arg(long, value_name = "KG")]
        carbon: Option<String>,

        /// Date by which every selected project must be complete (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        target_date: Option<String>,

        /// Reference date for the month cap (default: today)
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Plant forecast JSON with scope1_<year>/scope2_<year> keys
        #[arg(short, long, value_name = "FILE")]
        forecast: Option<PathBuf>,

        /// Fail on the first malformed numeric cell instead of using 0
        #[arg(long)]
        strict: bool,

        /// Number of top projects by impact to list
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the selected projects to a CSV file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Inspect and validate scenario files
    Scenario {
        #[command(subcommand)]
        action: ScenarioAction,
    },
}

#[derive(Subcommand)]
enum ScenarioAction {
    /// Print the scenario file format with an example
    Schema,
    /// Validate a scenario file
    Validate {
        /// Path to JSON scenario file
        file: PathBuf,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    decarb_core::constraints::parse_target_date(s)
        .ok_or_else(|| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            strict,
        } => commands::parse::run(input_file, &output, strict),
        Commands::Optimize {
            catalogue,
            scenario,
            investment,
            carbon,
            target_date,
            today,
            forecast,
            strict,
            top,
            output,
            export,
        } => commands::optimize::run(commands::optimize::OptimizeArgs {
            catalogue,
            scenario,
            investment,
            carbon,
            target_date,
            today,
            forecast,
            strict,
            top,
            output_format: output,
            export,
        }),
        Commands::Scenario { action } => match action {
            ScenarioAction::Schema => commands::scenario::schema(),
            ScenarioAction::Validate { file } => commands::scenario::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
