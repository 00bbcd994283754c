use decarb_core::error::DecarbError;
use std::path::Path;

pub fn schema() -> Result<(), DecarbError> {
    print!(
        r#"Scenario File Schema
====================

A scenario file saves a planning request so it can be re-run with
`decarb optimize <catalogue> --scenario <file>`. Command-line flags
override the values stored in the file.

Fields:
  name          (string, required)  Human-readable name of the scenario
  description   (string, optional)  What this scenario is for
  investment    (number or string, optional)
                                    Investment cap in Rs. Strings may use
                                    thousands separators and a currency
                                    prefix ("Rs. 2,50,000").
  carbon_reduction
                (number or string, optional)
                                    Minimum annual reduction in kg CO2.
                                    0 means no floor.
  target_date   (string, optional)  Date all selected projects must be
                                    complete by (YYYY-MM-DD). Projects
                                    longer than the months left are
                                    excluded before selection.
  today         (string, optional)  Reference date for the month count.
                                    Defaults to the day the command runs.
  numeric_policy
                (string, optional)  "permissive" (default): malformed
                                    catalogue numbers count as 0 and are
                                    reported. "strict": they are errors.
  top_n         (integer, optional) Projects in the top-by-impact list.
                                    Default: 5
  max_frontier_states
                (integer, optional) Limit on candidate totals the search
                                    keeps before giving up. Default: 250000

Which bounds are set decides the objective:
  investment only       maximize reduction within the cap
  investment + carbon   cheapest set meeting the reduction target
  carbon only           fewest projects (largest first) meeting the target

Example:
{{
  "name": "FY30 plan",
  "description": "Board-approved budget, 2030 commitment",
  "investment": "Rs. 25,00,000",
  "carbon_reduction": 150000,
  "target_date": "2030-03-31",
  "today": "2025-04-01",
  "top_n": 5
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DecarbError> {
    let s = decarb_core::scenario::load_scenario(file)?;

    println!("Scenario '{}' is valid.", s.name);
    if let Some(ref desc) = s.description {
        println!("  {}", desc);
    }

    let show = |v: &Option<decarb_core::model::RawField>| {
        v.as_ref()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".into())
    };
    println!("  Investment cap:   {}", show(&s.investment));
    println!("  Carbon target:    {}", show(&s.carbon_reduction));
    println!(
        "  Target date:      {}",
        s.target_date.as_deref().unwrap_or("-")
    );
    println!("  Numeric policy:   {:?}", s.numeric_policy);
    println!("  Top projects:     {}", s.top_n);

    // Bounds are normalized leniently at run time; point out ones that will be dropped.
    let constraints = decarb_core::constraints::normalize_constraints(
        &s.raw_constraints(),
        s.today().unwrap_or_else(|| chrono::Local::now().date_naive()),
    );
    let mut warnings = Vec::new();
    if s.investment.is_some() && constraints.max_investment.is_none() {
        warnings.push("investment is not a non-negative number and will be ignored");
    }
    if s.carbon_reduction.is_some() && constraints.min_carbon_reduction.is_none() {
        warnings.push("carbon_reduction is not a non-negative number and will be ignored");
    }
    if s.target_date.is_some() && constraints.target_date.is_none() {
        warnings.push("target_date is not a date and will be ignored");
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
