use decarb_core::catalogue::SkippedRow;
use decarb_core::model::Project;
use decarb_core::normalize::{FieldWarning, NormalizedCatalogue};
use decarb_core::ranking::{format_grouped, format_months, format_tonnes};
use decarb_core::select::SelectionStatus;
use decarb_core::PlanReport;

pub fn print(report: &PlanReport, skipped_rows: &[SkippedRow]) {
    let s = &report.selection;
    let c = &report.constraints;

    println!("=== Selection ({}) ===\n", s.mode);

    let bound = |v: Option<String>| v.unwrap_or_else(|| "none".into());
    println!(
        "  Investment cap:  {}",
        bound(c.max_investment.map(|v| format!("Rs. {}", format_grouped(v))))
    );
    println!(
        "  Carbon target:   {}",
        bound(c.carbon_floor().map(|v| format!("{} kg/yr", format_grouped(v))))
    );
    println!(
        "  Target date:     {}",
        bound(c.target_date.map(|d| match c.max_timeline_months {
            Some(m) => format!("{d} ({m} months left)"),
            None => d.to_string(),
        }))
    );
    println!();

    match s.status {
        SelectionStatus::Infeasible => {
            println!("  No combination of projects meets these constraints.\n");
        }
        SelectionStatus::Optimal if s.selected_projects.is_empty() => {
            println!("  No projects selected.\n");
        }
        SelectionStatus::Optimal => {
            print_projects(&s.selected_projects);
            println!(
                "  Total: Rs. {}, {} kg CO2/yr ({} t), longest {}",
                format_grouped(s.total_investment),
                format_grouped(s.total_carbon_reduction),
                format_tonnes(s.total_carbon_reduction),
                format_months(s.max_project_timeline)
            );
            println!();
        }
    }

    if !s.exclusions.is_empty() {
        println!("  Excluded before selection:");
        for e in &s.exclusions {
            println!("    {} -> {}", e.project, e.reason);
        }
        println!();
    }

    if !report.top_projects.is_empty() {
        println!("=== Top {} projects by impact ===\n", report.top_projects.len());
        for t in &report.top_projects {
            println!(
                "  {}. {:<30} {:>10} t/yr  Rs. {:>14}  {}",
                t.rank, t.name, t.reduction_tonnes, t.investment_display, t.timeline_display
            );
        }
        println!();
    }

    if let Some(ref line) = report.trajectory {
        println!("=== Reduction target ===\n");
        for p in line {
            match p.reduction {
                Some(r) => println!(
                    "  {}  {:>14}  (-{})",
                    p.year,
                    format_grouped(p.value),
                    format_grouped(r)
                ),
                None => println!("  {}  {:>14}", p.year, format_grouped(p.value)),
            }
        }
        println!();
    }

    print_warnings(&report.warnings, skipped_rows);
}

pub fn print_catalogue(catalogue: &NormalizedCatalogue, skipped_rows: &[SkippedRow]) {
    println!("=== Catalogue ({} projects) ===\n", catalogue.projects.len());
    print_projects(&catalogue.projects);
    print_warnings(&catalogue.warnings, skipped_rows);
}

fn print_projects(projects: &[Project]) {
    let max_name = projects
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(10)
        .max(7);

    println!(
        "  {:<width$}  {:>14}  {:>14}  {:>10}",
        "Project",
        "Investment",
        "kg CO2/yr",
        "Timeline",
        width = max_name
    );
    println!("  {}", "-".repeat(max_name + 44));
    for p in projects {
        println!(
            "  {:<width$}  {:>14}  {:>14}  {:>10}",
            p.name,
            format_grouped(p.investment_cost),
            format_grouped(p.carbon_reduction_per_year),
            format_months(p.timeline_months),
            width = max_name
        );
    }
    println!();
}

fn print_warnings(warnings: &[FieldWarning], skipped_rows: &[SkippedRow]) {
    if !warnings.is_empty() {
        println!("  Values treated as 0:");
        for w in warnings {
            let raw = w.raw.as_deref().unwrap_or("");
            println!("    {} / {}: '{}' ({})", w.project, w.field, raw, w.reason);
        }
        println!();
    }

    if !skipped_rows.is_empty() {
        println!("  {} row(s) skipped while reading:", skipped_rows.len());
        for r in skipped_rows {
            println!("    row {}: {}", r.row_number, r.reason);
        }
        println!();
    }
}
