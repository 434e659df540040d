//! The `warikan split` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use warikan_core::engine::allocate;
use warikan_core::model::{AllocationRequest, Role};
use warikan_core::parser;
use warikan_core::report::AllocationReport;

use crate::config::{load_config_from, WarikanConfig};

/// Exit status for a well-formed request with no feasible allocation.
pub const EXIT_INFEASIBLE: i32 = 3;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    request_path: Option<PathBuf>,
    role_specs: Vec<String>,
    total: Option<i64>,
    tilt: Option<u8>,
    payer: Option<String>,
    shortfall_skip: bool,
    format: String,
    output: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let (name, mut request) = match request_path {
        Some(path) => {
            let file = parser::parse_request(&path)?;
            let mut request = file.request;
            if let Some(total) = total {
                request.total_amount = total;
            }
            (file.name, request)
        }
        None => {
            anyhow::ensure!(
                !role_specs.is_empty(),
                "either --request or at least one --role is required"
            );
            let total = total.context("--total is required when roles are given as flags")?;
            let roles = role_specs
                .iter()
                .map(|s| parse_role_spec(s))
                .collect::<Result<Vec<_>>>()?;
            let request = AllocationRequest::new(roles, total)
                .with_default_tilt(config.default_tilt)
                .with_shortfall_skip(config.shortfall_skip);
            (None, request)
        }
    };

    if let Some(tilt) = tilt {
        request.default_tilt = tilt;
    }
    if payer.is_some() {
        request.payer = payer;
    }
    if shortfall_skip {
        request.shortfall_skip = true;
    }

    tracing::info!(
        roles = request.roles.len(),
        total_amount = request.total_amount,
        default_tilt = request.default_tilt,
        "allocating"
    );

    let result = match allocate(&request) {
        Ok(result) => result,
        Err(e) if e.is_role_error() => {
            let roles = request
                .roles
                .iter()
                .map(|r| format!("{}:{}", r.name, r.headcount))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(e).with_context(|| format!("invalid roles [{roles}]"));
        }
        Err(e) => return Err(e.into()),
    };
    let report = AllocationReport::new(name, request, result);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_schedule(&report, &config),
    }

    let mut targets: Vec<PathBuf> = output.into_iter().collect();
    if save {
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
        targets.push(config.output_dir.join(format!("report-{timestamp}.json")));
    }
    for path in &targets {
        report.save_json(path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    if !report.result.is_feasible() {
        eprintln!("No feasible allocation.");
        std::process::exit(EXIT_INFEASIBLE);
    }

    Ok(())
}

/// Parse `NAME:COUNT`. The name may itself contain colons.
fn parse_role_spec(spec: &str) -> Result<Role> {
    let (name, count) = spec
        .rsplit_once(':')
        .with_context(|| format!("invalid role '{spec}', expected NAME:COUNT"))?;
    let headcount = count
        .trim()
        .parse::<u32>()
        .map_err(|_| anyhow::anyhow!("invalid headcount in role '{spec}'"))?;
    Ok(Role::new(name.trim(), headcount))
}

fn print_schedule(report: &AllocationReport, config: &WarikanConfig) {
    use comfy_table::{Cell, CellAlignment, Table};

    if let Some(name) = &report.name {
        println!("Allocation: {name}");
    }

    let result = &report.result;
    let Some(tilt) = result.best_tilt else {
        println!(
            "No feasible allocation for {} {} across {} people.",
            report.request.total_amount,
            config.currency,
            report.request.total_headcount()
        );
        return;
    };

    let currency = &config.currency;
    let mut table = Table::new();
    table.set_header(vec!["Role", "People", "Weight", "Per person", "Subtotal"]);

    for line in report.role_lines() {
        let per_person = match line.payer_payment {
            Some(adjusted) => format!("{} (payer {adjusted})", line.per_person),
            None => line.per_person.to_string(),
        };
        table.add_row(vec![
            Cell::new(&line.name),
            Cell::new(line.headcount).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", line.weight)).set_alignment(CellAlignment::Right),
            Cell::new(per_person).set_alignment(CellAlignment::Right),
            Cell::new(line.line_total).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
    println!("Best tilt:      {tilt}%");
    if let Some(raw) = result.raw_deviation {
        println!("Deviation:      {raw:+} {currency}");
    }
    if let Some(total) = result.final_settled_total {
        println!("Settled total:  {total} {currency}");
    }
    if let (Some(payer), Some(payment)) = (&result.payer, result.payer_payment) {
        println!("Payer ({payer}) pays {payment} {currency}");
    }
}
