use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use kcol_exp::{load_plan, run_sweep, write_report, ReportRow};
use log::info;
use serde_json::json;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// CSV report destination; truncated if present.
    #[arg(long)]
    pub out: PathBuf,
    /// Overrides the plan's worker thread count.
    #[arg(long)]
    pub parallelism: Option<usize>,
}

pub fn execute(args: &SweepArgs) -> Result<Vec<ReportRow>, Box<dyn Error>> {
    let mut plan = load_plan(&args.plan)?;
    if let Some(parallelism) = args.parallelism {
        plan.scheduler.parallelism = parallelism;
    }
    let rows = run_sweep(&plan)?;
    write_report(&args.out, &rows)?;
    info!("report written to {}", args.out.display());
    Ok(rows)
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let rows = execute(args)?;
    let failures = rows.iter().filter(|row| !row.correct).count();
    let summary = json!({
        "rows": rows.len(),
        "failures": failures,
        "out": args.out.display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
