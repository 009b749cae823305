//! # Scenario suite run
//!
//! `hero suite` runs the full contract matrix, prints one line per
//! scenario plus totals, and optionally writes a timestamped JSON report.
//! Exit code `1` when any scenario fails.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use hero_client::{run_scenarios, select, SuiteReport, SuperheroClient, SCENARIOS};

/// Arguments for `hero suite`.
#[derive(Args, Debug)]
pub struct SuiteArgs {
    /// Directory for `report_<timestamp>.json`. Created if missing.
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Run only one group (`not_found`) or the scenarios whose id starts
    /// with the given prefix (`valid_name/iron`).
    #[arg(long, value_name = "GROUP")]
    pub only: Option<String>,
}

/// Execute `hero suite`.
pub async fn run_suite_command(
    args: &SuiteArgs,
    client: &SuperheroClient,
    out: &mut impl Write,
) -> Result<u8> {
    let report = match &args.only {
        Some(filter) => {
            let chosen = select(filter);
            if chosen.is_empty() {
                bail!("no scenario matches {filter:?}");
            }
            run_scenarios(client, chosen).await
        }
        None => run_scenarios(client, SCENARIOS).await,
    };
    render(&report, out)?;

    if let Some(dir) = &args.report_dir {
        let path = write_report(&report, dir)?;
        writeln!(out, "report: {}", path.display())?;
    }

    Ok(if report.all_passed() { 0 } else { 1 })
}

fn render(report: &SuiteReport, out: &mut impl Write) -> Result<()> {
    for outcome in &report.outcomes {
        if outcome.passed {
            writeln!(out, "PASS  {}", outcome.id)?;
        } else {
            writeln!(out, "FAIL  {}: {}", outcome.id, outcome.detail)?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} passed, {} failed, {} total",
        report.passed(),
        report.failed(),
        report.outcomes.len()
    )?;
    Ok(())
}

/// Write the report as pretty JSON into `dir` and return the file path.
pub fn write_report(report: &SuiteReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory: {}", dir.display()))?;
    let path = dir.join(report.file_name());
    let json = serde_json::to_vec_pretty(report)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), "suite report written");
    Ok(path)
}
