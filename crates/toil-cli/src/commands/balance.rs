//! Balance command: cumulative TOIL across all recorded months.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use toil_core::{LedgerReport, Session};

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Set the current balance to this many days.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "reset")]
    pub set: Option<i64>,

    /// Drop the manual adjustment and use the derived balance.
    #[arg(long)]
    pub reset: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BalanceView<'a> {
    #[serde(flatten)]
    report: &'a LedgerReport,
    effective_balance: i64,
}

/// Runs the balance command. Returns true if the session changed.
pub fn run<W: Write>(writer: &mut W, session: &mut Session, args: &BalanceArgs) -> Result<bool> {
    let mut changed = false;

    if let Some(value) = args.set {
        let adjustment = session.set_manual_balance(value);
        writeln!(writer, "Balance set to {value} days (adjustment {adjustment:+}).")?;
        changed = true;
    } else if args.reset {
        session.clear_manual_balance();
        writeln!(writer, "Manual adjustment cleared.")?;
        changed = true;
    }

    let report = session.report();

    if args.json {
        let view = BalanceView {
            report: &report,
            effective_balance: report.effective_balance(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(changed);
    }

    write_report(writer, &report)?;
    Ok(changed)
}

fn write_report<W: Write>(writer: &mut W, report: &LedgerReport) -> Result<()> {
    if report.months.is_empty() {
        writeln!(writer, "No days recorded.")?;
    } else {
        writeln!(
            writer,
            "{:<8} {:>6} {:>8} {:>8} {:>4}",
            "Month", "Worked", "Expected", "New TOIL", "Used"
        )?;
        for entry in &report.months {
            let summary = &entry.summary;
            let label = format!("{:04}-{:02}", entry.year, entry.month);
            writeln!(
                writer,
                "{label:<8} {:>6} {:>8} {:>+8} {:>4}",
                summary.worked_count,
                summary.expected_work_days,
                summary.new_toil,
                summary.toil_used_count
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Total earned:      {}", report.total_earned)?;
    writeln!(writer, "Total used:        {}", report.total_used)?;
    writeln!(writer, "Derived balance:   {}", report.balance)?;
    if report.adjustment != 0 {
        writeln!(writer, "Manual adjustment: {:+}", report.adjustment)?;
    }
    writeln!(
        writer,
        "Current TOIL balance: {} days",
        report.effective_balance()
    )?;
    Ok(())
}
