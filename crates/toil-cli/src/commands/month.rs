//! Month command: day listing and TOIL calculation for one month.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use toil_core::{DayRecord, MonthSummary, Session};

use super::util::parse_month;

#[derive(Debug, Serialize)]
struct MonthView {
    month: String,
    days: Vec<DayView>,
    summary: MonthSummary,
    outcome: String,
}

#[derive(Debug, Serialize)]
struct DayView {
    date: String,
    weekday: String,
    #[serde(flatten)]
    record: DayRecord,
}

pub fn run<W: Write>(writer: &mut W, session: &Session, month: &str, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let summary = session.summary(month.year(), month.month())?;

    tracing::debug!(%month, new_toil = summary.new_toil, "computed month summary");

    if json {
        let view = MonthView {
            month: month.to_string(),
            days: month
                .calendar_days()
                .map(|day| DayView {
                    date: day.to_string(),
                    weekday: day.weekday().to_string(),
                    record: session.store().record(day),
                })
                .collect(),
            summary,
            outcome: summary.outcome().to_string(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    writeln!(writer, "{}", month.first_day().format("%B %Y"))?;
    for day in month.calendar_days() {
        let record = session.store().record(day);
        writeln!(writer, "{:>2} {}  {record}", day.day(), day.weekday())?;
    }

    writeln!(writer)?;
    writeln!(writer, "Worked:    {} days", summary.worked_count)?;
    writeln!(writer, "Expected:  {} days", summary.expected_work_days)?;
    writeln!(writer, "New TOIL:  {:+} days", summary.new_toil)?;
    writeln!(writer, "TOIL used: {} days", summary.toil_used_count)?;
    writeln!(writer, "{}", summary.outcome())?;

    Ok(())
}
