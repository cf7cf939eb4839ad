//! Get and set commands for single days.

use std::io::Write;

use anyhow::{Context, Result};
use toil_core::{DayRecord, Session};

use super::util::parse_date;

/// Prints one day's flags.
pub fn get<W: Write>(writer: &mut W, session: &Session, date: &str) -> Result<()> {
    let day = parse_date(date)?;
    let record = session.get(day.year(), day.month(), day.day())?;
    writeln!(writer, "{day} ({}): {record}", day.weekday())?;
    Ok(())
}

/// Replaces one day's flags.
pub fn set<W: Write>(
    writer: &mut W,
    session: &mut Session,
    date: &str,
    record: DayRecord,
) -> Result<()> {
    let day = parse_date(date)?;
    session
        .set(day.year(), day.month(), day.day(), record)
        .with_context(|| format!("failed to update {day}"))?;
    writeln!(writer, "Saved {day}: {record}")?;
    Ok(())
}
