//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::NaiveDate;
use toil_core::{CalendarDay, YearMonth};

/// Parse a day as ISO 8601 (`YYYY-MM-DD`) or the keyword `today`.
pub fn parse_date(s: &str) -> anyhow::Result<CalendarDay> {
    let date = if s == "today" {
        chrono::Local::now().date_naive()
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-01-15)"))?
    };
    Ok(CalendarDay::from_date(date)?)
}

/// Parse a month as `YYYY-MM`.
pub fn parse_month(s: &str) -> anyhow::Result<YearMonth> {
    let Some((year, month)) = s.split_once('-') else {
        anyhow::bail!("Invalid month: {s}. Use YYYY-MM (e.g., 2024-01)");
    };
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in month: {s}"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month number in month: {s}"))?;
    Ok(YearMonth::new(year, month)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_iso() {
        let day = parse_date("2024-02-29").unwrap();
        assert_eq!(day, CalendarDay::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_impossible_and_unsupported_days() {
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2031-01-01").is_err());
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_parse_month() {
        let month = parse_month("2024-04").unwrap();
        assert_eq!(month, YearMonth::new(2024, 4).unwrap());
        assert_eq!(parse_month("2024-4").unwrap(), month);
    }

    #[test]
    fn test_parse_month_rejects_bad_input() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("abcd-01").is_err());
        assert!(parse_month("2019-01").is_err());
    }
}
