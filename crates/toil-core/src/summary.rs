//! Month aggregation: expected versus actual work days.
//!
//! # Algorithm Summary
//!
//! 1. Enumerate every day of the month, reading unset days as default
//! 2. Tally worked, national, off (`day_off` OR `toil_day`, counted once) and TOIL days
//! 3. `expected = total - national - off`
//! 4. `new_toil = worked - expected`, negative for a shortfall

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::{InvalidDate, YearMonth};
use crate::store::DayRecordStore;

/// Figures derived from one month of day records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Days in the month.
    pub total_days: u32,

    /// Days marked as worked.
    pub worked_count: u32,

    /// Days marked as national holidays.
    pub national_count: u32,

    /// Days marked as day off or TOIL day (union).
    pub off_count: u32,

    /// Days marked as TOIL day.
    pub toil_used_count: u32,

    /// Days on which work was expected.
    pub expected_work_days: i64,

    /// Worked days minus expected days.
    pub new_toil: i64,
}

/// How a month compares against expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthOutcome {
    /// Worked more days than expected.
    Earned(u64),
    /// Worked fewer days than expected.
    Shortfall(u64),
    /// Worked exactly the expected days.
    Balanced,
}

impl MonthSummary {
    /// Summarizes a validated month.
    pub fn for_month(month: YearMonth, store: &DayRecordStore) -> Self {
        let mut summary = Self {
            total_days: 0,
            worked_count: 0,
            national_count: 0,
            off_count: 0,
            toil_used_count: 0,
            expected_work_days: 0,
            new_toil: 0,
        };

        for day in month.calendar_days() {
            let record = store.record(day);
            summary.total_days += 1;
            summary.worked_count += u32::from(record.worked);
            summary.national_count += u32::from(record.national);
            summary.off_count += u32::from(record.is_off());
            summary.toil_used_count += u32::from(record.toil_day);
        }

        summary.expected_work_days = i64::from(summary.total_days)
            - i64::from(summary.national_count)
            - i64::from(summary.off_count);
        summary.new_toil = i64::from(summary.worked_count) - summary.expected_work_days;
        summary
    }

    /// TOIL earned this month; shortfalls earn nothing.
    pub fn earned(&self) -> i64 {
        self.new_toil.max(0)
    }

    pub const fn outcome(&self) -> MonthOutcome {
        match self.new_toil {
            n if n > 0 => MonthOutcome::Earned(n.unsigned_abs()),
            n if n < 0 => MonthOutcome::Shortfall(n.unsigned_abs()),
            _ => MonthOutcome::Balanced,
        }
    }
}

impl fmt::Display for MonthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earned(days) => write!(f, "You earned {days} TOIL day(s) this month"),
            Self::Shortfall(days) => {
                write!(f, "You worked {days} day(s) less than expected")
            }
            Self::Balanced => write!(f, "Perfect balance this month"),
        }
    }
}

/// Summarizes a month of the store.
pub fn compute_summary(
    year: i32,
    month: u32,
    store: &DayRecordStore,
) -> Result<MonthSummary, InvalidDate> {
    let month = YearMonth::new(year, month)?;
    Ok(MonthSummary::for_month(month, store))
}
