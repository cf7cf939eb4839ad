//! Calendar keys and month enumeration.
//!
//! Every date the ledger touches goes through [`YearMonth`] or [`CalendarDay`],
//! so an out-of-range year or a day such as February 30th cannot reach the
//! store.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use thiserror::Error;

/// First year accepted by the ledger.
pub const MIN_YEAR: i32 = 2020;

/// Last year accepted by the ledger.
pub const MAX_YEAR: i32 = 2030;

/// Years the ledger accepts.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = MIN_YEAR..=MAX_YEAR;

/// A (year, month) or (year, month, day) outside the supported calendar.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDate {
    /// The year lies outside [`SUPPORTED_YEARS`].
    #[error("year {year} is outside the supported range {min}-{max}", min = MIN_YEAR, max = MAX_YEAR)]
    YearOutOfRange { year: i32 },

    /// The month is not in 1..=12.
    #[error("month {month} is not between 1 and 12")]
    MonthOutOfRange { month: u32 },

    /// The day does not exist in that month.
    #[error("{year}-{month:02} has no day {day}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a month after checking the year range and month number.
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidDate> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(InvalidDate::YearOutOfRange { year });
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(InvalidDate::MonthOutOfRange { month })?;
        Ok(Self { first })
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Number of days in this month (28 to 31).
    pub fn days_in_month(self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Day numbers of this month, ascending from 1.
    pub fn days(self) -> RangeInclusive<u32> {
        1..=self.days_in_month()
    }

    /// Returns the given day of this month.
    pub fn day(self, day: u32) -> Result<CalendarDay, InvalidDate> {
        CalendarDay::new(self.year(), self.month(), day)
    }

    /// Iterates over every day of this month as a [`CalendarDay`].
    pub fn calendar_days(self) -> impl Iterator<Item = CalendarDay> {
        self.first
            .iter_days()
            .take_while(move |date| date.month() == self.first.month())
            .map(|date| CalendarDay { date })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

/// A validated calendar day, the key of every day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay {
    date: NaiveDate,
}

impl CalendarDay {
    /// Creates a day after checking year, month and day against the calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        let year_month = YearMonth::new(year, month)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(InvalidDate::DayOutOfRange {
            year: year_month.year(),
            month: year_month.month(),
            day,
        })?;
        Ok(Self { date })
    }

    /// Wraps a date, rejecting years outside the supported range.
    pub fn from_date(date: NaiveDate) -> Result<Self, InvalidDate> {
        if !SUPPORTED_YEARS.contains(&date.year()) {
            return Err(InvalidDate::YearOutOfRange { year: date.year() });
        }
        Ok(Self { date })
    }

    pub fn year(self) -> i32 {
        self.date.year()
    }

    pub fn month(self) -> u32 {
        self.date.month()
    }

    pub fn day(self) -> u32 {
        self.date.day()
    }

    pub const fn date(self) -> NaiveDate {
        self.date
    }

    pub fn weekday(self) -> Weekday {
        self.date.weekday()
    }

    /// The month containing this day.
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            first: self.date.with_day(1).unwrap_or(self.date),
        }
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// Returns the day numbers of a month, ascending from 1.
///
/// The range is cloneable, so callers can walk it more than once.
pub fn days(year: i32, month: u32) -> Result<RangeInclusive<u32>, InvalidDate> {
    Ok(YearMonth::new(year, month)?.days())
}

/// Returns how many days a month has.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, InvalidDate> {
    Ok(YearMonth::new(year, month)?.days_in_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_february_leap_and_common_years() {
        assert_eq!(days(2024, 2).unwrap().count(), 29);
        assert_eq!(days(2023, 2).unwrap().count(), 28);
        assert_eq!(days_in_month(2020, 2).unwrap(), 29);
        assert_eq!(days_in_month(2021, 2).unwrap(), 28);
    }

    #[test]
    fn test_thirty_and_thirty_one_day_months() {
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert_eq!(days_in_month(2024, 1).unwrap(), 31);
        assert_eq!(days_in_month(2030, 12).unwrap(), 31);
    }

    #[test]
    fn test_every_supported_month_matches_gregorian_length() {
        for year in SUPPORTED_YEARS {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            for month in 1..=12 {
                let expected = match month {
                    2 if leap => 29,
                    2 => 28,
                    4 | 6 | 9 | 11 => 30,
                    _ => 31,
                };
                let sequence: Vec<u32> = days(year, month).unwrap().collect();
                assert_eq!(sequence.len(), expected, "{year}-{month}");
                assert_eq!(sequence.first(), Some(&1));
                assert!(sequence.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn test_days_is_restartable() {
        let sequence = days(2024, 2).unwrap();
        let first: u32 = sequence.clone().sum();
        let second: u32 = sequence.sum();
        assert_eq!(first, second);
    }

    #[test]
    fn test_year_outside_range_is_rejected() {
        assert_eq!(
            days(2019, 5).unwrap_err(),
            InvalidDate::YearOutOfRange { year: 2019 }
        );
        assert_eq!(
            days(2031, 1).unwrap_err(),
            InvalidDate::YearOutOfRange { year: 2031 }
        );
    }

    #[test]
    fn test_month_outside_range_is_rejected() {
        assert_eq!(
            days(2024, 0).unwrap_err(),
            InvalidDate::MonthOutOfRange { month: 0 }
        );
        assert_eq!(
            days(2024, 13).unwrap_err(),
            InvalidDate::MonthOutOfRange { month: 13 }
        );
    }

    #[test]
    fn test_calendar_day_validates_day_of_month() {
        assert!(CalendarDay::new(2024, 2, 29).is_ok());
        assert_eq!(
            CalendarDay::new(2023, 2, 29).unwrap_err(),
            InvalidDate::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29
            }
        );
        assert!(CalendarDay::new(2024, 4, 31).is_err());
        assert!(CalendarDay::new(2024, 1, 0).is_err());
    }

    #[test]
    fn test_calendar_days_cover_the_month() {
        let month = YearMonth::new(2024, 2).unwrap();
        let all: Vec<CalendarDay> = month.calendar_days().collect();
        assert_eq!(all.len(), 29);
        assert_eq!(all[0].to_string(), "2024-02-01");
        assert_eq!(all[28].to_string(), "2024-02-29");
        assert_eq!(all[0].weekday(), Weekday::Thu);
    }

    #[test]
    fn test_keys_order_by_date() {
        let a = CalendarDay::new(2023, 12, 31).unwrap();
        let b = CalendarDay::new(2024, 1, 1).unwrap();
        assert!(a < b);
        assert_eq!(b.year_month(), YearMonth::new(2024, 1).unwrap());
        assert_eq!(b.year_month().to_string(), "2024-01");
    }
}
