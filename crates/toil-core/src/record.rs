//! Per-day status flags.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most flags a single day may carry at once.
pub const MAX_FLAGS: usize = 2;

/// A day record that breaks one of the [`DayRecord`] invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// More than [`MAX_FLAGS`] flags are set.
    #[error("at most {max} flags may be set on one day, got {count}", max = MAX_FLAGS)]
    TooManyFlags { count: usize },

    /// `toil_day` is set without `day_off`.
    #[error("a TOIL day must also be marked as a day off")]
    ToilDayWithoutDayOff,
}

/// Status flags for a single calendar day.
///
/// The all-false record is the implicit state of every day that was never
/// written. A TOIL day is always a day off as well, and no day carries more
/// than two flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayRecord {
    pub worked: bool,
    pub national: bool,
    pub day_off: bool,
    pub toil_day: bool,
}

impl DayRecord {
    /// A worked day.
    pub const WORKED: Self = Self {
        worked: true,
        national: false,
        day_off: false,
        toil_day: false,
    };

    /// A national holiday.
    pub const NATIONAL: Self = Self {
        worked: false,
        national: true,
        day_off: false,
        toil_day: false,
    };

    /// A plain day off.
    pub const DAY_OFF: Self = Self {
        worked: false,
        national: false,
        day_off: true,
        toil_day: false,
    };

    /// A day off paid for with TOIL.
    pub const TOIL_DAY: Self = Self {
        worked: false,
        national: false,
        day_off: true,
        toil_day: true,
    };

    /// Number of flags set.
    pub fn flag_count(&self) -> usize {
        [self.worked, self.national, self.day_off, self.toil_day]
            .into_iter()
            .filter(|flag| *flag)
            .count()
    }

    /// True when no flag is set.
    pub fn is_default(&self) -> bool {
        self.flag_count() == 0
    }

    /// Counts towards the month's days off (either flag, counted once).
    pub const fn is_off(&self) -> bool {
        self.day_off || self.toil_day
    }

    /// Checks the flag-count limit and the TOIL-implies-day-off rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.flag_count();
        if count > MAX_FLAGS {
            return Err(ValidationError::TooManyFlags { count });
        }
        if self.toil_day && !self.day_off {
            return Err(ValidationError::ToilDayWithoutDayOff);
        }
        Ok(())
    }
}

impl fmt::Display for DayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = [
            (self.worked, "worked"),
            (self.national, "national"),
            (self.day_off, "day off"),
            (self.toil_day, "TOIL day"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();

        if labels.is_empty() {
            write!(f, "not marked")
        } else {
            write!(f, "{}", labels.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_false() {
        let record = DayRecord::default();
        assert!(record.is_default());
        assert!(record.validate().is_ok());
        assert_eq!(record.to_string(), "not marked");
    }

    #[test]
    fn test_two_flags_are_allowed() {
        let record = DayRecord {
            worked: true,
            national: true,
            ..DayRecord::default()
        };
        assert!(record.validate().is_ok());
        assert_eq!(record.to_string(), "worked, national");
        assert!(DayRecord::TOIL_DAY.validate().is_ok());
    }

    #[test]
    fn test_three_flags_are_rejected() {
        let record = DayRecord {
            worked: true,
            national: true,
            day_off: true,
            toil_day: false,
        };
        assert_eq!(
            record.validate(),
            Err(ValidationError::TooManyFlags { count: 3 })
        );
    }

    #[test]
    fn test_toil_day_requires_day_off() {
        let record = DayRecord {
            toil_day: true,
            ..DayRecord::default()
        };
        assert_eq!(record.validate(), Err(ValidationError::ToilDayWithoutDayOff));
    }

    #[test]
    fn test_is_off_counts_either_flag() {
        assert!(DayRecord::DAY_OFF.is_off());
        assert!(DayRecord::TOIL_DAY.is_off());
        assert!(!DayRecord::NATIONAL.is_off());
        assert!(!DayRecord::WORKED.is_off());
    }

    #[test]
    fn test_deserialize_requires_every_flag() {
        let err = serde_json::from_str::<DayRecord>(r#"{"worked":true,"national":false}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field"));

        let err = serde_json::from_str::<DayRecord>(
            r#"{"worked":"yes","national":false,"day_off":false,"toil_day":false}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }
}
