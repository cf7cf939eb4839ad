//! In-memory day record storage.
//!
//! Reads never create entries: an unset day reads as [`DayRecord::default`]
//! and the store only ever holds records with at least one flag set.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::calendar::{CalendarDay, InvalidDate, YearMonth};
use crate::record::{DayRecord, ValidationError};

/// Errors from writing to the store by raw (year, month, day).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error("invalid day record: {0}")]
    Validation(#[from] ValidationError),
}

/// One status record per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRecordStore {
    records: BTreeMap<CalendarDay, DayRecord>,
}

impl DayRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a day, or the all-false default.
    pub fn get(&self, year: i32, month: u32, day: u32) -> Result<DayRecord, InvalidDate> {
        Ok(self.record(CalendarDay::new(year, month, day)?))
    }

    /// Returns the record for an already validated day.
    pub fn record(&self, day: CalendarDay) -> DayRecord {
        self.records.get(&day).copied().unwrap_or_default()
    }

    /// Replaces the record for a day.
    ///
    /// Nothing changes if the date or the record is invalid.
    pub fn set(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        record: DayRecord,
    ) -> Result<(), StoreError> {
        let key = CalendarDay::new(year, month, day)?;
        self.insert(key, record)?;
        Ok(())
    }

    /// Replaces the record for an already validated day.
    ///
    /// Writing the default record removes the entry.
    pub fn insert(&mut self, day: CalendarDay, record: DayRecord) -> Result<(), ValidationError> {
        if let Err(err) = record.validate() {
            tracing::warn!(%day, %record, error = %err, "rejected day record");
            return Err(err);
        }

        if record.is_default() {
            self.records.remove(&day);
        } else {
            self.records.insert(day, record);
        }
        tracing::debug!(%day, %record, "stored day record");
        Ok(())
    }

    /// Removes every record.
    pub fn clear_all(&mut self) {
        tracing::debug!(entries = self.records.len(), "clearing day records");
        self.records.clear();
    }

    /// Number of days with at least one flag set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored records in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarDay, DayRecord)> + '_ {
        self.records.iter().map(|(day, record)| (*day, *record))
    }

    /// Months holding at least one non-default record, ascending.
    pub fn recorded_months(&self) -> BTreeSet<YearMonth> {
        self.records.keys().map(|day| day.year_month()).collect()
    }
}
