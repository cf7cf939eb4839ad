//! Core domain logic for the TOIL ledger.
//!
//! This crate contains the fundamental types and logic for:
//! - Calendar: validated days and months in the supported range
//! - Day records: per-day flags and the store that holds them
//! - Month summaries: expected versus worked days and new TOIL
//! - Ledger: the cumulative balance across every recorded month
//! - Snapshots: import and export of the whole state as JSON

pub mod calendar;
mod ledger;
mod record;
mod session;
pub mod snapshot;
mod store;
mod summary;

pub use calendar::{CalendarDay, InvalidDate, YearMonth, days, days_in_month};
pub use ledger::{BalanceLedger, LedgerReport, MonthEntry};
pub use record::{DayRecord, MAX_FLAGS, ValidationError};
pub use session::Session;
pub use snapshot::{FormatError, Snapshot, export_snapshot, import_snapshot};
pub use store::{DayRecordStore, StoreError};
pub use summary::{MonthOutcome, MonthSummary, compute_summary};
