//! A user's whole ledger state: day records plus balance adjustment.

use serde_json::Value;

use crate::calendar::InvalidDate;
use crate::ledger::{BalanceLedger, LedgerReport};
use crate::record::DayRecord;
use crate::snapshot::{FormatError, Snapshot};
use crate::store::{DayRecordStore, StoreError};
use crate::summary::{MonthSummary, compute_summary};

/// Owns the day records and the ledger for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    store: DayRecordStore,
    ledger: BalanceLedger,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from a decoded snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let (store, ledger) = snapshot.into_parts();
        Self { store, ledger }
    }

    pub const fn store(&self) -> &DayRecordStore {
        &self.store
    }

    pub const fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    pub fn get(&self, year: i32, month: u32, day: u32) -> Result<DayRecord, InvalidDate> {
        self.store.get(year, month, day)
    }

    pub fn set(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        record: DayRecord,
    ) -> Result<(), StoreError> {
        self.store.set(year, month, day, record)
    }

    pub fn summary(&self, year: i32, month: u32) -> Result<MonthSummary, InvalidDate> {
        compute_summary(year, month, &self.store)
    }

    pub fn report(&self) -> LedgerReport {
        self.ledger.recompute_full(&self.store)
    }

    /// Sets the effective balance; returns the stored adjustment.
    pub fn set_manual_balance(&mut self, value: i64) -> i64 {
        self.ledger.set_manual_balance(&self.store, value)
    }

    pub const fn clear_manual_balance(&mut self) {
        self.ledger.clear_manual_balance();
    }

    /// Drops every record and the manual adjustment.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.ledger.clear_manual_balance();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store, &self.ledger)
    }

    /// Replaces the whole session from a document.
    ///
    /// On error the session is left exactly as it was.
    pub fn import(&mut self, document: &Value) -> Result<(), FormatError> {
        let snapshot = Snapshot::from_document(document)?;
        *self = Self::from_snapshot(snapshot);
        tracing::debug!(records = self.store.len(), "imported snapshot");
        Ok(())
    }
}
