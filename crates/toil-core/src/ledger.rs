//! Cumulative TOIL balance across every recorded month.
//!
//! The derived balance is always recomputed from day records. A manual
//! balance is kept as an adjustment on top of it: setting the balance to `v`
//! stores `v - derived`, and every later recompute reports
//! `derived + adjustment`. Day edits made after the manual correction keep
//! moving the balance instead of being masked by it.

use serde::{Deserialize, Serialize};

use crate::store::DayRecordStore;
use crate::summary::MonthSummary;

/// One month that contributed to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthEntry {
    pub year: i32,
    pub month: u32,
    pub summary: MonthSummary,
}

/// Result of a full recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerReport {
    /// Months with data, ascending.
    pub months: Vec<MonthEntry>,

    /// Sum of positive `new_toil` over all months.
    pub total_earned: i64,

    /// Sum of TOIL days taken over all months.
    pub total_used: i64,

    /// `total_earned - total_used`.
    pub balance: i64,

    /// Manual adjustment applied on top of `balance`.
    pub adjustment: i64,
}

impl LedgerReport {
    /// Balance including the manual adjustment.
    pub const fn effective_balance(&self) -> i64 {
        self.balance.saturating_add(self.adjustment)
    }
}

/// TOIL balance with an optional manual adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    adjustment: i64,
}

impl BalanceLedger {
    /// Creates a ledger without adjustment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger with a known adjustment.
    pub const fn with_adjustment(adjustment: i64) -> Self {
        Self { adjustment }
    }

    /// Folds every month that has data into earned, used and balance totals.
    ///
    /// Months without any flag set are skipped rather than counted as
    /// balanced. The fold only reads the store, so repeated calls on an
    /// unchanged store return equal reports.
    pub fn recompute_full(&self, store: &DayRecordStore) -> LedgerReport {
        let months: Vec<MonthEntry> = store
            .recorded_months()
            .into_iter()
            .map(|month| MonthEntry {
                year: month.year(),
                month: month.month(),
                summary: MonthSummary::for_month(month, store),
            })
            .collect();

        let total_earned: i64 = months.iter().map(|entry| entry.summary.earned()).sum();
        let total_used: i64 = months
            .iter()
            .map(|entry| i64::from(entry.summary.toil_used_count))
            .sum();

        let report = LedgerReport {
            months,
            total_earned,
            total_used,
            balance: total_earned - total_used,
            adjustment: self.adjustment,
        };

        tracing::debug!(
            month_count = report.months.len(),
            total_earned = report.total_earned,
            total_used = report.total_used,
            balance = report.balance,
            adjustment = report.adjustment,
            "recomputed TOIL ledger"
        );

        report
    }

    /// Balance including the manual adjustment.
    pub fn balance(&self, store: &DayRecordStore) -> i64 {
        self.recompute_full(store).effective_balance()
    }

    /// Sets the balance to `value` for the current store.
    ///
    /// Returns the stored adjustment.
    pub fn set_manual_balance(&mut self, store: &DayRecordStore, value: i64) -> i64 {
        let derived = self.recompute_full(store).balance;
        self.adjustment = value.saturating_sub(derived);
        tracing::debug!(value, derived, adjustment = self.adjustment, "set manual balance");
        self.adjustment
    }

    /// Drops the manual adjustment so the balance is purely derived again.
    pub const fn clear_manual_balance(&mut self) {
        self.adjustment = 0;
    }

    pub const fn adjustment(&self) -> i64 {
        self.adjustment
    }

    pub const fn has_manual_override(&self) -> bool {
        self.adjustment != 0
    }
}
