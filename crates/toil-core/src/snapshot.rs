//! Portable snapshot of the day records and balance.
//!
//! # Document Shape
//!
//! ```json
//! {
//!   "2024": {
//!     "1": {
//!       "15": { "worked": true, "national": false, "day_off": false, "toil_day": false }
//!     }
//!   },
//!   "_toil_balance": 3
//! }
//! ```
//!
//! Year, month and day keys are canonical decimal integers. `_toil_balance`
//! is the effective balance at export time. On import the manual adjustment
//! is rebuilt as `_toil_balance` minus the balance derived from the imported
//! records, so exporting and importing reproduces the same effective balance.
//!
//! A document is parsed into a fresh store and validated completely before
//! anything is returned, so a rejected import never touches existing state.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::calendar::{InvalidDate, SUPPORTED_YEARS, YearMonth};
use crate::ledger::BalanceLedger;
use crate::record::{DayRecord, ValidationError};
use crate::store::DayRecordStore;

/// Reserved key holding the balance.
pub const BALANCE_KEY: &str = "_toil_balance";

/// Malformed snapshot documents.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The text is not valid JSON.
    #[error("snapshot is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// A container that must be an object is something else.
    #[error("expected an object at {path}")]
    NotAnObject { path: String },

    /// A year, month or day key is not a canonical integer.
    #[error("invalid {kind} key {key:?} at {path}")]
    InvalidKey {
        kind: &'static str,
        key: String,
        path: String,
    },

    /// A key is numeric but outside the calendar.
    #[error("invalid date at {path}")]
    InvalidDate {
        path: String,
        #[source]
        source: InvalidDate,
    },

    /// A record has missing, unknown or non-boolean fields.
    #[error("invalid day record at {path}")]
    InvalidRecord {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record breaks a day record invariant.
    #[error("day record at {path} is not allowed")]
    InvalidFlags {
        path: String,
        #[source]
        source: ValidationError,
    },

    /// The balance is not an integer.
    #[error("_toil_balance must be an integer, got {value}")]
    InvalidBalance { value: Value },

    /// A reserved key other than the balance.
    #[error("unknown reserved key {key:?}")]
    UnknownKey { key: String },
}

/// Decoded snapshot: every non-default record plus the exported balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub store: DayRecordStore,

    /// Effective balance; `None` when the document carries no balance.
    pub balance: Option<i64>,
}

impl Snapshot {
    /// Copies the store and the ledger's effective balance.
    pub fn capture(store: &DayRecordStore, ledger: &BalanceLedger) -> Self {
        Self {
            store: store.clone(),
            balance: Some(ledger.balance(store)),
        }
    }

    /// Splits the snapshot into a store and a ledger whose effective balance
    /// equals the exported one.
    pub fn into_parts(self) -> (DayRecordStore, BalanceLedger) {
        let ledger = self.balance.map_or_else(BalanceLedger::new, |balance| {
            let derived = BalanceLedger::new().recompute_full(&self.store).balance;
            BalanceLedger::with_adjustment(balance.saturating_sub(derived))
        });
        (self.store, ledger)
    }

    /// Encodes the snapshot as a JSON document.
    pub fn to_document(&self) -> Value {
        let mut years: BTreeMap<i32, BTreeMap<u32, Map<String, Value>>> = BTreeMap::new();
        for (day, record) in self.store.iter() {
            years
                .entry(day.year())
                .or_default()
                .entry(day.month())
                .or_default()
                .insert(day.day().to_string(), record_value(record));
        }

        let mut root: Map<String, Value> = years
            .into_iter()
            .map(|(year, months)| {
                let months: Map<String, Value> = months
                    .into_iter()
                    .map(|(month, days)| (month.to_string(), Value::Object(days)))
                    .collect();
                (year.to_string(), Value::Object(months))
            })
            .collect();

        if let Some(balance) = self.balance {
            root.insert(BALANCE_KEY.to_string(), Value::from(balance));
        }
        Value::Object(root)
    }

    /// Decodes and validates a whole document.
    pub fn from_document(document: &Value) -> Result<Self, FormatError> {
        let root = as_object(document, "/")?;
        let mut store = DayRecordStore::new();
        let mut balance = None;

        for (year_key, months) in root {
            if year_key.starts_with('_') {
                if year_key != BALANCE_KEY {
                    return Err(FormatError::UnknownKey {
                        key: year_key.clone(),
                    });
                }
                let value = months.as_i64().ok_or_else(|| FormatError::InvalidBalance {
                    value: months.clone(),
                })?;
                balance = Some(value);
                continue;
            }

            let year: i32 = parse_key(year_key, "year", "/")?;
            if !SUPPORTED_YEARS.contains(&year) {
                return Err(FormatError::InvalidDate {
                    path: year_key.clone(),
                    source: InvalidDate::YearOutOfRange { year },
                });
            }
            for (month_key, days) in as_object(months, year_key)? {
                let path = format!("{year_key}/{month_key}");
                let month: u32 = parse_key(month_key, "month", year_key)?;
                let year_month = YearMonth::new(year, month).map_err(|source| {
                    FormatError::InvalidDate {
                        path: path.clone(),
                        source,
                    }
                })?;

                for (day_key, value) in as_object(days, &path)? {
                    let day_path = format!("{path}/{day_key}");
                    let day: u32 = parse_key(day_key, "day", &path)?;
                    let key = year_month
                        .day(day)
                        .map_err(|source| FormatError::InvalidDate {
                            path: day_path.clone(),
                            source,
                        })?;
                    let record =
                        DayRecord::deserialize(value).map_err(|source| FormatError::InvalidRecord {
                            path: day_path.clone(),
                            source,
                        })?;
                    store
                        .insert(key, record)
                        .map_err(|source| FormatError::InvalidFlags {
                            path: day_path,
                            source,
                        })?;
                }
            }
        }

        tracing::debug!(records = store.len(), ?balance, "decoded snapshot");
        Ok(Self { store, balance })
    }

    /// Pretty-printed JSON text.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }

    /// Parses and validates JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, FormatError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(&document)
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let document = Value::deserialize(deserializer)?;
        Self::from_document(&document).map_err(serde::de::Error::custom)
    }
}

/// Produces the snapshot document for a store and ledger.
pub fn export_snapshot(store: &DayRecordStore, ledger: &BalanceLedger) -> Value {
    Snapshot::capture(store, ledger).to_document()
}

/// Validates a snapshot document and builds a new store and ledger from it.
pub fn import_snapshot(document: &Value) -> Result<(DayRecordStore, BalanceLedger), FormatError> {
    Ok(Snapshot::from_document(document)?.into_parts())
}

fn record_value(record: DayRecord) -> Value {
    let fields = [
        ("worked", record.worked),
        ("national", record.national),
        ("day_off", record.day_off),
        ("toil_day", record.toil_day),
    ];
    Value::Object(
        fields
            .into_iter()
            .map(|(name, flag)| (name.to_string(), Value::Bool(flag)))
            .collect(),
    )
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, FormatError> {
    value.as_object().ok_or_else(|| FormatError::NotAnObject {
        path: path.to_string(),
    })
}

/// Parses a key that must be the canonical decimal form of an integer.
fn parse_key<T>(key: &str, kind: &'static str, path: &str) -> Result<T, FormatError>
where
    T: FromStr + Display,
{
    key.parse::<T>()
        .ok()
        .filter(|value| value.to_string() == key)
        .ok_or_else(|| FormatError::InvalidKey {
            kind,
            key: key.to_string(),
            path: path.to_string(),
        })
}
