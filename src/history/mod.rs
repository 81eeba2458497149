//! Local History Cache
//!
//! Keeps the most recent DRE results (date, net profit, net margin) in a
//! [`KeyValueStore`], newest first. Reading never fails: a missing or
//! unreadable entry is an empty history.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::CalculationResult;

pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

#[cfg(feature = "native")]
pub use store::FileStore;

/// Storage key of the persisted list
pub const HISTORY_KEY: &str = "historico_dre";

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 20;

/// One remembered calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub data: DateTime<Utc>,
    pub lucro_liquido: f64,
    pub margem_liquida: f64,
}

impl HistoryEntry {
    /// Entry for a calculation finished at `at`. Missing figures count as 0.
    pub fn from_result(result: &CalculationResult, at: DateTime<Utc>) -> Self {
        Self {
            data: at,
            lucro_liquido: result.lucro_liquido(),
            margem_liquida: result.margem_liquida(),
        }
    }
}

/// Capped, most-recent-first history over a key-value store
#[derive(Debug)]
pub struct HistoryCache<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted entries, newest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read history");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding unreadable history");
                Vec::new()
            }
        }
    }

    /// Put `entry` in front and keep at most `capacity` entries. Returns
    /// the new length.
    pub fn record(&self, entry: HistoryEntry) -> StoreResult<usize> {
        let mut entries = self.entries();
        entries.insert(0, entry);
        entries.truncate(self.capacity);

        let json = serde_json::to_string(&entries)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        self.store.set_item(&self.key, &json)?;

        tracing::debug!(key = %self.key, len = entries.len(), "History updated");
        Ok(entries.len())
    }

    /// Record a successful calculation finished now
    pub fn record_result(&self, result: &CalculationResult) -> StoreResult<usize> {
        self.record(HistoryEntry::from_result(result, Utc::now()))
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove_item(&self.key)
    }

    /// Net profit over time, oldest first
    pub fn profit_series(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.entries()
            .into_iter()
            .rev()
            .map(|e| (e.data, e.lucro_liquido))
            .collect()
    }

    /// Write the entries as CSV (`data,lucro_liquido,margem_liquida`).
    /// Returns the number of rows written.
    #[cfg(feature = "native")]
    pub fn export_csv<W: std::io::Write>(&self, writer: W) -> Result<usize, csv::Error> {
        let entries = self.entries();
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(["data", "lucro_liquido", "margem_liquida"])?;
        for entry in &entries {
            wtr.write_record([
                entry.data.to_rfc3339(),
                format!("{:.2}", entry.lucro_liquido),
                format!("{:.2}", entry.margem_liquida),
            ])?;
        }
        wtr.flush()?;

        Ok(entries.len())
    }
}
