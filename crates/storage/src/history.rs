//! Prediction History Store

use crate::StorageError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV header row, in column order
pub const HISTORY_COLUMNS: [&str; 6] = [
    "Country",
    "Visa Type",
    "Application Month",
    "Age",
    "Travel History",
    "Predicted Processing Days",
];

/// One saved prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Visa Type")]
    pub visa_type: String,
    #[serde(rename = "Application Month")]
    pub application_month: u32,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Travel History")]
    pub travel_history_count: u32,
    #[serde(rename = "Predicted Processing Days")]
    pub predicted_processing_days: i64,
}

/// Saved predictions backed by a CSV file that is rewritten on every persist
#[derive(Debug)]
pub struct HistoryStore {
    /// Backing file
    path: PathBuf,
    /// Records in insertion order
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Load history from `path`, or start empty if the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let records = if path.exists() {
            let mut reader = csv::Reader::from_path(&path)?;
            reader
                .deserialize()
                .collect::<Result<Vec<HistoryRecord>, _>>()?
        } else {
            debug!("No history file at {}, starting empty", path.display());
            Vec::new()
        };

        info!("Loaded {} history records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a record in memory
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Rewrite the backing file with every record
    pub fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, self.to_csv_bytes()?)?;
        debug!("Persisted {} history records", self.records.len());
        Ok(())
    }

    /// Append a record and persist the whole history. The record is kept only
    /// if the write succeeds.
    pub fn save(&mut self, record: HistoryRecord) -> Result<(), StorageError> {
        self.append(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// All records in insertion order
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Predicted days in insertion order
    pub fn trend(&self) -> Vec<i64> {
        self.records
            .iter()
            .map(|r| r.predicted_processing_days)
            .collect()
    }

    /// Render the history as CSV, header row included even when empty
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(HISTORY_COLUMNS)?;
        for record in &self.records {
            writer.serialize(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| StorageError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn temp_history_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "visa-history-{}-{}.csv",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default(),
            NEXT_FILE.fetch_add(1, Ordering::Relaxed)
        ))
    }

    fn record(country: &str, days: i64) -> HistoryRecord {
        HistoryRecord {
            country: country.to_string(),
            visa_type: "Tourist".to_string(),
            application_month: 3,
            age: 30,
            travel_history_count: 5,
            predicted_processing_days: days,
        }
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let store = HistoryStore::load(temp_history_path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let path = temp_history_path();

        let mut store = HistoryStore::load(&path).unwrap();
        store.save(record("India", 42)).unwrap();
        store.save(record("Côte d'Ivoire, West", 17)).unwrap();

        let reloaded = HistoryStore::load(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.trend(), vec![42, 17]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_csv_header_matches_columns() {
        let mut store = HistoryStore::load(temp_history_path()).unwrap();
        store.append(record("UK", 9));

        let csv = String::from_utf8(store.to_csv_bytes().unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Country,Visa Type,Application Month,Age,Travel History,Predicted Processing Days")
        );
        assert_eq!(lines.next(), Some("UK,Tourist,3,30,5,9"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let store = HistoryStore::load(temp_history_path()).unwrap();
        let csv = String::from_utf8(store.to_csv_bytes().unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_persist_rewrites_whole_file() {
        let path = temp_history_path();
        std::fs::write(
            &path,
            "Country,Visa Type,Application Month,Age,Travel History,Predicted Processing Days\nUSA,Work,1,40,2,30\n",
        )
        .unwrap();

        let mut store = HistoryStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        store.save(record("Japan", 12)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.ends_with("Japan,Tourist,3,30,5,12\n"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_failed_save_keeps_memory_unchanged() {
        let blocker = temp_history_path();
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = HistoryStore::load(blocker.join("history.csv")).unwrap();
        store.append(record("USA", 30));

        let result = store.save(record("India", 42));
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.trend(), vec![30]);

        let _ = std::fs::remove_file(blocker);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = temp_history_path();
        std::fs::write(
            &path,
            "Country,Visa Type,Application Month,Age,Travel History,Predicted Processing Days\nUSA,Work,March,40,2,30\n",
        )
        .unwrap();

        assert!(matches!(
            HistoryStore::load(&path),
            Err(StorageError::Serialization(_))
        ));

        let _ = std::fs::remove_file(path);
    }
}
