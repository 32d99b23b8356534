#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading and row normalization.
//!
//! A CSV export is read into raw records (JSON objects keyed by header),
//! and each record is normalized into a [`Track`] through
//! [`normalize::normalize_record`]. Records that cannot be used are counted
//! per [`RejectReason`] in a [`NormalizeReport`] and otherwise dropped.

pub mod genre;
pub mod mapping;
pub mod normalize;
pub mod progress;
pub mod record;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use track_charts_track_models::{RejectReason, Track};

use crate::mapping::ColumnMapping;
use crate::progress::ProgressCallback;

/// Errors that can occur while loading a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row to key records by.
    #[error("CSV file contains no header row")]
    MissingHeader,
}

/// Accepted/rejected counts from one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeReport {
    /// Raw records seen.
    pub total: u64,
    /// Records that became tracks.
    pub accepted: u64,
    /// Rejected records, by reason.
    pub rejected: BTreeMap<RejectReason, u64>,
}

impl NormalizeReport {
    /// Total number of rejected records across all reasons.
    #[must_use]
    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }
}

/// Normalized tracks plus the report describing how they were produced.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    /// Tracks in file order.
    pub tracks: Vec<Track>,
    /// Normalization summary.
    pub report: NormalizeReport,
}

/// Load state of the dataset feeding the aggregation pipeline.
///
/// Aggregations only run against [`Dataset::Ready`]; while the dataset is
/// [`Dataset::Loading`] every view is skipped.
#[derive(Debug, Clone)]
pub enum Dataset {
    /// The dataset file has not finished loading.
    Loading,
    /// Normalized tracks, possibly empty after a failed load.
    Ready(Vec<Track>),
}

impl Dataset {
    /// Returns the tracks once loaded, or `None` while loading.
    #[must_use]
    pub fn tracks(&self) -> Option<&[Track]> {
        match self {
            Self::Loading => None,
            Self::Ready(tracks) => Some(tracks),
        }
    }
}

impl From<LoadedDataset> for Dataset {
    fn from(loaded: LoadedDataset) -> Self {
        Self::Ready(loaded.tracks)
    }
}

/// Reads CSV data into raw records keyed by the trimmed header row.
///
/// Short rows are padded with empty cells so every record carries every
/// header.
///
/// # Errors
///
/// Returns [`LoadError`] if the CSV is malformed or has no header row.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<serde_json::Value>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(LoadError::MissingHeader);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut map = serde_json::Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim().to_owned();
            map.insert(header.clone(), serde_json::Value::String(value));
        }
        records.push(serde_json::Value::Object(map));
    }

    Ok(records)
}

/// Normalizes raw records, reporting progress per record.
#[must_use]
pub fn normalize_records(
    records: &[serde_json::Value],
    mapping: &ColumnMapping,
    progress: &Arc<dyn ProgressCallback>,
) -> LoadedDataset {
    let mut loaded = LoadedDataset::default();
    progress.set_total(records.len() as u64);

    for (index, record) in records.iter().enumerate() {
        loaded.report.total += 1;
        match normalize::normalize_record(record, mapping) {
            Ok(track) => {
                loaded.report.accepted += 1;
                loaded.tracks.push(track);
            }
            Err(reason) => {
                log::trace!("Dropping record {index}: {reason}");
                *loaded.report.rejected.entry(reason).or_insert(0) += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish(format!(
        "Normalized {} tracks ({} rejected)",
        loaded.report.accepted,
        loaded.report.rejected_total()
    ));

    loaded
}

/// Loads and normalizes a CSV dataset from `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn load_csv(
    path: &Path,
    mapping: &ColumnMapping,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LoadedDataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let records = read_csv_records(file)?;
    log::debug!("Read {} raw records from {}", records.len(), path.display());

    let loaded = normalize_records(&records, mapping, progress);
    log::info!(
        "Loaded {} of {} records from {} ({} rejected)",
        loaded.report.accepted,
        loaded.report.total,
        path.display(),
        loaded.report.rejected_total()
    );

    Ok(loaded)
}

/// Loads a CSV dataset, degrading to an empty dataset on failure.
///
/// The failure is logged; downstream aggregations then produce their
/// neutral outputs.
#[must_use]
pub fn load_or_empty(
    path: &Path,
    mapping: &ColumnMapping,
    progress: &Arc<dyn ProgressCallback>,
) -> LoadedDataset {
    match load_csv(path, mapping, progress) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load dataset {}: {e}", path.display());
            LoadedDataset::default()
        }
    }
}
