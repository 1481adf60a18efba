// crates/mastdup-core/src/table.rs

//! # Result Tables
//!
//! Fetched observation records plus a little metadata, written to a file
//! that describes itself: every file carries a format tag, its column names
//! and types, and free-form `key = value` metadata. Reloading gives back the
//! same columns and the same rows.
//!
//! The file extension picks the codec:
//!
//! | extension  | codec          |
//! |------------|----------------|
//! | `.json`    | JSON           |
//! | `.json.gz` | gzipped JSON   |
//! | `.bin`     | bincode        |
//! | `.bin.gz`  | gzipped bincode|

use crate::error::{MastError, Result};
use crate::loader::common_io;
use crate::model::{ColumnType, ObservationRecord, OBSERVATION_COLUMNS};
use crate::survey::DuplicateCheck;
use crate::traits::QueryOptions;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Tag stored in every table file.
pub const TABLE_FORMAT: &str = "mastdup-table/1";

// We use a 256MB limit to refuse absurd binary payloads.
const BINCODE_LIMIT: u64 = 256 * 1024 * 1024;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

/// Codec for `path`, from its extension.
pub fn detect_format(path: &Path) -> Result<(TableFormat, CompressionMode)> {
    let candidates = [
        ("json.gz", TableFormat::Json, CompressionMode::Gzip),
        ("bin.gz", TableFormat::Binary, CompressionMode::Gzip),
        ("json", TableFormat::Json, CompressionMode::None),
        ("bin", TableFormat::Binary, CompressionMode::None),
    ];
    candidates
        .into_iter()
        .find(|(ext, _, _)| common_io::has_extension(path, ext))
        .map(|(_, format, compression)| (format, compression))
        .ok_or_else(|| MastError::UnsupportedFormat(path.display().to_string()))
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(BINCODE_LIMIT)
        .allow_trailing_bytes()
}

// -----------------------------------------------------------------------------
// TABLE
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// Ordered `key = value` metadata. Setting an existing key replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    entries: Vec<(String, String)>,
}

impl TableMeta {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub format: String,
    pub meta: TableMeta,
    pub columns: Vec<Column>,
    pub rows: Vec<ObservationRecord>,
}

fn schema() -> Vec<Column> {
    OBSERVATION_COLUMNS
        .iter()
        .map(|(name, dtype)| Column {
            name: (*name).to_string(),
            dtype: *dtype,
        })
        .collect()
}

impl ResultTable {
    pub fn new(rows: Vec<ObservationRecord>) -> Self {
        let mut meta = TableMeta::default();
        meta.set("created_by", concat!("mastdup ", env!("CARGO_PKG_VERSION")));
        Self {
            format: TABLE_FORMAT.to_string(),
            meta,
            columns: schema(),
            rows,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.set(key, value);
        self
    }

    /// Table of every record fetched by a duplicate check, annotated with the
    /// targets and the filters that produced it.
    pub fn from_check(check: &DuplicateCheck, options: &QueryOptions) -> Self {
        let targets: Vec<&str> = check.counts.iter().map(|(k, _)| k).collect();
        let with_matches: Vec<&str> = check.counts.positive().map(|(k, _)| k).collect();

        Self::new(check.records().cloned().collect())
            .with_meta("targets", targets.join("; "))
            .with_meta("targets_with_matches", with_matches.join("; "))
            .with_meta("collections", options.collections.join(","))
            .with_meta("product_types", options.product_types.join(","))
            .with_meta("radius_deg", options.radius().to_string())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Write the table; the codec follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (format, compression) = detect_format(path)?;
        write_generic(path, self, format, compression)?;
        debug!(path = %path.display(), rows = self.len(), "wrote result table");
        Ok(())
    }

    /// Read a table written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (format, compression) = detect_format(path)?;
        let reader = common_io::open_stream(path, compression == CompressionMode::Gzip)?;

        let table: ResultTable = match format {
            TableFormat::Json => serde_json::from_reader(reader)?,
            TableFormat::Binary => bincode_options().deserialize_from(reader)?,
        };
        table.validate()?;
        debug!(path = %path.display(), rows = table.len(), "read result table");
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        if self.format != TABLE_FORMAT {
            return Err(MastError::InvalidData(format!(
                "unknown table format `{}`",
                self.format
            )));
        }
        if self.columns != schema() {
            return Err(MastError::InvalidData(format!(
                "column schema does not match observation records: {}",
                self.column_names().join(", ")
            )));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// GENERIC WRITER
// -----------------------------------------------------------------------------

/// Writes any serializable value to disk with the chosen codec.
fn write_generic<T: Serialize>(
    path: &Path,
    value: &T,
    format: TableFormat,
    compression: CompressionMode,
) -> Result<()> {
    let mut writer = common_io::create_stream(path, compression == CompressionMode::Gzip)?;

    match format {
        TableFormat::Json => serde_json::to_writer_pretty(&mut writer, value)?,
        TableFormat::Binary => bincode_options().serialize_into(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> ResultTable {
        ResultTable::new(vec![
            ObservationRecord {
                target_name: Some("NGC-1275".into()),
                t_exptime: Some(1288.5),
                calib_level: Some(-1),
                ..Default::default()
            },
            ObservationRecord::default(),
        ])
        .with_meta("query", "name `NGC 1275`")
    }

    #[test]
    fn format_detection() {
        let f = |p: &str| detect_format(&PathBuf::from(p));
        assert_eq!(f("a.json").unwrap(), (TableFormat::Json, CompressionMode::None));
        assert_eq!(f("a.JSON.GZ").unwrap(), (TableFormat::Json, CompressionMode::Gzip));
        assert_eq!(f("a.bin").unwrap(), (TableFormat::Binary, CompressionMode::None));
        assert_eq!(f("a.bin.gz").unwrap(), (TableFormat::Binary, CompressionMode::Gzip));
        assert!(matches!(f("a.csv"), Err(MastError::UnsupportedFormat(_))));
    }

    #[test]
    fn round_trip_every_codec() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample();
        for name in ["t.json", "t.bin", "t.json.gz", "t.bin.gz"] {
            let path = dir.path().join(name);
            table.save(&path).unwrap();
            let back = ResultTable::load(&path).unwrap();
            assert_eq!(back, table, "round trip through {name}");
            assert_eq!(back.column_names(), table.column_names());
            assert_eq!(back.len(), 2);
        }
    }

    #[test]
    fn meta_set_replaces_in_place() {
        let mut meta = TableMeta::default();
        meta.set("a", "1");
        meta.set("b", "2");
        meta.set("a", "3");
        assert_eq!(meta.iter().collect::<Vec<_>>(), [("a", "3"), ("b", "2")]);
        assert_eq!(meta.get("b"), Some("2"));
        assert_eq!(meta.get("c"), None);
    }

    #[test]
    fn foreign_schema_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let mut table = sample();
        table.columns.pop();
        table.save(&path).unwrap();
        assert!(matches!(
            ResultTable::load(&path),
            Err(MastError::InvalidData(_))
        ));
    }
}
