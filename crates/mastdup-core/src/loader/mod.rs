// crates/mastdup-core/src/loader/mod.rs

//! # Target Loader
//!
//! Reads a comma-separated target file (first row = header) into a
//! [`TargetList`]. The loader never talks to the archive; it only checks the
//! input and pulls the requested columns out, one entry per data row.
//!
//! Column policy, applied before any row is read:
//!
//! - headers are matched after trim + lower-case (`" RA "` == `"ra"`)
//! - `name` mode uses the override column, or else the **first** column
//! - `coord` mode resolves RA and Dec independently: each uses its override,
//!   or else its position (RA = first column, Dec = second column)
//! - an override naming a column the header does not have is an error

use crate::error::{MastError, Result};
use crate::model::{ColumnSelection, LoadMode, RawCoord, TargetList};
use crate::text::normalize_header;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub mod common_io;

/// File extensions accepted by [`TargetListLoader::load`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv"];

/// Parses delimited target files.
#[derive(Debug, Clone)]
pub struct TargetListLoader {
    delimiter: u8,
}

impl Default for TargetListLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TargetListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a target file from disk.
    ///
    /// The extension is checked first, independent of the file contents.
    pub fn load(
        &self,
        path: impl AsRef<Path>,
        mode: LoadMode,
        columns: &ColumnSelection,
    ) -> Result<TargetList> {
        let path = path.as_ref();
        let supported = SUPPORTED_EXTENSIONS
            .iter()
            .any(|ext| common_io::has_extension(path, ext));
        if !supported {
            return Err(MastError::UnsupportedFormat(path.display().to_string()));
        }

        let reader = common_io::open_stream(path, false)?;
        let targets = self.load_from_reader(reader, mode, columns)?;
        debug!(path = %path.display(), %mode, rows = targets.len(), "loaded target file");
        Ok(targets)
    }

    /// Same as [`load`](Self::load) for data that is already in memory.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        mode: LoadMode,
        columns: &ColumnSelection,
    ) -> Result<TargetList> {
        let mut csv = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv.headers()?.iter().map(normalize_header).collect();

        match mode {
            LoadMode::Name => {
                let col = resolve_column(&headers, columns.name_key(), 0)?;
                let names = read_rows(&mut csv, |record| field(record, col))?;
                Ok(TargetList::Names(names))
            }
            LoadMode::Coord => {
                let ra = resolve_column(&headers, columns.ra_key(), 0)?;
                let dec = resolve_column(&headers, columns.dec_key(), 1)?;
                let coords = read_rows(&mut csv, |record| {
                    RawCoord::new(field(record, ra), field(record, dec))
                })?;
                Ok(TargetList::Coords(coords))
            }
        }
    }
}

/// Convenience wrapper around [`TargetListLoader::load`] with a comma delimiter.
pub fn load_targets(
    path: impl AsRef<Path>,
    mode: LoadMode,
    columns: &ColumnSelection,
) -> Result<TargetList> {
    TargetListLoader::new().load(path, mode, columns)
}

/// Index of the wanted column, or of the positional default when no
/// override is given.
fn resolve_column(headers: &[String], wanted: Option<String>, position: usize) -> Result<usize> {
    let missing = |column: String| MastError::MissingColumn {
        column,
        available: headers.to_vec(),
    };

    match wanted {
        Some(name) => headers
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| missing(name)),
        None if position < headers.len() => Ok(position),
        None => Err(missing(format!("#{}", position + 1))),
    }
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

fn read_rows<R: Read, T>(
    csv: &mut csv::Reader<R>,
    extract: impl Fn(&StringRecord) -> T,
) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for record in csv.records() {
        out.push(extract(&record?));
    }
    Ok(out)
}
