// crates/mastdup-core/src/model/target.rs
use crate::angle::SkyCoord;
use crate::error::{MastError, Result};
use crate::text::normalize_header;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which representation a target file is read as. Exactly one per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// One identifier per row, resolved by the archive.
    Name,
    /// One RA/Dec pair per row.
    Coord,
}

impl FromStr for LoadMode {
    type Err = MastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(LoadMode::Name),
            "coord" => Ok(LoadMode::Coord),
            _ => Err(MastError::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadMode::Name => "name",
            LoadMode::Coord => "coord",
        })
    }
}

/// Column-name overrides for the target loader.
///
/// Unset (or blank) entries fall back to position: the first column for
/// names, the first and second columns for RA and Dec. Files with extra
/// leading columns should therefore always name their columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub name: Option<String>,
    pub ra: Option<String>,
    pub dec: Option<String>,
}

impl ColumnSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, column: impl Into<String>) -> Self {
        self.name = Some(column.into());
        self
    }

    pub fn with_ra(mut self, column: impl Into<String>) -> Self {
        self.ra = Some(column.into());
        self
    }

    pub fn with_dec(mut self, column: impl Into<String>) -> Self {
        self.dec = Some(column.into());
        self
    }

    pub(crate) fn name_key(&self) -> Option<String> {
        normalized(&self.name)
    }

    pub(crate) fn ra_key(&self) -> Option<String> {
        normalized(&self.ra)
    }

    pub(crate) fn dec_key(&self) -> Option<String> {
        normalized(&self.dec)
    }
}

fn normalized(column: &Option<String>) -> Option<String> {
    column
        .as_deref()
        .map(normalize_header)
        .filter(|c| !c.is_empty())
}

/// A coordinate pair exactly as it appeared in the target file.
///
/// Unit interpretation is left to the caller; [`RawCoord::to_sky`] applies
/// the usual conventions (bare sexagesimal RA in hours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCoord {
    pub ra: String,
    pub dec: String,
}

impl RawCoord {
    pub fn new(ra: impl Into<String>, dec: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
        }
    }

    pub fn to_sky(&self) -> Result<SkyCoord> {
        SkyCoord::parse(&self.ra, &self.dec)
    }

    /// Identifier used as the key of a count map: `"<ra> <dec>"`.
    pub fn identifier(&self) -> String {
        format!("{} {}", self.ra, self.dec)
    }
}

/// Result of loading a target file: one entry per data row, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetList {
    Names(Vec<String>),
    Coords(Vec<RawCoord>),
}

impl TargetList {
    pub fn mode(&self) -> LoadMode {
        match self {
            TargetList::Names(_) => LoadMode::Name,
            TargetList::Coords(_) => LoadMode::Coord,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TargetList::Names(v) => v.len(),
            TargetList::Coords(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Option<&[String]> {
        match self {
            TargetList::Names(v) => Some(v),
            TargetList::Coords(_) => None,
        }
    }

    pub fn coords(&self) -> Option<&[RawCoord]> {
        match self {
            TargetList::Coords(v) => Some(v),
            TargetList::Names(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_mode_parses_loosely_and_rejects_others() {
        assert_eq!(" Name ".parse::<LoadMode>().unwrap(), LoadMode::Name);
        assert_eq!("COORD".parse::<LoadMode>().unwrap(), LoadMode::Coord);

        let err = "coords".parse::<LoadMode>().unwrap_err();
        assert!(matches!(err, MastError::UnsupportedMode(m) if m == "coords"));
    }

    #[test]
    fn blank_overrides_count_as_unset() {
        let cols = ColumnSelection::new().with_name("   ").with_ra(" RA ");
        assert_eq!(cols.name_key(), None);
        assert_eq!(cols.ra_key().as_deref(), Some("ra"));
        assert_eq!(cols.dec_key(), None);
    }

    #[test]
    fn raw_coord_identifier_and_conversion() {
        let c = RawCoord::new("10.5", "-20.25");
        assert_eq!(c.identifier(), "10.5 -20.25");
        let sky = c.to_sky().unwrap();
        assert_eq!((sky.ra, sky.dec), (10.5, -20.25));
    }
}
