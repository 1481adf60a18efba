// crates/mastdup-core/src/model/observation.rs
use serde::{Deserialize, Serialize};

/// Storage type of a result-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Str,
    Float,
    Int,
}

/// The archive columns this crate keeps, in table order.
pub const OBSERVATION_COLUMNS: &[(&str, ColumnType)] = &[
    ("obs_id", ColumnType::Str),
    ("obs_collection", ColumnType::Str),
    ("target_name", ColumnType::Str),
    ("instrument_name", ColumnType::Str),
    ("filters", ColumnType::Str),
    ("dataproduct_type", ColumnType::Str),
    ("t_exptime", ColumnType::Float),
    ("proposal_id", ColumnType::Str),
    ("proposal_pi", ColumnType::Str),
    ("obs_title", ColumnType::Str),
    ("calib_level", ColumnType::Int),
    ("s_ra", ColumnType::Float),
    ("s_dec", ColumnType::Float),
];

/// Columns shown by default when printing search results.
pub const DEFAULT_DISPLAY_COLUMNS: &[&str] = &[
    "target_name",
    "instrument_name",
    "filters",
    "dataproduct_type",
    "t_exptime",
    "proposal_id",
    "obs_title",
];

/// One archived or planned exposure.
///
/// The archive omits columns freely, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub obs_id: Option<String>,
    pub obs_collection: Option<String>,
    pub target_name: Option<String>,
    pub instrument_name: Option<String>,
    pub filters: Option<String>,
    pub dataproduct_type: Option<String>,
    /// Exposure time in seconds.
    pub t_exptime: Option<f64>,
    pub proposal_id: Option<String>,
    pub proposal_pi: Option<String>,
    pub obs_title: Option<String>,
    /// `-1` marks a planned observation that has not executed yet.
    pub calib_level: Option<i64>,
    pub s_ra: Option<f64>,
    pub s_dec: Option<f64>,
}

impl ObservationRecord {
    pub fn is_planned(&self) -> bool {
        self.calib_level == Some(-1)
    }

    /// Display text for a column, `None` when the value (or column) is absent.
    pub fn field(&self, column: &str) -> Option<String> {
        let text = |v: &Option<String>| v.clone();
        match column {
            "obs_id" => text(&self.obs_id),
            "obs_collection" => text(&self.obs_collection),
            "target_name" => text(&self.target_name),
            "instrument_name" => text(&self.instrument_name),
            "filters" => text(&self.filters),
            "dataproduct_type" => text(&self.dataproduct_type),
            "t_exptime" => self.t_exptime.map(format_float),
            "proposal_id" => text(&self.proposal_id),
            "proposal_pi" => text(&self.proposal_pi),
            "obs_title" => text(&self.obs_title),
            "calib_level" => self.calib_level.map(|v| v.to_string()),
            "s_ra" => self.s_ra.map(format_float),
            "s_dec" => self.s_dec.map(format_float),
            _ => None,
        }
    }
}

/// At most six decimals, trailing zeros dropped (`1288.499`, `42`).
pub(crate) fn format_float(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_means_calib_level_minus_one() {
        let mut rec = ObservationRecord::default();
        assert!(!rec.is_planned());
        rec.calib_level = Some(-1);
        assert!(rec.is_planned());
        rec.calib_level = Some(3);
        assert!(!rec.is_planned());
    }

    #[test]
    fn field_formats_by_type() {
        let rec = ObservationRecord {
            target_name: Some("NGC-1275".into()),
            t_exptime: Some(1288.499),
            calib_level: Some(2),
            s_ra: Some(49.95),
            ..Default::default()
        };
        assert_eq!(rec.field("target_name").as_deref(), Some("NGC-1275"));
        assert_eq!(rec.field("t_exptime").as_deref(), Some("1288.499"));
        assert_eq!(rec.field("calib_level").as_deref(), Some("2"));
        assert_eq!(rec.field("s_ra").as_deref(), Some("49.95"));
        assert_eq!(rec.field("filters"), None);
        assert_eq!(rec.field("no_such_column"), None);
    }

    #[test]
    fn format_float_trims() {
        assert_eq!(format_float(42.0), "42");
        assert_eq!(format_float(-0.0000001), "0");
        assert_eq!(format_float(0.5), "0.5");
    }

    #[test]
    fn every_schema_column_is_displayable() {
        let rec = ObservationRecord {
            obs_id: Some("x".into()),
            obs_collection: Some("x".into()),
            target_name: Some("x".into()),
            instrument_name: Some("x".into()),
            filters: Some("x".into()),
            dataproduct_type: Some("x".into()),
            t_exptime: Some(1.0),
            proposal_id: Some("x".into()),
            proposal_pi: Some("x".into()),
            obs_title: Some("x".into()),
            calib_level: Some(1),
            s_ra: Some(1.0),
            s_dec: Some(1.0),
        };
        for (name, _) in OBSERVATION_COLUMNS {
            assert!(rec.field(name).is_some(), "column {name} not rendered");
        }
    }
}
