// crates/mastdup-core/src/client/wire.rs

//! Request and response shapes of the MAST `invoke` endpoint.
//!
//! NOTE: the response layout is owned by the archive. Only the parts this
//! crate reads are modelled; everything else is ignored.

use crate::angle::{SkyBox, SkyCoord};
use crate::error::{MastError, Result};
use crate::model::ObservationRecord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub(crate) const CONE_SERVICE: &str = "Mast.Caom.Filtered.Position";
pub(crate) const FILTERED_SERVICE: &str = "Mast.Caom.Filtered";
pub(crate) const COUNT_COLUMNS: &str = "COUNT_BIG(*)";
pub(crate) const ALL_COLUMNS: &str = "*";

/// Sky footprint of a CAOM query once names are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Footprint {
    Cone { center: SkyCoord, radius_deg: f64 },
    Box(SkyBox),
}

/// Body of the `request` form field.
#[derive(Debug, Serialize)]
pub(crate) struct MastRequest<'a> {
    pub service: &'a str,
    pub params: Value,
    pub format: &'static str,
    pub pagesize: u32,
    pub page: u32,
    pub removenullcolumns: bool,
    pub removecache: bool,
    pub timeout: u64,
}

impl<'a> MastRequest<'a> {
    pub fn new(service: &'a str, params: Value) -> Self {
        Self {
            service,
            params,
            format: "json",
            pagesize: 50_000,
            page: 1,
            removenullcolumns: true,
            removecache: true,
            timeout: 60,
        }
    }

    pub fn page(mut self, page: u32, pagesize: u32) -> Self {
        self.page = page;
        self.pagesize = pagesize;
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }
}

pub(crate) fn name_lookup_request<'a>(service: &'a str, name: &str) -> MastRequest<'a> {
    MastRequest::new(service, json!({ "input": name, "format": "json" }))
}

/// Build a CAOM search for `footprint` with value filters on
/// `obs_collection` and (optionally) `dataproduct_type`.
pub(crate) fn caom_request(
    footprint: &Footprint,
    columns: &str,
    collections: &[String],
    product_types: &[String],
) -> MastRequest<'static> {
    let mut filters = Vec::new();
    if !collections.is_empty() {
        filters.push(json!({ "paramName": "obs_collection", "values": collections }));
    }
    if !product_types.is_empty() {
        filters.push(json!({ "paramName": "dataproduct_type", "values": product_types }));
    }

    match footprint {
        Footprint::Cone { center, radius_deg } => {
            let params = json!({
                "columns": columns,
                "filters": filters,
                "position": format!("{}, {}, {}", center.ra, center.dec, radius_deg),
            });
            MastRequest::new(CONE_SERVICE, params)
        }
        Footprint::Box(b) => {
            filters.push(json!({
                "paramName": "s_ra",
                "values": [{ "min": b.ra_min, "max": b.ra_max }],
            }));
            filters.push(json!({
                "paramName": "s_dec",
                "values": [{ "min": b.dec_min, "max": b.dec_max }],
            }));
            MastRequest::new(FILTERED_SERVICE, json!({ "columns": columns, "filters": filters }))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Paging {
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
    #[serde(rename = "rowsFiltered", default)]
    pub rows_filtered: u64,
}

/// Whether a paged fetch has everything after a page of `fetched` rows,
/// `total_fetched` rows in all.
///
/// An empty page always ends the fetch. With a `rowsFiltered` total the
/// fetch ends once that many rows are in; without one, a short page ends it.
pub(crate) fn page_done(
    total_fetched: usize,
    fetched: usize,
    page_size: u32,
    paging: Option<&Paging>,
) -> bool {
    if fetched == 0 {
        return true;
    }
    match paging {
        Some(p) if p.rows_filtered > 0 => total_fetched as u64 >= p.rows_filtered,
        _ => fetched < page_size as usize,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MastResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl MastResponse {
    pub fn parse(body: &str) -> Result<Self> {
        let resp: MastResponse = serde_json::from_str(body)?;
        resp.check_status()?;
        Ok(resp)
    }

    fn check_status(&self) -> Result<()> {
        match self.status.as_str() {
            "ERROR" => Err(MastError::Archive(
                self.msg.clone().unwrap_or_else(|| "unknown error".into()),
            )),
            "EXECUTING" => Err(MastError::Archive(
                "query still executing when the server timeout expired".into(),
            )),
            _ => Ok(()),
        }
    }

    /// The single scalar of a `COUNT_BIG(*)` query.
    pub fn count(&self) -> Result<u64> {
        let value = self
            .data
            .first()
            .and_then(|row| row.values().next())
            .ok_or_else(|| MastError::InvalidData("count query returned no rows".into()))?;
        value_u64(value)
            .ok_or_else(|| MastError::InvalidData(format!("count is not an integer: {value}")))
    }

    pub fn records(&self) -> Vec<ObservationRecord> {
        self.data.iter().map(record_from_row).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ResolvedCoordinate {
    ra: f64,
    decl: f64,
    #[serde(rename = "canonicalName", default)]
    canonical_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NameLookupResponse {
    #[serde(rename = "resolvedCoordinate", default)]
    resolved: Vec<ResolvedCoordinate>,
}

/// Coordinates and canonical name of the first resolver hit.
pub(crate) fn parse_name_lookup(name: &str, body: &str) -> Result<(SkyCoord, Option<String>)> {
    let resp: NameLookupResponse = serde_json::from_str(body)?;
    let hit = resp
        .resolved
        .into_iter()
        .next()
        .ok_or_else(|| MastError::NotFound(format!("could not resolve `{name}` to a sky position")))?;
    Ok((SkyCoord::new(hit.ra, hit.decl)?, hit.canonical_name))
}

fn value_str(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn value_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_u64(v: &Value) -> Option<u64> {
    value_i64(v).and_then(|n| u64::try_from(n).ok())
}

fn record_from_row(row: &Map<String, Value>) -> ObservationRecord {
    let s = |key: &str| row.get(key).and_then(value_str);
    let f = |key: &str| row.get(key).and_then(value_f64);

    ObservationRecord {
        obs_id: s("obs_id"),
        obs_collection: s("obs_collection"),
        target_name: s("target_name"),
        instrument_name: s("instrument_name"),
        filters: s("filters"),
        dataproduct_type: s("dataproduct_type"),
        t_exptime: f("t_exptime"),
        proposal_id: s("proposal_id"),
        proposal_pi: s("proposal_pi"),
        obs_title: s("obs_title"),
        calib_level: row.get("calib_level").and_then(value_i64),
        s_ra: f("s_ra"),
        s_dec: f("s_dec"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAOM_PAGE: &str = r#"{
        "status": "COMPLETE",
        "msg": "",
        "data": [
            {"obs_id": "jw01234-o001_t001_nircam_clear-f200w", "obs_collection": "JWST",
             "target_name": "NGC-1275", "instrument_name": "NIRCAM/IMAGE", "filters": "F200W",
             "dataproduct_type": "image", "t_exptime": 1288.499, "proposal_id": "1234",
             "proposal_pi": "Doe, Jane", "obs_title": "Filaments in Perseus", "calib_level": 3,
             "s_ra": 49.95, "s_dec": 41.51},
            {"obs_id": "planned", "obs_collection": "JWST", "target_name": "NGC1275",
             "proposal_id": 4567, "t_exptime": "300", "calib_level": -1, "filters": ""}
        ],
        "fields": [{"name": "obs_id", "type": "string"}],
        "paging": {"page": 1, "pageSize": 2, "pagesFiltered": 1, "rows": 2, "rowsTotal": 2, "rowsFiltered": 2}
    }"#;

    #[test]
    fn parses_records_leniently() {
        let resp = MastResponse::parse(CAOM_PAGE).unwrap();
        let recs = resp.records();
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].instrument_name.as_deref(), Some("NIRCAM/IMAGE"));
        assert_eq!(recs[0].t_exptime, Some(1288.499));
        assert_eq!(recs[0].calib_level, Some(3));

        // numbers as strings and strings as numbers
        assert_eq!(recs[1].proposal_id.as_deref(), Some("4567"));
        assert_eq!(recs[1].t_exptime, Some(300.0));
        assert_eq!(recs[1].filters, None);
        assert!(recs[1].is_planned());

        assert_eq!(resp.paging.unwrap().rows_filtered, 2);
    }

    #[test]
    fn count_reads_first_scalar() {
        let resp = MastResponse::parse(r#"{"status":"COMPLETE","data":[{"Column1": 17}]}"#).unwrap();
        assert_eq!(resp.count().unwrap(), 17);

        let zero = MastResponse::parse(r#"{"status":"COMPLETE","data":[{"Column1": "0"}]}"#).unwrap();
        assert_eq!(zero.count().unwrap(), 0);

        let empty = MastResponse::parse(r#"{"status":"COMPLETE","data":[]}"#).unwrap();
        assert!(matches!(empty.count(), Err(MastError::InvalidData(_))));
    }

    fn paging(rows_filtered: u64) -> Paging {
        Paging {
            page: 1,
            page_size: 100,
            rows_filtered,
        }
    }

    #[test]
    fn paging_stops_at_rows_filtered() {
        // 200 rows in pages of 100: the first full page is not the end,
        // the second (exactly full) page is.
        assert!(!page_done(100, 100, 100, Some(&paging(200))));
        assert!(page_done(200, 100, 100, Some(&paging(200))));

        // 250 rows: the short third page ends it.
        assert!(!page_done(200, 100, 100, Some(&paging(250))));
        assert!(page_done(250, 50, 100, Some(&paging(250))));

        // A single short page.
        assert!(page_done(7, 7, 100, Some(&paging(7))));
    }

    #[test]
    fn paging_without_totals_stops_on_short_page() {
        assert!(!page_done(100, 100, 100, None));
        assert!(page_done(130, 30, 100, None));
        // `paging` present but without rowsFiltered behaves the same.
        assert!(!page_done(100, 100, 100, Some(&paging(0))));
        assert!(page_done(130, 30, 100, Some(&paging(0))));
    }

    #[test]
    fn empty_page_always_stops() {
        assert!(page_done(0, 0, 100, None));
        assert!(page_done(0, 0, 100, Some(&paging(0))));
        // Server claims more rows than it returns.
        assert!(page_done(100, 0, 100, Some(&paging(500))));
    }

    #[test]
    fn error_status_is_archive_error() {
        let err = MastResponse::parse(r#"{"status":"ERROR","msg":"bad column"}"#).unwrap_err();
        assert!(matches!(err, MastError::Archive(m) if m == "bad column"));
    }

    #[test]
    fn name_lookup() {
        let body = r#"{"resolvedCoordinate":[{"ra":10.684708,"decl":41.26875,
            "canonicalName":"MESSIER 031","resolver":"NED"}],"status":""}"#;
        let (c, canonical) = parse_name_lookup("M31", body).unwrap();
        assert_eq!((c.ra, c.dec), (10.684708, 41.26875));
        assert_eq!(canonical.as_deref(), Some("MESSIER 031"));

        let err = parse_name_lookup("nope", r#"{"resolvedCoordinate":[],"status":""}"#).unwrap_err();
        assert!(matches!(err, MastError::NotFound(_)));
    }

    #[test]
    fn cone_request_shape() {
        let footprint = Footprint::Cone {
            center: SkyCoord::new(10.5, -1.0).unwrap(),
            radius_deg: 0.2,
        };
        let req = caom_request(&footprint, COUNT_COLUMNS, &["JWST".into()], &[]);
        let v = serde_json::to_value(&req).unwrap();

        assert_eq!(v["service"], CONE_SERVICE);
        assert_eq!(v["params"]["position"], "10.5, -1, 0.2");
        assert_eq!(v["params"]["columns"], "COUNT_BIG(*)");
        assert_eq!(v["params"]["filters"][0]["paramName"], "obs_collection");
        assert_eq!(v["params"]["filters"][0]["values"][0], "JWST");
        assert_eq!(v["params"]["filters"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn box_request_uses_range_filters() {
        let footprint = Footprint::Box(SkyBox::new(10.0, 11.0, 40.0, 42.0).unwrap());
        let req = caom_request(&footprint, ALL_COLUMNS, &[], &["image".into()]).page(2, 100);
        let v = serde_json::to_value(&req).unwrap();

        assert_eq!(v["service"], FILTERED_SERVICE);
        assert_eq!(v["page"], 2);
        assert_eq!(v["pagesize"], 100);
        let filters = v["params"]["filters"].as_array().unwrap();
        assert_eq!(filters[0]["paramName"], "dataproduct_type");
        assert_eq!(filters[1]["paramName"], "s_ra");
        assert_eq!(filters[1]["values"][0]["max"], 11.0);
        assert_eq!(filters[2]["values"][0]["min"], 40.0);
    }
}
