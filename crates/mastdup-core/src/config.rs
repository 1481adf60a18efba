// crates/mastdup-core/src/config.rs

//! # Archive Configuration
//!
//! Every tunable the client and the status-URL builder need, in one
//! serializable value. Nothing here is global: callers build an
//! [`ArchiveConfig`] (default, JSON file, or both plus overrides) and hand
//! it to whatever needs it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const MAST_INVOKE_URL: &str = "https://mast.stsci.edu/api/v0/invoke";

pub const JWST_STATUS_TEMPLATE: &str =
    "https://www.stsci.edu/jwst-program-info/program/?program={proposal_id}";

pub const HST_STATUS_TEMPLATE: &str =
    "https://www.stsci.edu/cgi-bin/get-proposal-info?id={proposal_id}&observatory=HST";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// MAST `invoke` endpoint that accepts the `request=<json>` form.
    pub base_url: String,
    /// Service used to turn a target name into coordinates.
    pub name_lookup_service: String,
    /// Rows requested per page when fetching observation records.
    pub page_size: u32,
    /// Per-request timeout handed to the HTTP client.
    pub timeout_secs: u64,
    /// Template with a `{proposal_id}` placeholder.
    pub status_url_template: String,
    /// Applied when a query does not name its own collections. Empty = all.
    pub default_collections: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: MAST_INVOKE_URL.to_string(),
            name_lookup_service: "Mast.Name.Lookup".to_string(),
            page_size: 50_000,
            timeout_secs: 60,
            status_url_template: JWST_STATUS_TEMPLATE.to_string(),
            default_collections: Vec::new(),
        }
    }
}

impl ArchiveConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Collections to use for a query: the explicit list if any, else the
    /// configured default.
    pub fn collections_or_default(&self, explicit: &[String]) -> Vec<String> {
        if explicit.is_empty() {
            self.default_collections.clone()
        } else {
            explicit.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"page_size": 500, "default_collections": ["HST"]}}"#).unwrap();

        let cfg = ArchiveConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.page_size, 500);
        assert_eq!(cfg.default_collections, vec!["HST".to_string()]);
        assert_eq!(cfg.base_url, MAST_INVOKE_URL);
        assert_eq!(cfg.status_url_template, JWST_STATUS_TEMPLATE);
    }

    #[test]
    fn explicit_collections_win() {
        let cfg = ArchiveConfig {
            default_collections: vec!["JWST".into()],
            ..ArchiveConfig::default()
        };
        assert_eq!(cfg.collections_or_default(&[]), vec!["JWST".to_string()]);
        assert_eq!(
            cfg.collections_or_default(&["HST".into()]),
            vec!["HST".to_string()]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArchiveConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::MastError::Io(_)));
    }
}
