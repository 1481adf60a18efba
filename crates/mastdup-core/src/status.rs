// crates/mastdup-core/src/status.rs

//! Links to a program's status page, built from an explicit template.

use crate::config::{ArchiveConfig, JWST_STATUS_TEMPLATE};
use crate::error::{MastError, Result};
use crate::model::ObservationRecord;

const PLACEHOLDER: &str = "{proposal_id}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUrlTemplate {
    template: String,
}

impl Default for StatusUrlTemplate {
    fn default() -> Self {
        Self {
            template: JWST_STATUS_TEMPLATE.to_string(),
        }
    }
}

impl StatusUrlTemplate {
    /// The template must contain `{proposal_id}`.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(MastError::InvalidTemplate(template));
        }
        Ok(Self { template })
    }

    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        Self::new(config.status_url_template.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute a (trimmed) proposal id. No I/O.
    pub fn build(&self, proposal_id: &str) -> String {
        self.template.replace(PLACEHOLDER, proposal_id.trim())
    }
}

/// One `(proposal_id, url)` per distinct proposal, in first-seen order.
/// Records without a proposal id are skipped.
pub fn unique_status_urls(
    records: &[ObservationRecord],
    template: &StatusUrlTemplate,
) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for id in records.iter().filter_map(|r| r.proposal_id.as_deref()) {
        let id = id.trim();
        if id.is_empty() || out.iter().any(|(seen, _)| seen == id) {
            continue;
        }
        out.push((id.to_string(), template.build(id)));
    }
    out
}
