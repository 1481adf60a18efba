// crates/mastdup-core/src/client/mod.rs

//! # MAST Client
//!
//! Blocking HTTP implementation of [`ArchiveQuery`] against the MAST
//! `invoke` endpoint. One request at a time; no caching, retry or backoff.
//! Whatever the archive or the network reports is handed back unchanged.

use crate::angle::SkyCoord;
use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::model::ObservationRecord;
use crate::traits::{ArchiveQuery, QueryOptions, Search};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

pub(crate) mod wire;

use wire::{Footprint, MastRequest, MastResponse};

pub struct MastClient {
    http: Client,
    config: ArchiveConfig,
}

impl MastClient {
    pub fn new(config: ArchiveConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mastdup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Resolve a target name to coordinates with the archive's name service.
    pub fn resolve_name(&self, name: &str) -> Result<SkyCoord> {
        let request = wire::name_lookup_request(&self.config.name_lookup_service, name);
        let body = self.post(&request)?;
        let (coord, canonical) = wire::parse_name_lookup(name, &body)?;
        debug!(name, canonical = canonical.as_deref().unwrap_or("-"), %coord, "resolved target name");
        Ok(coord)
    }

    fn footprint(&self, search: &Search, options: &QueryOptions) -> Result<Footprint> {
        let footprint = match search {
            Search::Name(name) => Footprint::Cone {
                center: self.resolve_name(name)?,
                radius_deg: options.radius(),
            },
            Search::Position(center) => Footprint::Cone {
                center: *center,
                radius_deg: options.radius(),
            },
            Search::Region(b) => Footprint::Box(*b),
        };
        Ok(footprint)
    }

    fn post(&self, request: &MastRequest<'_>) -> Result<String> {
        let payload = serde_json::to_string(request)?;
        debug!(service = request.service, page = request.page, "MAST request");

        let body = self
            .http
            .post(&self.config.base_url)
            .header("Accept", "text/plain")
            .form(&[("request", payload)])
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }

    fn invoke(&self, request: MastRequest<'_>) -> Result<MastResponse> {
        let request = request.timeout(self.config.timeout_secs);
        let body = self.post(&request)?;
        MastResponse::parse(&body)
    }
}

impl ArchiveQuery for MastClient {
    fn count_matches(&self, search: &Search, options: &QueryOptions) -> Result<u64> {
        let footprint = self.footprint(search, options)?;
        let collections = self.config.collections_or_default(&options.collections);

        let request = wire::caom_request(&footprint, wire::COUNT_COLUMNS, &collections, &[])
            .page(1, 1);
        let count = self.invoke(request)?.count()?;
        debug!(%search, count, "count query");
        Ok(count)
    }

    fn fetch_matches(
        &self,
        search: &Search,
        options: &QueryOptions,
    ) -> Result<Vec<ObservationRecord>> {
        let footprint = self.footprint(search, options)?;
        let collections = self.config.collections_or_default(&options.collections);
        let page_size = self.config.page_size.max(1);

        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let request = wire::caom_request(
                &footprint,
                wire::ALL_COLUMNS,
                &collections,
                &options.product_types,
            )
            .page(page, page_size);
            let response = self.invoke(request)?;
            let rows = response.records();
            let fetched = rows.len();
            records.extend(rows);

            if let Some(paging) = &response.paging {
                debug!(
                    page = paging.page,
                    page_size = paging.page_size,
                    rows_filtered = paging.rows_filtered,
                    "MAST page"
                );
            }
            if wire::page_done(records.len(), fetched, page_size, response.paging.as_ref()) {
                break;
            }
            page += 1;
        }

        debug!(%search, rows = records.len(), "fetch query");
        Ok(records)
    }
}
