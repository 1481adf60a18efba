// crates/mastdup-core/src/lib.rs

//! # mastdup-core
//!
//! Check the MAST archive for existing or planned observations of your
//! targets before proposing new ones.
//!
//! The pieces, bottom-up:
//!
//! - [`loader`]: read a CSV target list (names or RA/Dec pairs)
//! - [`angle`]: turn RA/Dec spellings into decimal degrees
//! - [`ArchiveQuery`]: count / fetch observation records; [`MastClient`]
//!   implements it over HTTP (feature `client`)
//! - [`survey`]: count every target, fetch only the ones with matches
//! - [`table`]: save fetched records to a self-describing file and read them back
//! - [`display`] and [`status`]: text tables and program status links
//!
//! ```no_run
//! use mastdup_core::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let list = load_targets("targets.csv", LoadMode::Name, &ColumnSelection::new())?;
//!     let targets = TargetInput::from_list(&list)?;
//!
//!     let client = MastClient::new(ArchiveConfig::default())?;
//!     let options = QueryOptions::default().with_collections(["JWST"]);
//!     let check = check_targets(&client, &targets, &options)?;
//!
//!     print!("{}", render_counts(&check.counts));
//!     ResultTable::from_check(&check, &options).save("matches.json.gz")?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod angle;
#[cfg(feature = "client")]
pub mod client;
pub mod common;
pub mod config;
pub mod display;
pub mod error;
pub mod loader;
pub mod model;
pub mod status;
pub mod survey;
pub mod table;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::angle::{SkyBox, SkyCoord};
#[cfg(feature = "client")]
pub use crate::client::MastClient;
pub use crate::common::CheckSummary;
pub use crate::config::ArchiveConfig;
pub use crate::error::{MastError, Result};
pub use crate::loader::{load_targets, TargetListLoader};
pub use crate::model::{ColumnSelection, LoadMode, ObservationRecord, RawCoord, TargetList};
pub use crate::status::StatusUrlTemplate;
pub use crate::survey::{DuplicateCheck, TargetCountMap, TargetInput, TargetMatches};
pub use crate::table::ResultTable;
pub use crate::traits::{ArchiveQuery, QueryOptions, Search, DEFAULT_RADIUS_DEG};

/// Everything a notebook-style script needs, in one import.
pub mod prelude {
    pub use crate::angle::{parse_dec, parse_ra, parse_radius, SkyBox, SkyCoord};
    #[cfg(feature = "client")]
    pub use crate::client::MastClient;
    pub use crate::config::ArchiveConfig;
    pub use crate::display::{render_counts, render_table, DEFAULT_MAX_CELL_WIDTH};
    pub use crate::error::{MastError, Result};
    pub use crate::loader::{load_targets, TargetListLoader};
    pub use crate::model::{
        ColumnSelection, LoadMode, ObservationRecord, RawCoord, TargetList,
        DEFAULT_DISPLAY_COLUMNS,
    };
    pub use crate::status::{unique_status_urls, StatusUrlTemplate};
    pub use crate::survey::{
        check_targets, count_targets, fetch_positive, DuplicateCheck, TargetCountMap,
        TargetInput,
    };
    pub use crate::table::ResultTable;
    pub use crate::traits::{ArchiveQuery, QueryOptions, Search};
}
