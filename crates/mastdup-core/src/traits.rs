// crates/mastdup-core/src/traits.rs
use crate::angle::{SkyBox, SkyCoord};
use crate::error::Result;
use crate::model::ObservationRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cone radius used when a query does not set one, in degrees.
pub const DEFAULT_RADIUS_DEG: f64 = 0.2;

/// What to look for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Search {
    /// A target name the archive resolves to coordinates (cone search).
    Name(String),
    /// Cone search around a position.
    Position(SkyCoord),
    /// Everything whose pointing falls inside an RA/Dec box.
    Region(SkyBox),
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Search::Name(name) => write!(f, "name `{name}`"),
            Search::Position(c) => write!(f, "position {c}"),
            Search::Region(b) => write!(f, "region {b}"),
        }
    }
}

/// Filters shared by counts and fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Cone radius in degrees; `None` means [`DEFAULT_RADIUS_DEG`].
    /// Ignored for [`Search::Region`].
    pub radius_deg: Option<f64>,
    /// `obs_collection` values such as `JWST` or `HST`. Empty = all.
    pub collections: Vec<String>,
    /// `dataproduct_type` values such as `image` or `spectrum`.
    /// Only applied by [`ArchiveQuery::fetch_matches`].
    pub product_types: Vec<String>,
}

impl QueryOptions {
    pub fn radius(&self) -> f64 {
        self.radius_deg.unwrap_or(DEFAULT_RADIUS_DEG)
    }

    pub fn with_radius(mut self, radius_deg: f64) -> Self {
        self.radius_deg = Some(radius_deg);
        self
    }

    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_product_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_types = types.into_iter().map(Into::into).collect();
        self
    }
}

/// The two archive operations the duplicate check is built on.
///
/// Implementations pass archive failures straight through; zero matches is
/// a normal answer, not an error.
///
/// # Example
///
/// ```no_run
/// use mastdup_core::{ArchiveConfig, ArchiveQuery, MastClient, QueryOptions, Search};
///
/// let client = MastClient::new(ArchiveConfig::default()).unwrap();
/// let opts = QueryOptions::default().with_collections(["JWST"]);
///
/// let n = client.count_matches(&Search::Name("M31".into()), &opts).unwrap();
/// println!("{n} JWST observations near M31");
/// ```
pub trait ArchiveQuery {
    /// Number of observation records matching `search` and the collection
    /// filter.
    fn count_matches(&self, search: &Search, options: &QueryOptions) -> Result<u64>;

    /// The matching observation records, in archive order.
    fn fetch_matches(
        &self,
        search: &Search,
        options: &QueryOptions,
    ) -> Result<Vec<ObservationRecord>>;
}

impl<T: ArchiveQuery + ?Sized> ArchiveQuery for &T {
    fn count_matches(&self, search: &Search, options: &QueryOptions) -> Result<u64> {
        (**self).count_matches(search, options)
    }

    fn fetch_matches(
        &self,
        search: &Search,
        options: &QueryOptions,
    ) -> Result<Vec<ObservationRecord>> {
        (**self).fetch_matches(search, options)
    }
}
