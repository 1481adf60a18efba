// crates/mastdup-core/src/error.rs
use thiserror::Error;

/// Everything that can go wrong while loading targets, talking to the
/// archive or reading and writing result tables.
///
/// Input-validation variants (`UnsupportedFormat`, `UnsupportedMode`,
/// `MissingColumn`, `InvalidAngle`, `InvalidTemplate`) are fatal: nothing in
/// this crate retries them.
#[derive(Debug, Error)]
pub enum MastError {
    #[error("{0} is not a supported file format")]
    UnsupportedFormat(String),

    #[error("unsupported load mode `{0}` (expected `name` or `coord`)")]
    UnsupportedMode(String),

    #[error("column `{column}` not found in header (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("invalid angle `{0}`")]
    InvalidAngle(String),

    #[error("invalid status URL template `{0}`: missing {{proposal_id}} placeholder")]
    InvalidTemplate(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, MastError>;
