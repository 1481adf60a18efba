use serde::{Deserialize, Serialize};

/// Aggregate numbers for one duplicate-check run.
///
/// Returned by [`DuplicateCheck::summary`](crate::survey::DuplicateCheck::summary).
/// `total_matches` comes from the count queries; `planned` only covers the
/// records that were actually fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub targets: usize,
    pub targets_with_matches: usize,
    pub total_matches: u64,
    pub planned: usize,
}
