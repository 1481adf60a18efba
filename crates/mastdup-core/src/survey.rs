// crates/mastdup-core/src/survey.rs

//! # Duplicate Check Workflow
//!
//! Count first, fetch second: every target gets one cheap count query, and
//! full observation records are only pulled for targets that have any.
//! Targets are processed sequentially, in the order given.

use crate::common::CheckSummary;
use crate::error::Result;
use crate::model::{ObservationRecord, RawCoord, TargetList};
use crate::text::fold_key;
use crate::traits::{ArchiveQuery, QueryOptions, Search};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// A target ready to be queried, with the identifier it is reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInput {
    pub id: String,
    pub search: Search,
}

impl TargetInput {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            search: Search::Name(name),
        }
    }

    /// Coordinates are converted here; an unparsable pair is an error.
    pub fn from_coord(coord: &RawCoord) -> Result<Self> {
        Ok(Self {
            id: coord.identifier(),
            search: Search::Position(coord.to_sky()?),
        })
    }

    /// One input per loaded row, in file order.
    pub fn from_list(list: &TargetList) -> Result<Vec<Self>> {
        match list {
            TargetList::Names(names) => Ok(names.iter().map(Self::named).collect()),
            TargetList::Coords(coords) => coords.iter().map(Self::from_coord).collect(),
        }
    }
}

/// Target identifier → number of matching archive records, in insertion
/// order. A key appears at most once.
///
/// Backed by a `Vec`: `insert` and `get` scan linearly, which suits
/// proposal-sized target lists (tens to a few hundred entries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCountMap {
    entries: Vec<(String, u64)>,
}

impl TargetCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, target: impl Into<String>, count: u64) {
        let target = target.into();
        match self.entries.iter_mut().find(|(k, _)| *k == target) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((target, count)),
        }
    }

    pub fn get(&self, target: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == target)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Entries with at least one match.
    pub fn positive(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.iter().filter(|(_, c)| *c > 0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for TargetCountMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, c) in iter {
            map.insert(k, c);
        }
        map
    }
}

/// Records fetched for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMatches {
    pub target: String,
    pub records: Vec<ObservationRecord>,
}

/// Collapse targets whose identifiers fold to the same key. The first
/// spelling and position win.
pub fn merge_duplicates(targets: &[TargetInput]) -> Vec<&TargetInput> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut out = Vec::with_capacity(targets.len());
    for t in targets {
        let key = fold_key(&t.id);
        match seen.get(&key) {
            Some(first) => warn!(target_id = %t.id, kept = %first, "duplicate target merged"),
            None => {
                seen.insert(key, &t.id);
                out.push(t);
            }
        }
    }
    out
}

/// One count query per distinct target, in input order.
///
/// The first failing query aborts the run and its error is returned.
pub fn count_targets<A: ArchiveQuery>(
    archive: &A,
    targets: &[TargetInput],
    options: &QueryOptions,
) -> Result<TargetCountMap> {
    let mut counts = TargetCountMap::new();
    for t in merge_duplicates(targets) {
        let n = archive.count_matches(&t.search, options)?;
        info!(target_id = %t.id, count = n, "counted archive matches");
        counts.insert(t.id.clone(), n);
    }
    Ok(counts)
}

/// Fetch full records for the targets of `counts` with a positive count.
///
/// `targets` supplies the search for each identifier; identifiers in
/// `counts` that are not among `targets` are skipped with a warning.
pub fn fetch_positive<A: ArchiveQuery>(
    archive: &A,
    targets: &[TargetInput],
    counts: &TargetCountMap,
    options: &QueryOptions,
) -> Result<Vec<TargetMatches>> {
    let mut by_id: HashMap<&str, &TargetInput> = HashMap::with_capacity(targets.len());
    for t in targets {
        by_id.entry(t.id.as_str()).or_insert(t);
    }

    let mut out = Vec::new();
    for (id, _) in counts.positive() {
        let Some(t) = by_id.get(id) else {
            warn!(target_id = %id, "no search for counted target; skipped");
            continue;
        };
        let records = archive.fetch_matches(&t.search, options)?;
        info!(target_id = %id, rows = records.len(), "fetched archive matches");
        out.push(TargetMatches {
            target: id.to_string(),
            records,
        });
    }
    Ok(out)
}

/// Outcome of [`check_targets`].
#[derive(Debug, Clone)]
pub struct DuplicateCheck {
    pub counts: TargetCountMap,
    pub matches: Vec<TargetMatches>,
}

impl DuplicateCheck {
    pub fn summary(&self) -> CheckSummary {
        CheckSummary {
            targets: self.counts.len(),
            targets_with_matches: self.counts.positive().count(),
            total_matches: self.counts.total(),
            planned: self
                .matches
                .iter()
                .flat_map(|m| &m.records)
                .filter(|r| r.is_planned())
                .count(),
        }
    }

    /// All fetched records, target by target.
    pub fn records(&self) -> impl Iterator<Item = &ObservationRecord> + '_ {
        self.matches.iter().flat_map(|m| m.records.iter())
    }
}

/// Count every target, then fetch the ones with matches.
pub fn check_targets<A: ArchiveQuery>(
    archive: &A,
    targets: &[TargetInput],
    options: &QueryOptions,
) -> Result<DuplicateCheck> {
    let counts = count_targets(archive, targets, options)?;
    let matches = fetch_positive(archive, targets, &counts, options)?;
    Ok(DuplicateCheck { counts, matches })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MastError;
    use std::cell::RefCell;

    /// Answers from a fixed table and records every call.
    struct FakeArchive {
        counts: Vec<(&'static str, u64)>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeArchive {
        fn new(counts: Vec<(&'static str, u64)>) -> Self {
            Self {
                counts,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn lookup(&self, search: &Search) -> Result<u64> {
            let Search::Name(name) = search else {
                return Ok(0);
            };
            self.counts
                .iter()
                .find(|(k, _)| *k == name.as_str())
                .map(|(_, c)| *c)
                .ok_or_else(|| MastError::NotFound(name.clone()))
        }
    }

    impl ArchiveQuery for FakeArchive {
        fn count_matches(&self, search: &Search, _: &QueryOptions) -> Result<u64> {
            self.calls.borrow_mut().push(format!("count {search}"));
            self.lookup(search)
        }

        fn fetch_matches(&self, search: &Search, _: &QueryOptions) -> Result<Vec<ObservationRecord>> {
            self.calls.borrow_mut().push(format!("fetch {search}"));
            let n = self.lookup(search)?;
            let Search::Name(name) = search else {
                return Ok(Vec::new());
            };
            Ok((0..n)
                .map(|i| ObservationRecord {
                    target_name: Some(name.clone()),
                    calib_level: Some(if i == 0 { -1 } else { 3 }),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn named(ids: &[&str]) -> Vec<TargetInput> {
        ids.iter().map(|s| TargetInput::named(*s)).collect()
    }

    #[test]
    fn fetches_only_targets_with_matches() {
        let archive = FakeArchive::new(vec![("A", 0), ("B", 3)]);
        let check = check_targets(&archive, &named(&["A", "B"]), &QueryOptions::default()).unwrap();

        assert_eq!(check.counts.get("A"), Some(0));
        assert_eq!(check.counts.get("B"), Some(3));
        let fetched: Vec<_> = check.matches.iter().map(|m| m.target.as_str()).collect();
        assert_eq!(fetched, ["B"]);
        assert_eq!(check.matches[0].records.len(), 3);

        let calls = archive.calls.borrow();
        assert_eq!(
            *calls,
            ["count name `A`", "count name `B`", "fetch name `B`"]
        );
    }

    #[test]
    fn duplicates_are_queried_once_in_first_position() {
        let archive = FakeArchive::new(vec![("M31", 2), ("M33", 0)]);
        let targets = named(&["M31", "M33", "m31 "]);
        let counts = count_targets(&archive, &targets, &QueryOptions::default()).unwrap();

        let keys: Vec<_> = counts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["M31", "M33"]);
        assert_eq!(archive.calls.borrow().len(), 2);
    }

    #[test]
    fn fetch_uses_first_search_for_an_identifier() {
        let archive = FakeArchive::new(vec![("B", 2), ("other", 5)]);
        let targets = vec![
            TargetInput::named("B"),
            TargetInput {
                id: "B".into(),
                search: Search::Name("other".into()),
            },
        ];
        let counts: TargetCountMap = [("B", 2), ("unknown", 1)].into_iter().collect();
        let matches = fetch_positive(&archive, &targets, &counts, &QueryOptions::default()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].records.len(), 2);
        assert_eq!(*archive.calls.borrow(), ["fetch name `B`"]);
    }

    #[test]
    fn first_error_aborts() {
        let archive = FakeArchive::new(vec![("A", 1)]);
        let err = count_targets(&archive, &named(&["A", "missing", "A2"]), &QueryOptions::default())
            .unwrap_err();
        assert!(matches!(err, MastError::NotFound(n) if n == "missing"));
        assert_eq!(archive.calls.borrow().len(), 2);
    }

    #[test]
    fn summary_counts_planned_records() {
        let archive = FakeArchive::new(vec![("A", 0), ("B", 3), ("C", 1)]);
        let check = check_targets(&archive, &named(&["A", "B", "C"]), &QueryOptions::default())
            .unwrap();
        let s = check.summary();
        assert_eq!(s.targets, 3);
        assert_eq!(s.targets_with_matches, 2);
        assert_eq!(s.total_matches, 4);
        assert_eq!(s.planned, 2);
        assert_eq!(check.records().count(), 4);
    }

    #[test]
    fn count_map_insert_keeps_position() {
        let mut map: TargetCountMap = [("x", 1), ("y", 2)].into_iter().collect();
        map.insert("x", 5);
        assert_eq!(map.iter().collect::<Vec<_>>(), [("x", 5), ("y", 2)]);
        assert_eq!(map.total(), 7);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn coordinate_targets_use_raw_identifier() {
        let list = TargetList::Coords(vec![RawCoord::new("10.5", "-1.0")]);
        let inputs = TargetInput::from_list(&list).unwrap();
        assert_eq!(inputs[0].id, "10.5 -1.0");
        assert!(matches!(inputs[0].search, Search::Position(c) if c.ra == 10.5 && c.dec == -1.0));

        let bad = TargetList::Coords(vec![RawCoord::new("ten", "-1.0")]);
        assert!(TargetInput::from_list(&bad).is_err());
    }
}
