//! Greedy clustering pass.
//!
//! A pure function from `(entries, thresholds, rules)` to a [`Partition`];
//! the anchor order (lexicographic on normalized name) and the
//! shortest-common-substring choice are deliberate, documented policies,
//! not iteration accidents.

use crate::normalize::NormalizeRules;
use crate::similarity::{common_substring, distance_ratio};
use log::{debug, info};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A source file paired with its normalized comparable name.
///
/// Ephemeral: rebuilt from the live filesystem every cycle. `name` is a
/// pure function of the path's stem, so `(path, name)` is unique whenever
/// `path` is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
}

impl Entry {
    pub fn from_path(path: PathBuf, rules: &NormalizeRules) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = rules.normalize(&stem);
        Self { path, name }
    }
}

// Anchor order: name ascending, path as the final tie-break so the pass
// is deterministic for equal names.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A realized named group of entries sharing a common substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    pub members: Vec<Entry>,
}

/// Numeric gates for the clustering pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Thresholds {
    /// Maximum edit-distance ratio for two names to count as similar.
    pub ld_threshold: f64,
    /// Minimum number of similar entries required to realize a group.
    pub match_threshold: usize,
    /// Minimum char length of a derived group name after affix stripping.
    pub sequence_threshold: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ld_threshold: 0.5,
            match_threshold: 4,
            sequence_threshold: 4,
        }
    }
}

/// Result of one clustering pass: realized clusters plus every entry that
/// never joined one (destined for top-level linking).
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub clusters: Vec<Cluster>,
    pub ungrouped: Vec<Entry>,
}

/// Partition `entries` into named clusters and ungrouped leftovers.
///
/// Single greedy pass in sorted order. Each unconsumed entry with a
/// non-empty name anchors a candidate set (every entry within
/// `ld_threshold`, itself included at distance zero). The set is realized
/// as a cluster when it reaches `match_threshold` members and the
/// shortest common substring survives affix stripping at
/// `sequence_threshold` chars; realized members are consumed and can no
/// longer anchor, but remain eligible as candidates of later anchors.
pub fn cluster_entries(
    entries: Vec<Entry>,
    thresholds: &Thresholds,
    rules: &NormalizeRules,
) -> Partition {
    // BTreeSet drops exact duplicates and fixes the anchor order in one go.
    let sorted: Vec<Entry> = entries.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    let mut consumed = vec![false; sorted.len()];
    let mut clusters = Vec::new();

    for anchor_idx in 0..sorted.len() {
        if consumed[anchor_idx] || sorted[anchor_idx].name.is_empty() {
            continue;
        }
        let anchor = &sorted[anchor_idx];
        debug!("anchor {:?} ({})", anchor.name, anchor.path.display());

        let candidates: Vec<usize> = sorted
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.name.is_empty())
            .filter_map(|(idx, e)| {
                let ratio = distance_ratio(&anchor.name, &e.name);
                debug!("  distance {:.3} to {:?}", ratio, e.name);
                (ratio < thresholds.ld_threshold).then_some(idx)
            })
            .collect();

        if candidates.len() < thresholds.match_threshold {
            debug!(
                "  {} candidate(s) below quorum of {}",
                candidates.len(),
                thresholds.match_threshold
            );
            continue;
        }

        // The shortest shared substring is the conservative group name: it
        // cannot be dominated by one overly close pair.
        let shortest = candidates
            .iter()
            .map(|&idx| common_substring(&anchor.name, &sorted[idx].name))
            .min_by_key(|s| s.chars().count())
            .unwrap_or_default();
        let name = rules.strip_affixes(&shortest);

        if name.chars().count() < thresholds.sequence_threshold {
            debug!("  derived name {name:?} below sequence threshold");
            continue;
        }

        info!("cluster {:?}: {} member(s)", name, candidates.len());
        let members = candidates.iter().map(|&idx| sorted[idx].clone()).collect();
        for &idx in &candidates {
            consumed[idx] = true;
        }
        clusters.push(Cluster { name, members });
    }

    let ungrouped = sorted
        .into_iter()
        .zip(consumed)
        .filter_map(|(entry, taken)| (!taken).then_some(entry))
        .collect();

    Partition {
        clusters,
        ungrouped,
    }
}

/// Convenience for building the entry set from scanned paths.
pub fn entries_from_paths<I, P>(paths: I, rules: &NormalizeRules) -> Vec<Entry>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| Entry::from_path(p.as_ref().to_path_buf(), rules))
        .collect()
}
