//! # Serilink Cluster
//!
//! Filename clustering for recorded-media organization.
//!
//! ## Pipeline
//!
//! ```text
//! Raw filename stems
//!     │
//!     ├──> Normalizer (NFKC, bracket/affix stripping)
//!     │      └─> Comparable names
//!     │
//!     ├──> Similarity Engine (edit-distance ratio, common substrings)
//!     │
//!     └──> Greedy clustering pass
//!            └─> Named clusters + ungrouped leftovers
//! ```
//!
//! The crate is pure: no filesystem access, no clocks. Callers feed it
//! entries built from scanned paths and get back a [`Partition`] that the
//! link reconciler materializes on disk.

mod engine;
mod normalize;
mod similarity;

pub use engine::{cluster_entries, entries_from_paths, Cluster, Entry, Partition, Thresholds};
pub use normalize::{
    NormalizeRules, DEFAULT_BRACKETS_PATTERN, DEFAULT_PREFIXES_PATTERN, DEFAULT_SUFFIXES_PATTERN,
};
pub use similarity::{common_substring, distance_ratio};
