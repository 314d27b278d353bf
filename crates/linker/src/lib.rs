//! # Serilink Linker
//!
//! Scans watched roots for recordings, clusters them by name, and keeps a
//! derived symlink forest under an output root in sync.
//!
//! ## Cycle
//!
//! ```text
//! Watched roots
//!     │
//!     ├──> Scanner (recursive, extension match)
//!     │      └─> Source paths
//!     │
//!     ├──> serilink-cluster (normalize, greedy pass)
//!     │      └─> Partition
//!     │
//!     └──> Reconciler
//!          ├─> Materialize group dirs + links (idempotent)
//!          └─> Cleanup broken links, empty dirs, shadowed top-level links
//! ```
//!
//! The output tree is a derived view: re-running a cycle against unchanged
//! sources converges to the same tree, so a process killed mid-cycle heals
//! on the next tick.

mod error;
mod fs;
mod reconcile;
mod scan;
mod scheduler;
mod stats;

pub use error::{LinkerError, Result};
pub use fs::{OutputFs, RealFs};
pub use reconcile::Reconciler;
pub use scan::SourceScanner;
pub use scheduler::Pipeline;
pub use stats::CycleStats;
