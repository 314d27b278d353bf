use serde::Serialize;

/// Counts for one scan/link/cleanup cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    /// Source files found under the watched roots
    pub sources: usize,

    /// Clusters realized by the greedy pass
    pub clusters: usize,

    /// Symlinks created (main and chapter links)
    pub links_created: usize,

    /// Group/chapter directories created
    pub dirs_created: usize,

    /// Broken or shadowed symlinks removed
    pub links_removed: usize,

    /// Empty directories removed
    pub dirs_removed: usize,
}

impl CycleStats {
    /// True when the cycle neither created nor removed anything, i.e. the
    /// output tree was already at its fixed point.
    pub fn is_converged(&self) -> bool {
        self.links_created == 0
            && self.dirs_created == 0
            && self.links_removed == 0
            && self.dirs_removed == 0
    }
}
