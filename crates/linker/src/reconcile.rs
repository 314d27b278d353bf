//! Idempotent materialization and cleanup of the derived link forest.

use crate::fs::OutputFs;
use crate::stats::CycleStats;
use crate::{LinkerError, Result};
use log::info;
use serilink_cluster::Partition;
use std::path::{Path, PathBuf};

/// Extension of comskip/TvtPlay sidecar files carried alongside recordings.
const CHAPTER_EXTENSION: &str = "chapter";
const CHAPTERS_DIR: &str = "chapters";

/// Applies a clustering [`Partition`] to the output root and prunes
/// whatever the latest partition no longer justifies.
///
/// Every step is an idempotent create-or-skip / remove-if-invalid, so a
/// cycle interrupted at any point converges on the next run.
pub struct Reconciler<F: OutputFs> {
    fs: F,
    output_root: PathBuf,
    chapter_support: bool,
}

impl<F: OutputFs> Reconciler<F> {
    pub fn new(fs: F, output_root: PathBuf, chapter_support: bool) -> Self {
        Self {
            fs,
            output_root,
            chapter_support,
        }
    }

    /// Ensure a group directory per cluster, a link per member, and a
    /// top-level link per ungrouped entry. Existing links are left
    /// untouched, never re-validated or overwritten.
    pub fn materialize(&self, partition: &Partition, stats: &mut CycleStats) -> Result<()> {
        if !self.fs.is_dir(&self.output_root) {
            return Err(LinkerError::InvalidOutputRoot(
                self.output_root.display().to_string(),
            ));
        }

        for cluster in &partition.clusters {
            let dir = self.output_root.join(&cluster.name);
            self.ensure_dir(&dir, stats)?;
            for member in &cluster.members {
                self.ensure_link(&dir, &member.path, stats)?;
            }
        }

        for entry in &partition.ungrouped {
            let root = self.output_root.clone();
            self.ensure_link(&root, &entry.path, stats)?;
        }

        Ok(())
    }

    /// Prune stale derivations, in an order where each step can expose
    /// work for the next: broken links first (a directory only becomes
    /// empty once its dead links are gone), then empty directories
    /// deepest-first, then top-level links shadowed by a grouped copy.
    pub fn cleanup(&self, stats: &mut CycleStats) -> Result<()> {
        for path in self.walk()? {
            if self.fs.is_symlink(&path) && !self.fs.exists(&path) {
                self.fs.remove_file(&path)?;
                stats.links_removed += 1;
                info!("remove symlink: {}", path.display());
            }
        }

        // Deepest-first so an emptied subdirectory lets its parent go in
        // the same pass. Emptiness is checked live, after link removal.
        let directories: Vec<PathBuf> = self
            .walk()?
            .into_iter()
            .filter(|p| self.fs.is_dir(p) && !self.fs.is_symlink(p))
            .collect();
        for dir in directories.iter().rev() {
            if self.fs.children(dir)?.is_empty() {
                self.fs.remove_dir(dir)?;
                stats.dirs_removed += 1;
                info!("remove directory: {}", dir.display());
            }
        }

        let top = self.fs.children(&self.output_root)?;
        let group_dirs: Vec<&PathBuf> = top
            .iter()
            .filter(|p| self.fs.is_dir(p) && !self.fs.is_symlink(p))
            .collect();
        for path in &top {
            if !self.fs.is_symlink(path) {
                continue;
            }
            let Some(name) = path.file_name() else {
                continue;
            };
            if group_dirs.iter().any(|dir| self.fs.exists(&dir.join(name))) {
                self.fs.remove_file(path)?;
                stats.links_removed += 1;
                info!("remove symlink: {}", path.display());
            }
        }

        Ok(())
    }

    fn ensure_dir(&self, dir: &Path, stats: &mut CycleStats) -> Result<()> {
        if self.fs.exists(dir) {
            return Ok(());
        }
        self.fs.create_dir(dir)?;
        stats.dirs_created += 1;
        info!("create directory: {}", dir.display());
        Ok(())
    }

    fn ensure_link(&self, dir: &Path, source: &Path, stats: &mut CycleStats) -> Result<()> {
        let Some(file_name) = source.file_name() else {
            return Ok(());
        };
        let link = dir.join(file_name);
        if self.fs.is_symlink(&link) {
            return Ok(());
        }

        self.fs.symlink(source, &link)?;
        stats.links_created += 1;
        info!("create symlink: {}", link.display());

        if self.chapter_support {
            if let Some(chapter) = self.find_chapter(source) {
                self.link_chapter(dir, &link, &chapter, stats)?;
            }
        }
        Ok(())
    }

    fn link_chapter(
        &self,
        dir: &Path,
        main_link: &Path,
        chapter: &Path,
        stats: &mut CycleStats,
    ) -> Result<()> {
        let chapters_dir = dir.join(CHAPTERS_DIR);
        self.ensure_dir(&chapters_dir, stats)?;

        let sidecar_name = main_link.with_extension(CHAPTER_EXTENSION);
        let Some(name) = sidecar_name.file_name() else {
            return Ok(());
        };
        let chapter_link = chapters_dir.join(name);
        if self.fs.is_symlink(&chapter_link) {
            return Ok(());
        }

        self.fs.symlink(chapter, &chapter_link)?;
        stats.links_created += 1;
        info!("create symlink: {}", chapter_link.display());
        Ok(())
    }

    /// Sidecar lookup: `<stem>.chapter` beside the source, or the same
    /// name inside a sibling `chapters` directory.
    fn find_chapter(&self, source: &Path) -> Option<PathBuf> {
        let sidecar = source.with_extension(CHAPTER_EXTENSION);
        if self.fs.exists(&sidecar) {
            return Some(sidecar);
        }

        let chapters_dir = source.parent()?.join(CHAPTERS_DIR);
        if self.fs.exists(&chapters_dir) {
            let nested = chapters_dir.join(sidecar.file_name()?);
            if self.fs.exists(&nested) {
                return Some(nested);
            }
        }
        None
    }

    /// Every descendant of the output root, parents before children. The
    /// root itself is never a candidate for removal.
    fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        self.walk_into(&self.output_root, &mut out)?;
        Ok(out)
    }

    fn walk_into(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for child in self.fs.children(dir)? {
            let descend = self.fs.is_dir(&child) && !self.fs.is_symlink(&child);
            out.push(child.clone());
            if descend {
                self.walk_into(&child, out)?;
            }
        }
        Ok(())
    }
}
