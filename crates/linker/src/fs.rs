//! Narrow filesystem seam for the reconciler.
//!
//! Every output-tree mutation goes through [`OutputFs`] so the
//! reconciliation logic stays testable without touching symlink syscalls
//! directly. [`RealFs`] is the production implementation.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub trait OutputFs {
    /// Whether `path` resolves to an existing filesystem object. Follows
    /// symlinks, so a broken link reports `false`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` itself is a symlink, broken or not.
    fn is_symlink(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn create_dir(&self, path: &Path) -> Result<()>;

    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory; fails if it is not empty.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    /// Direct children of `dir`, sorted for deterministic traversal.
    fn children(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// `std::fs`-backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl OutputFs for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path)?;
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(target, link)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path)?;
        Ok(())
    }

    fn children(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(dir)? {
            out.push(entry?.path());
        }
        out.sort();
        Ok(out)
    }
}
