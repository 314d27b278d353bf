use crate::{LinkerError, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive scanner for candidate source files under the watched roots.
///
/// Regular files only; symlinks among the sources are ignored so the
/// output tree never links to links. Extension matching is exact and
/// case-sensitive.
pub struct SourceScanner {
    roots: Vec<PathBuf>,
    extension: String,
}

impl SourceScanner {
    pub fn new(roots: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            roots,
            extension: extension.into(),
        }
    }

    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for root in &self.roots {
            if !root.is_dir() {
                return Err(LinkerError::InvalidRoot(root.display().to_string()));
            }

            for result in WalkDir::new(root) {
                match result {
                    Ok(entry) => {
                        if !entry.file_type().is_file() {
                            continue;
                        }
                        if !self.matches_extension(entry.path()) {
                            continue;
                        }
                        files.push(entry.into_path());
                    }
                    Err(e) => warn!("failed to read entry: {e}"),
                }
            }
        }

        info!("found {} source file(s)", files.len());
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::SourceScanner;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_matching_files_recursively() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("rec").join("2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("a.m2ts"), b"").unwrap();
        fs::write(temp.path().join("b.m2ts"), b"").unwrap();
        fs::write(temp.path().join("note.txt"), b"").unwrap();

        let scanner = SourceScanner::new(vec![temp.path().to_path_buf()], "m2ts");
        let mut files = scanner.scan().unwrap();
        files.sort();

        assert_eq!(files, vec![nested.join("a.m2ts"), temp.path().join("b.m2ts")]);
    }

    #[test]
    fn ignores_symlinked_sources() {
        let temp = tempdir().unwrap();
        let real = temp.path().join("real.m2ts");
        fs::write(&real, b"").unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("alias.m2ts")).unwrap();

        let scanner = SourceScanner::new(vec![temp.path().to_path_buf()], "m2ts");
        let files = scanner.scan().unwrap();

        assert_eq!(files, vec![real]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempdir().unwrap();
        let gone = temp.path().join("missing");

        let scanner = SourceScanner::new(vec![gone], "m2ts");
        assert!(scanner.scan().is_err());
    }

    #[test]
    fn scans_every_root() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("a.m2ts"), b"").unwrap();
        fs::write(second.path().join("b.m2ts"), b"").unwrap();

        let scanner = SourceScanner::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            "m2ts",
        );
        assert_eq!(scanner.scan().unwrap().len(), 2);
    }
}
