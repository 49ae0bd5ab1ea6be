//! Post-run sweep of zero-byte files.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Files removed by one sweep.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<Utf8PathBuf>,
}

/// Recursively delete zero-byte regular files under `root`.
///
/// Matches `find . -type f -size 0 -delete`: unconditional, and not
/// limited to files this run produced. Per-entry failures are logged and
/// skipped; only an unreadable root is an error.
pub fn sweep_empty_files(root: &Utf8Path) -> Result<CleanupReport, CleanupError> {
    let mut report = CleanupReport::default();
    let entries = root.read_dir_utf8().map_err(|source| CleanupError::ReadDir {
        path: root.to_owned(),
        source,
    })?;

    for entry in entries {
        match entry {
            Ok(entry) => sweep_entry(entry.path(), &mut report),
            Err(e) => warn!(dir = %root, "skipping unreadable entry: {e}"),
        }
    }

    Ok(report)
}

fn sweep_entry(path: &Utf8Path, report: &mut CleanupReport) {
    // symlink_metadata so symlinked files are never followed or deleted
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) => {
            warn!(%path, "skipping entry without metadata: {e}");
            return;
        }
    };

    if meta.is_dir() {
        let entries = match path.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %path, "skipping unreadable directory: {e}");
                return;
            }
        };
        for entry in entries {
            match entry {
                Ok(entry) => sweep_entry(entry.path(), report),
                Err(e) => warn!(dir = %path, "skipping unreadable entry: {e}"),
            }
        }
    } else if meta.is_file() && meta.len() == 0 {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(%path, "removed empty file");
                report.removed.push(path.to_path_buf());
            }
            Err(e) => warn!(%path, "failed to remove empty file: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8(temp: &TempDir) -> &Utf8Path {
        Utf8Path::from_path(temp.path()).unwrap()
    }

    #[test]
    fn test_removes_only_empty_files() {
        let temp = TempDir::new().unwrap();
        let dir = utf8(&temp);
        fs::write(dir.join("name.log"), "converged\n").unwrap();
        fs::write(dir.join("stale.tmp"), "").unwrap();

        let report = sweep_empty_files(dir).unwrap();
        assert_eq!(report.removed, vec![dir.join("stale.tmp")]);
        assert!(dir.join("name.log").exists());
        assert!(!dir.join("stale.tmp").exists());
    }

    #[test]
    fn test_sweeps_recursively() {
        let temp = TempDir::new().unwrap();
        let dir = utf8(&temp);
        fs::create_dir_all(dir.join("a/b")).unwrap();
        fs::write(dir.join("a/b/empty.gbw"), "").unwrap();
        fs::write(dir.join("a/keep.xyz"), "3\n").unwrap();

        let report = sweep_empty_files(dir).unwrap();
        assert_eq!(report.removed, vec![dir.join("a/b/empty.gbw")]);
        assert!(dir.join("a/keep.xyz").exists());
        // Directories are left alone even when emptied
        assert!(dir.join("a/b").is_dir());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = utf8(&temp).join("nope");
        assert!(matches!(
            sweep_empty_files(&dir),
            Err(CleanupError::ReadDir { .. })
        ));
    }

    #[test]
    fn test_empty_tree_reports_nothing() {
        let temp = TempDir::new().unwrap();
        let report = sweep_empty_files(utf8(&temp)).unwrap();
        assert!(report.removed.is_empty());
    }
}
