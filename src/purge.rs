//! Bulk archive deletion.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ArchiveDirs;
use crate::error::{Result, StashError};

/// Counts from a purge run.
#[derive(Debug, Clone, Default)]
pub struct PurgeStats {
    pub raw_deleted: usize,
    pub cleaned_deleted: usize,
    pub attachments_deleted: usize,
    pub bytes_freed: u64,
}

/// Delete the archive's contents and report what went.
///
/// Only files this tool writes are touched: `.eml` in the raw
/// directory, `.txt` in the cleaned directory, and everything in the
/// attachments directory. Stray files and subdirectories survive, and
/// a missing directory just counts as empty. With `dry_run` nothing is
/// removed but the counts still say what would be.
pub fn purge_archive(dirs: &ArchiveDirs, dry_run: bool) -> Result<PurgeStats> {
    let mut bytes_freed = 0u64;
    let raw_deleted = purge_dir(&dirs.raw_dir, Some("eml"), dry_run, &mut bytes_freed)?;
    let cleaned_deleted = purge_dir(&dirs.clean_dir, Some("txt"), dry_run, &mut bytes_freed)?;
    let attachments_deleted = purge_dir(&dirs.attachments_dir, None, dry_run, &mut bytes_freed)?;

    let stats = PurgeStats {
        raw_deleted,
        cleaned_deleted,
        attachments_deleted,
        bytes_freed,
    };
    info!(
        raw = stats.raw_deleted,
        cleaned = stats.cleaned_deleted,
        attachments = stats.attachments_deleted,
        bytes = stats.bytes_freed,
        dry_run,
        "Purged archive"
    );
    Ok(stats)
}

/// Delete matching files directly inside `dir`, returning how many.
fn purge_dir(
    dir: &Path,
    extension: Option<&str>,
    dry_run: bool,
    bytes_freed: &mut u64,
) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(dir).map_err(|e| StashError::io(dir, e))? {
        let entry = entry.map_err(|e| StashError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }
        *bytes_freed += entry.metadata().map(|m| m.len()).unwrap_or(0);
        if dry_run {
            debug!(path = %path.display(), "Would delete file");
        } else {
            fs::remove_file(&path).map_err(|e| StashError::io(&path, e))?;
            debug!(path = %path.display(), "Deleted file");
        }
        deleted += 1;
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn archive_in(root: &Path) -> ArchiveDirs {
        ArchiveDirs {
            raw_dir: root.join("raw_emails"),
            clean_dir: root.join("cleaned_emails"),
            attachments_dir: root.join("attachments"),
        }
    }

    fn populate(dirs: &ArchiveDirs) {
        fs::create_dir_all(&dirs.raw_dir).unwrap();
        fs::create_dir_all(&dirs.clean_dir).unwrap();
        fs::create_dir_all(&dirs.attachments_dir).unwrap();
        fs::write(dirs.raw_dir.join("email_1.eml"), "raw one").unwrap();
        fs::write(dirs.raw_dir.join("email_2.eml"), "raw two").unwrap();
        fs::write(dirs.clean_dir.join("2024-01-01__hi.txt"), "doc").unwrap();
        fs::write(dirs.attachments_dir.join("pic.png"), [0u8; 16]).unwrap();
    }

    #[test]
    fn test_purge_counts_and_removes() {
        let root = tempfile::tempdir().unwrap();
        let dirs = archive_in(root.path());
        populate(&dirs);

        let stats = purge_archive(&dirs, false).unwrap();
        assert_eq!(stats.raw_deleted, 2);
        assert_eq!(stats.cleaned_deleted, 1);
        assert_eq!(stats.attachments_deleted, 1);
        assert_eq!(stats.bytes_freed, 7 + 7 + 3 + 16);
        assert_eq!(fs::read_dir(&dirs.raw_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_stray_files_survive() {
        let root = tempfile::tempdir().unwrap();
        let dirs = archive_in(root.path());
        populate(&dirs);
        fs::write(dirs.raw_dir.join("notes.md"), "keep me").unwrap();
        fs::write(dirs.clean_dir.join("backup.tar"), "keep me too").unwrap();

        let stats = purge_archive(&dirs, false).unwrap();
        assert_eq!(stats.raw_deleted, 2);
        assert_eq!(stats.cleaned_deleted, 1);
        assert!(dirs.raw_dir.join("notes.md").exists());
        assert!(dirs.clean_dir.join("backup.tar").exists());
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let dirs = archive_in(root.path());
        populate(&dirs);

        let stats = purge_archive(&dirs, true).unwrap();
        assert_eq!(stats.raw_deleted, 2);
        assert_eq!(stats.bytes_freed, 7 + 7 + 3 + 16);
        assert!(dirs.raw_dir.join("email_1.eml").exists());
        assert!(dirs.attachments_dir.join("pic.png").exists());
    }

    #[test]
    fn test_missing_dirs_count_zero() {
        let dirs = ArchiveDirs {
            raw_dir: PathBuf::from("/nonexistent/raw"),
            clean_dir: PathBuf::from("/nonexistent/clean"),
            attachments_dir: PathBuf::from("/nonexistent/attachments"),
        };
        let stats = purge_archive(&dirs, false).unwrap();
        assert_eq!(stats.raw_deleted, 0);
        assert_eq!(stats.cleaned_deleted, 0);
        assert_eq!(stats.attachments_deleted, 0);
        assert_eq!(stats.bytes_freed, 0);
    }

    #[test]
    fn test_subdirectories_survive() {
        let root = tempfile::tempdir().unwrap();
        let dirs = archive_in(root.path());
        populate(&dirs);
        fs::create_dir(dirs.attachments_dir.join("nested")).unwrap();
        fs::write(dirs.attachments_dir.join("nested").join("deep.bin"), "x").unwrap();

        let stats = purge_archive(&dirs, false).unwrap();
        assert_eq!(stats.attachments_deleted, 1);
        assert!(dirs.attachments_dir.join("nested").join("deep.bin").exists());
    }
}
