//! Pre-mutation file backups.

use std::path::{Path, PathBuf};

/// Distinguishes the snapshot taken before any change from the one taken
/// just before an existing block is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTag {
    /// The file as it was before this tool touched it.
    Unmodified,
    /// The file as it was just before a removal pass.
    Modified,
}

/// Copies target files into a backup directory before mutation.
///
/// Backups exist for human recovery only: they are never read back by the
/// program, and callers treat backup failures as non-fatal. The caller
/// guarantees the backup directory exists.
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Destination path for a backup of `path` under the given tag:
    /// `<basename>.lua` or `<basename>_MODIFIED.lua`.
    pub fn backup_path(&self, path: &Path, tag: BackupTag) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = name.strip_suffix(".lua").unwrap_or(&name);
        let suffix = match tag {
            BackupTag::Unmodified => "",
            BackupTag::Modified => "_MODIFIED",
        };
        self.backup_dir.join(format!("{stem}{suffix}.lua"))
    }

    /// Copy `path` into the backup directory, overwriting any prior backup
    /// under the same name.
    pub fn backup(&self, path: &Path, tag: BackupTag) -> muc_fs::Result<PathBuf> {
        let destination = self.backup_path(path, tag);
        muc_fs::copy_file(path, &destination)?;
        tracing::debug!(source = %path.display(), backup = %destination.display(), "backed up file");
        Ok(destination)
    }
}
