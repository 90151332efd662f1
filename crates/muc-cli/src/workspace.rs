//! Vermintide Mod Builder workspace discovery.

use std::path::{Path, PathBuf};

/// Marker file identifying the Vermintide Mod Builder root.
const VMB_MARKER: &str = ".vmbrc";

/// Backup directory created under the VMB root.
const BACKUP_DIR_NAME: &str = "MUC_Backup";

/// Walks up from `start` to the first directory containing `.vmbrc`.
pub fn find_vmb_root(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        if current.join(VMB_MARKER).is_file() {
            return Some(current.to_path_buf());
        }
        dir = current.parent();
    }
    None
}

/// Ensures the backup directory exists under the VMB root and returns it.
pub fn backup_dir(vmb_root: &Path) -> std::io::Result<PathBuf> {
    let dir = vmb_root.join(BACKUP_DIR_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
