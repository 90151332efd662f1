//! Removal of the generated block from a script file.

use std::path::Path;

use crate::backup::{BackupManager, BackupTag};
use crate::error::{Error, Result};
use crate::marker::{BEGIN_MARKER, END_MARKER};

/// Outcome of a removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// A block was found and removed.
    Removed,
    /// No block was present; the file was left untouched.
    AlreadyClean,
}

/// Removes the sentinel-delimited block from the file at `path`,
/// preserving every line the user authored.
///
/// A `Modified`-tagged backup is written first, regardless of outcome.
/// Structural errors (END without BEGIN, BEGIN without END) abort before
/// any write, leaving the original file untouched. On success the new
/// content replaces the file atomically.
///
/// `preserve_blank_lines` controls whether blank lines inside the removed
/// region survive; the localization file wants them kept, the mod script
/// does not.
pub fn remove_block(
    path: &Path,
    preserve_blank_lines: bool,
    backups: &BackupManager,
) -> Result<RemoveOutcome> {
    if let Err(e) = backups.backup(path, BackupTag::Modified) {
        tracing::warn!(path = %path.display(), error = %e, "backup before removal failed");
    }

    let content = muc_fs::read_text(path)?;
    match strip_block(&content, preserve_blank_lines, path)? {
        Some(stripped) => {
            muc_fs::write_atomic(path, &stripped)?;
            tracing::debug!(path = %path.display(), "removed generated block");
            Ok(RemoveOutcome::Removed)
        }
        None => Ok(RemoveOutcome::AlreadyClean),
    }
}

/// Pure removal pass over content. Returns `None` when no block was
/// present (already-clean is success, not an error).
fn strip_block(content: &str, preserve_blank_lines: bool, path: &Path) -> Result<Option<String>> {
    let mut output = String::with_capacity(content.len());
    let mut inside_block = false;
    let mut found_block = false;

    for line in content.split_inclusive('\n') {
        let begins = line.find(BEGIN_MARKER);
        let ends = line.contains(END_MARKER);

        if let Some(marker_start) = begins {
            inside_block = true;
            found_block = true;
            // Content sharing the marker's line is assumed to be the
            // user's; keep it on its own line.
            let prefix = &line[..marker_start];
            if !prefix.trim().is_empty() {
                output.push_str(prefix);
                output.push('\n');
            }
        }

        if ends && !inside_block {
            return Err(Error::EndWithoutBegin {
                path: path.to_path_buf(),
            });
        }

        if !inside_block {
            output.push_str(line);
        } else if preserve_blank_lines && begins.is_none() && !ends && line.trim().is_empty() {
            output.push_str(line);
        }

        if ends {
            inside_block = false;
        }
    }

    if inside_block {
        return Err(Error::BeginWithoutEnd {
            path: path.to_path_buf(),
        });
    }
    if !found_block {
        return Ok(None);
    }
    Ok(Some(output))
}
