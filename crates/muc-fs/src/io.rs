//! Classified file I/O with atomic replacement

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::{Error, Result};

/// Read the full text content of a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::classify(path, e))
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so a failure mid-write never leaves a
/// truncated file behind. The temp file lives in the same directory to
/// guarantee the rename stays on one filesystem.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::classify(&temp_path, e))?;

    if let Err(e) = temp_file
        .write_all(content.as_bytes())
        .and_then(|()| temp_file.sync_all())
    {
        drop(temp_file);
        let _ = fs::remove_file(&temp_path);
        return Err(Error::classify(&temp_path, e));
    }

    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::classify(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Append text to an existing file.
pub fn append_text(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| Error::classify(path, e))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::classify(path, e))
}

/// Copy a file, overwriting the destination if it already exists.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map(drop).map_err(|e| {
        // Blame whichever end of the copy is actually broken.
        if !source.exists() {
            Error::classify(source, e)
        } else {
            Error::classify(destination, e)
        }
    })
}
