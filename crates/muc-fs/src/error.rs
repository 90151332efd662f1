//! Error types for muc-fs

use std::path::PathBuf;

/// Result type for muc-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in muc-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File path too long: {path}")]
    PathTooLong { path: PathBuf },

    #[error("Part of path not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Do not have permission to write to {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Classify a raw I/O error against the path it occurred on.
    ///
    /// `NotFound` is split into missing-file and missing-directory by
    /// checking whether the parent directory exists.
    pub fn classify(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let path = path.into();
        match source.kind() {
            ErrorKind::InvalidFilename => Self::PathTooLong { path },
            ErrorKind::NotFound => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                    Self::DirectoryNotFound { path }
                }
                _ => Self::FileNotFound { path },
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}
