//! Error types for muc-engine

use std::path::PathBuf;

/// Result type for muc-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error classes callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation refused to start, or aborted before mutating anything
    /// beyond already-written backups.
    Precondition,
    /// Sentinel marker pairing in an existing file is broken.
    Structural,
    /// A filesystem operation failed.
    Io,
    /// A file was modified and could not be reverted automatically.
    ManualActionRequired,
}

/// Errors that can occur in muc-engine operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or both target files already carry a generated block and force
    /// was not requested.
    #[error(
        "generated update-checker code already present in {}; remove it manually or re-run with --force",
        format_paths(.files)
    )]
    AlreadyInjected { files: Vec<PathBuf> },

    #[error("could not find a `local <name> = get_mod(\"{mod_name}\")` declaration in the mod script")]
    ModVariableNotFound { mod_name: String },

    #[error("found `return {name}` but no matching `{name} = {{` table definition")]
    TableNotFound { name: String },

    #[error("could not determine how the localization table is returned")]
    ReturnConventionNotFound,

    #[error("could not find the end of the localization table")]
    LiteralUnterminated,

    #[error("found END marker without a BEGIN marker in {path}")]
    EndWithoutBegin { path: PathBuf },

    #[error("found BEGIN marker without an END marker in {path}")]
    BeginWithoutEnd { path: PathBuf },

    /// Forced pre-clean of an existing block failed; nothing was injected.
    #[error("failed to clean up existing generated code: {source}")]
    CleanupFailed {
        #[source]
        source: Box<Error>,
    },

    /// Any failure while mutating the secondary file, wrapped so the
    /// report names the file.
    #[error("failed to update {path}: {source}")]
    SecondaryUpdate {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// The secondary file failed after the primary was already appended,
    /// and reverting the primary failed as well.
    #[error(
        "{source}; WARNING: {primary} was modified and the changes could not be reverted ({rollback}), manual action required"
    )]
    RollbackFailed {
        primary: PathBuf,
        #[source]
        source: Box<Error>,
        rollback: Box<Error>,
    },

    /// Aggregated restore failures, one per file.
    #[error("failed to remove generated code: {}", format_failures(.failures))]
    Cleanup {
        failures: Vec<(PathBuf, Box<Error>)>,
    },

    #[error(transparent)]
    Fs(#[from] muc_fs::Error),
}

impl Error {
    /// The broad class this error belongs to. Wrappers take the kind of
    /// their underlying cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyInjected { .. }
            | Self::ModVariableNotFound { .. }
            | Self::TableNotFound { .. }
            | Self::ReturnConventionNotFound
            | Self::LiteralUnterminated => ErrorKind::Precondition,
            Self::EndWithoutBegin { .. } | Self::BeginWithoutEnd { .. } => ErrorKind::Structural,
            Self::Fs(_) => ErrorKind::Io,
            Self::RollbackFailed { .. } => ErrorKind::ManualActionRequired,
            Self::CleanupFailed { source } | Self::SecondaryUpdate { source, .. } => source.kind(),
            Self::Cleanup { failures } => failures
                .first()
                .map(|(_, e)| e.kind())
                .unwrap_or(ErrorKind::Io),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_failures(failures: &[(PathBuf, Box<Error>)]) -> String {
    failures
        .iter()
        .map(|(path, e)| format!("{}: {}", path.display(), e))
        .collect::<Vec<_>>()
        .join("; ")
}
