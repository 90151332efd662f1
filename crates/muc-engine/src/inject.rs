//! Transactional injection and restore across the two mod scripts.
//!
//! The mutation order is fixed: mod script first, localization script
//! second. The compensating rollback only ever reverts the mod script,
//! because a localization failure is the only point where one file has
//! been mutated and the other has not.

use std::path::{Path, PathBuf};

use crate::backup::{BackupManager, BackupTag};
use crate::error::{Error, Result};
use crate::locate::locate_insertion;
use crate::marker::has_block;
use crate::payload;
use crate::remove::remove_block;

/// Immutable configuration for one injector instance.
#[derive(Debug, Clone)]
pub struct InjectorConfig {
    /// Name the mod registers itself under with `get_mod()`.
    pub mod_name: String,
    /// Absolute path of the mod's main script.
    pub script_path: PathBuf,
    /// Absolute path of the mod's localization script.
    pub localization_path: PathBuf,
    /// Directory backups are written into. Must already exist.
    pub backup_dir: PathBuf,
}

/// Installs and removes the generated update-checker block in a mod's
/// script pair.
#[derive(Debug)]
pub struct Injector {
    config: InjectorConfig,
    backups: BackupManager,
}

impl Injector {
    pub fn new(config: InjectorConfig) -> Self {
        let backups = BackupManager::new(&config.backup_dir);
        Self { config, backups }
    }

    /// Installs the update-checker block into both scripts.
    ///
    /// Without `force`, a block already present in either file is a
    /// precondition failure and nothing is changed. With `force`, existing
    /// blocks are removed first; a failed pre-clean aborts the whole
    /// operation.
    ///
    /// If the localization script fails after the mod script was already
    /// appended, the mod script is reverted. A failed revert escalates to
    /// [`Error::RollbackFailed`] so the caller knows manual action is
    /// required.
    pub fn inject(&self, mod_id: &str, force: bool) -> Result<()> {
        let primary = &self.config.script_path;
        let secondary = &self.config.localization_path;

        let primary_has = has_block(&muc_fs::read_text(primary)?);
        let secondary_has = has_block(&muc_fs::read_text(secondary)?);

        if !force && (primary_has || secondary_has) {
            let mut files = Vec::new();
            if primary_has {
                files.push(primary.clone());
            }
            if secondary_has {
                files.push(secondary.clone());
            }
            return Err(Error::AlreadyInjected { files });
        }

        for path in [primary, secondary] {
            if let Err(e) = self.backups.backup(path, BackupTag::Unmodified) {
                tracing::warn!(path = %path.display(), error = %e, "pre-change backup failed");
            }
        }

        // Only reachable with force set when blocks exist.
        for (path, present) in [(primary, primary_has), (secondary, secondary_has)] {
            if present {
                remove_block(path, false, &self.backups).map_err(|e| Error::CleanupFailed {
                    source: Box::new(e),
                })?;
            }
        }

        self.append_primary(mod_id)?;

        if let Err(cause) = self.insert_secondary() {
            return Err(match remove_block(primary, false, &self.backups) {
                Ok(_) => cause,
                Err(rollback) => Error::RollbackFailed {
                    primary: primary.clone(),
                    source: Box::new(cause),
                    rollback: Box::new(rollback),
                },
            });
        }

        tracing::debug!(mod_name = %self.config.mod_name, "update checker installed");
        Ok(())
    }

    /// Removes the update-checker block from both scripts, aggregating
    /// per-file failures. The localization script keeps blank lines inside
    /// the removed region, matching its formatting convention.
    pub fn restore(&self) -> Result<()> {
        let mut failures = Vec::new();

        for (path, preserve_blank_lines) in [
            (&self.config.script_path, false),
            (&self.config.localization_path, true),
        ] {
            if let Err(e) = remove_block(path, preserve_blank_lines, &self.backups) {
                failures.push((path.clone(), Box::new(e)));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Cleanup { failures })
        }
    }

    /// Appends the generated callback to the mod script, separated by a
    /// newline when the file does not already end with one.
    fn append_primary(&self, mod_id: &str) -> Result<()> {
        let path = &self.config.script_path;
        let content = muc_fs::read_text(path)?;
        let var_name = payload::mod_variable_name(&content, &self.config.mod_name)?;

        let mut block = payload::primary_payload(mod_id, &var_name);
        if !content.is_empty() && !content.ends_with('\n') {
            block.insert(0, '\n');
        }
        muc_fs::append_text(path, &block)?;
        Ok(())
    }

    /// Splices the localization entries into the returned table literal
    /// and writes the file back whole.
    fn insert_secondary(&self) -> Result<()> {
        let path = &self.config.localization_path;
        self.splice_localization(path)
            .map_err(|source| Error::SecondaryUpdate {
                path: path.clone(),
                source: Box::new(source),
            })
    }

    fn splice_localization(&self, path: &Path) -> Result<()> {
        let mut content = muc_fs::read_text(path)?;
        let point = locate_insertion(&content)?;
        let block = payload::secondary_payload(point.needs_separator, point.needs_leading_newline);
        content.insert_str(point.offset, &block);
        muc_fs::write_atomic(path, &content)?;
        Ok(())
    }
}
