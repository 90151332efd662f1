//! Command implementations.

use std::path::{Path, PathBuf};

use colored::Colorize;
use muc_engine::{Injector, InjectorConfig};

use crate::error::{CliError, Result};
use crate::manifest;
use crate::workspace;

/// Injects the update-checker block into the named mod.
pub fn run_enable(cwd: &Path, mod_name: &str, force: bool) -> Result<()> {
    let (injector, mod_dir) = build_injector(cwd, mod_name)?;
    let mod_id = manifest::published_id(&mod_dir.join("itemV2.cfg"))?;

    injector.inject(&mod_id, force)?;
    println!(
        "{} update checker added to {}",
        "ok".green().bold(),
        mod_name
    );
    Ok(())
}

/// Removes the update-checker block from the named mod.
pub fn run_disable(cwd: &Path, mod_name: &str) -> Result<()> {
    let (injector, _) = build_injector(cwd, mod_name)?;

    injector.restore()?;
    println!(
        "{} update checker removed from {}",
        "ok".green().bold(),
        mod_name
    );
    Ok(())
}

/// Resolves the workspace, manifest and backup directory into an
/// [`Injector`] for the named mod.
fn build_injector(cwd: &Path, mod_name: &str) -> Result<(Injector, PathBuf)> {
    let vmb_root = workspace::find_vmb_root(cwd).ok_or_else(|| {
        CliError::user("could not find the VMB folder (no .vmbrc in this directory or any parent)")
    })?;
    let backup_dir = workspace::backup_dir(&vmb_root)?;

    let mod_dir = cwd.join("mods").join(mod_name);
    let manifest = manifest::parse_manifest(&mod_dir.join(format!("{mod_name}.mod")))?;

    let config = InjectorConfig {
        mod_name: mod_name.to_string(),
        script_path: mod_dir.join(&manifest.script),
        localization_path: mod_dir.join(&manifest.localization),
        backup_dir,
    };
    Ok((Injector::new(config), mod_dir))
}
