//! Mod manifest (.mod file) and Steam item config parsing.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{CliError, Result};

/// Matches the `mod_script = "..."` entry in a .mod manifest.
static MOD_SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"mod_script\s*=\s*"([\w\s/]+)"\s*,"#).expect("Invalid mod_script regex")
});

/// Matches the `mod_localization = "..."` entry in a .mod manifest.
static MOD_LOCALIZATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"mod_localization\s*=\s*"([\w\s/]+)"\s*,"#).expect("Invalid mod_localization regex")
});

/// Relative script paths declared in a mod's .mod manifest, with the
/// `.lua` extension already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModManifest {
    pub script: String,
    pub localization: String,
}

/// Reads the two script paths out of a .mod manifest.
pub fn parse_manifest(path: &Path) -> Result<ModManifest> {
    if !path.is_file() {
        return Err(CliError::user(format!(
            "could not locate {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;

    let script = MOD_SCRIPT_REGEX.captures(&content);
    let localization = MOD_LOCALIZATION_REGEX.captures(&content);
    match (script, localization) {
        (Some(script), Some(localization)) => Ok(ModManifest {
            script: format!("{}.lua", &script[1]),
            localization: format!("{}.lua", &localization[1]),
        }),
        _ => Err(CliError::user(format!(
            "could not read script file paths from {}",
            path.display()
        ))),
    }
}

/// Reads the published Steam workshop id out of itemV2.cfg.
///
/// The value looks like `published_id = 123456789L;` in the wild; the
/// `L` suffix and trailing semicolon are stripped.
pub fn published_id(path: &Path) -> Result<String> {
    let missing = || {
        CliError::user(format!(
            "could not read mod id from {}",
            path.display()
        ))
    };

    if !path.is_file() {
        return Err(missing());
    }
    let content = std::fs::read_to_string(path)?;

    for line in content.lines() {
        if line.starts_with("published_id") {
            let Some((_, value)) = line.split_once('=') else {
                return Err(missing());
            };
            return Ok(value.replace('L', "").replace(';', "").trim().to_string());
        }
    }
    Err(missing())
}
