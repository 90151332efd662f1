//! Cross-crate workflow tests: a realistic mod layout taken through the
//! full inject / detect / restore cycle.

use std::fs;
use std::path::PathBuf;

use muc_engine::{BEGIN_MARKER, ErrorKind, Injector, InjectorConfig, has_block};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SCRIPT: &str = r#"local mod = get_mod("GrimReload")

mod:hook("PlayerUnit", "update", function(func, ...)
	return func(...)
end)

mod.on_enabled = function()
	mod:echo(mod:localize("mod_enabled"))
end
"#;

const LOCALIZATION: &str = r#"local localizations = {
	mod_enabled = {
		en = "GrimReload enabled { now with braces }",
		de = "GrimReload aktiviert",
	},
	mod_description = {
		en = "Faster reloads.",
	},
}
return localizations
"#;

struct Workspace {
    _temp: TempDir,
    injector: Injector,
    script: PathBuf,
    localization: PathBuf,
}

fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let mod_dir = temp.path().join("mods").join("GrimReload");
    let backup_dir = temp.path().join("MUC_Backup");
    fs::create_dir_all(&mod_dir).unwrap();
    fs::create_dir_all(&backup_dir).unwrap();

    let script = mod_dir.join("grim_reload.lua");
    let localization = mod_dir.join("grim_reload_localization.lua");
    fs::write(&script, SCRIPT).unwrap();
    fs::write(&localization, LOCALIZATION).unwrap();

    let injector = Injector::new(InjectorConfig {
        mod_name: "GrimReload".into(),
        script_path: script.clone(),
        localization_path: localization.clone(),
        backup_dir,
    });

    Workspace {
        _temp: temp,
        injector,
        script,
        localization,
    }
}

#[test]
fn test_full_cycle_on_realistic_mod() {
    let w = workspace();

    w.injector.inject("2049217731", false).unwrap();

    let script = fs::read_to_string(&w.script).unwrap();
    let localization = fs::read_to_string(&w.localization).unwrap();
    assert!(has_block(&script));
    assert!(has_block(&localization));

    // The embedded brace inside a localized string must not derail the
    // insertion: new entries land inside the outer table, before the
    // trailing `return`.
    assert!(localization.ends_with("}\nreturn localizations\n"));
    let muc_fail = localization.find("MUC_fail").unwrap();
    let outer_close = localization.rfind("\n}").unwrap();
    assert!(muc_fail < outer_close);

    // Existing entries keep their comma-terminated form, so no extra
    // separator is produced.
    assert!(!localization.contains(",MUC_fail"));

    w.injector.restore().unwrap();
    assert_eq!(fs::read_to_string(&w.script).unwrap(), SCRIPT);
    assert_eq!(fs::read_to_string(&w.localization).unwrap(), LOCALIZATION);
}

#[test]
fn test_double_inject_then_restore_once() {
    let w = workspace();

    w.injector.inject("1", false).unwrap();
    let err = w.injector.inject("1", false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);

    w.injector.restore().unwrap();
    assert_eq!(fs::read_to_string(&w.script).unwrap(), SCRIPT);
    assert_eq!(fs::read_to_string(&w.localization).unwrap(), LOCALIZATION);
}

#[test]
fn test_forced_refresh_keeps_single_block() {
    let w = workspace();

    w.injector.inject("1", false).unwrap();
    w.injector.inject("2", true).unwrap();
    w.injector.inject("3", true).unwrap();

    let script = fs::read_to_string(&w.script).unwrap();
    assert_eq!(script.matches(BEGIN_MARKER).count(), 1);
    assert!(script.contains("changelog/3"));

    let localization = fs::read_to_string(&w.localization).unwrap();
    assert_eq!(localization.matches(BEGIN_MARKER).count(), 1);
}

#[test]
fn test_backups_survive_the_whole_cycle() {
    let w = workspace();

    w.injector.inject("7", false).unwrap();
    w.injector.restore().unwrap();

    let backup_dir = w._temp.path().join("MUC_Backup");
    // Pre-change snapshots hold the originals.
    assert_eq!(
        fs::read_to_string(backup_dir.join("grim_reload.lua")).unwrap(),
        SCRIPT
    );
    // Pre-removal snapshots hold the injected versions.
    let modified = fs::read_to_string(backup_dir.join("grim_reload_MODIFIED.lua")).unwrap();
    assert!(has_block(&modified));
}
