//! Generated Lua payloads for the two target files.

use chrono::{Datelike, Duration, Timelike, Utc};
use regex::Regex;

use crate::error::{Error, Result};
use crate::marker::{BEGIN_MARKER, END_MARKER};

/// Update-check callback appended to the mod script. The callback fetches
/// the mod's Steam changelog page, parses the newest upload date out of it
/// and compares it against the upload timestamp baked in at injection
/// time, echoing a chat notice when the running copy is stale.
const UPDATE_CHECK_TEMPLATE: &str = r#"local mod_update_check_callback = function(success, code, headers, data, userdata)
    mod:pcall(function()
	    if not data then %MOD_VAR_NAME%:echo(%MOD_VAR_NAME%:localize("MUC_fail", %MOD_VAR_NAME%:get_readable_name())) return end
	    local first_update_index = data:find("Update: ")
	    if not first_update_index then %MOD_VAR_NAME%:echo(%MOD_VAR_NAME%:localize("MUC_fail", %MOD_VAR_NAME%:get_readable_name())) return end
	    local ours = { %UPLOAD_DATE_TIME% }
	    local year_p, no_year_p = "(%d+)%. (%a+)%.? (%d+) um (%d+):(%d+)", "(%d+)%. (%a+)%.? um (%d+):(%d+)"
	    local month_lut = {Jan=1,["Jän"]=1,Feb=2,["März"]=3,Apr=4,Mai=5,Jun=6,Juni=6,Jul=7,Juli=7,Aug=8,Sep=9,Sept=9,Okt=10,Nov=11,Dez=12}
	    local substr = data:sub(first_update_index, first_update_index+30)
	    local day, month, year, hour, minute = substr:match(year_p)
	    if not day then year, day, month, hour, minute = os.date("%Y"), substr:match(no_year_p) end
	    local latest = { tonumber(year),month_lut[month],tonumber(day),tonumber(hour),tonumber(minute) }
	    local MUC_get_up_to_date = function(table_ours, table_latest)
		    for i = 1, 5 do if table_ours[i] > table_latest[i] then return true elseif table_ours[i] < table_latest[i] then return false end end
		    return true
	    end
	    %MOD_VAR_NAME%.up_to_date = MUC_get_up_to_date(ours, latest)
	    if not %MOD_VAR_NAME%.up_to_date then
		    %MOD_VAR_NAME%:echo(%MOD_VAR_NAME%:localize("MUC_out_of_date", %MOD_VAR_NAME%:get_readable_name()))
	    end
    end)
end
Managers.curl:get("https://steamcommunity.com/sharedfiles/filedetails/changelog/%MOD_ID%", {"Accept-Language: de;q=0.5"}, mod_update_check_callback)"#;

/// Locale entries for the "could not verify" chat message.
const FAIL_MESSAGES: [(&str, &str); 5] = [
    (
        "en",
        "Could not verify that you have the latest version of %s. Is it public on Steam?",
    ),
    (
        "es",
        "No se pudo verificar que tienes la última versión de %s. ¿Es público en Steam?",
    ),
    (
        "fr",
        "Impossible de vérifier que vous disposez de la dernière version de %s. C'est public sur Steam ?",
    ),
    (
        "de",
        "Es konnte nicht überprüft werden, ob Sie über die neueste Version von %s verfügen. Ist es auf Steam öffentlich?",
    ),
    ("zh", "无法验证您是否拥有最新版本的 %s。 steam上是公开的吗？"),
];

/// Locale entries for the "out of date" chat message.
const OUT_OF_DATE_MESSAGES: [(&str, &str); 5] = [
    ("en", "NOTICE: You are not using the latest version of %s."),
    ("es", "AVISO: No estás usando la última versión de %s"),
    ("fr", "AVIS : Vous n'utilisez pas la dernière version de %s"),
    ("de", "HINWEIS: Sie verwenden nicht die neueste Version von %s"),
    ("zh", "注意：您没有使用最新版本的 %s"),
];

/// Finds the local variable the mod script binds via
/// `local <name> = get_mod("<mod-name>")`.
pub fn mod_variable_name(content: &str, mod_name: &str) -> Result<String> {
    // The pattern is built from an escaped literal, so it always compiles.
    let pattern = Regex::new(&format!(
        r#"\s*local\s+(\w+)\s*=\s*get_mod\("{}"\)"#,
        regex::escape(mod_name)
    ))
    .expect("Invalid mod variable regex");

    for line in content.lines() {
        if let Some(caps) = pattern.captures(line) {
            return Ok(caps[1].to_string());
        }
    }
    Err(Error::ModVariableNotFound {
        mod_name: mod_name.to_string(),
    })
}

/// The block appended to the mod script: sentinel lines around the
/// update-check callback with all placeholders substituted.
///
/// The baked-in timestamp is a couple of minutes in the future so that the
/// upload following this injection still counts as "ours".
pub fn primary_payload(mod_id: &str, mod_var_name: &str) -> String {
    let upload = Utc::now() + Duration::minutes(2);
    let stamp = format!(
        "{},{},{},{},{}",
        upload.year(),
        upload.month(),
        upload.day(),
        upload.hour(),
        upload.minute()
    );

    let code = UPDATE_CHECK_TEMPLATE
        .replace("%UPLOAD_DATE_TIME%", &stamp)
        .replace("%MOD_ID%", mod_id)
        .replace("%MOD_VAR_NAME%", mod_var_name);

    format!("{BEGIN_MARKER}\n{code}\n{END_MARKER}\n")
}

/// The block spliced into the localization table: `MUC_fail` and
/// `MUC_out_of_date` entries carrying the fixed locale messages,
/// tab-indented to sit alongside the table's own entries.
pub fn secondary_payload(needs_separator: bool, needs_leading_newline: bool) -> String {
    let newline = if needs_leading_newline { "\n" } else { "" };
    let comma = if needs_separator { "," } else { "" };

    let mut output = format!("{newline}\t{BEGIN_MARKER}\n\t{comma}MUC_fail = {{\n");
    for (locale, message) in FAIL_MESSAGES {
        output.push_str(&format!("\t\t{locale} = \"{message}\",\n"));
    }
    output.push_str("\t},\n\tMUC_out_of_date = {\n");
    for (locale, message) in OUT_OF_DATE_MESSAGES {
        output.push_str(&format!("\t\t{locale} = \"{message}\",\n"));
    }
    output.push_str(&format!("\t}},\n\t{END_MARKER}\n"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_variable_name_found() {
        let content = "local my_mod = get_mod(\"CoolMod\")\nmy_mod.setting = 1\n";
        assert_eq!(mod_variable_name(content, "CoolMod").unwrap(), "my_mod");
    }

    #[test]
    fn test_mod_variable_name_requires_exact_mod_name() {
        let content = "local my_mod = get_mod(\"OtherMod\")\n";
        let err = mod_variable_name(content, "CoolMod").unwrap_err();
        assert!(matches!(err, Error::ModVariableNotFound { mod_name } if mod_name == "CoolMod"));
    }

    #[test]
    fn test_mod_name_with_regex_metacharacters() {
        let content = "local m = get_mod(\"My.Mod+\")\n";
        assert_eq!(mod_variable_name(content, "My.Mod+").unwrap(), "m");
    }

    #[test]
    fn test_primary_payload_substitutes_placeholders() {
        let payload = primary_payload("123456", "my_mod");
        assert!(payload.starts_with(BEGIN_MARKER));
        assert!(payload.ends_with(&format!("{END_MARKER}\n")));
        assert!(payload.contains("changelog/123456"));
        assert!(payload.contains("my_mod:echo"));
        assert!(!payload.contains("%MOD_ID%"));
        assert!(!payload.contains("%MOD_VAR_NAME%"));
        assert!(!payload.contains("%UPLOAD_DATE_TIME%"));
    }

    #[test]
    fn test_primary_payload_keeps_lua_match_patterns() {
        // %d / %a / %Y are Lua patterns, not placeholders; they must
        // survive substitution untouched.
        let payload = primary_payload("1", "m");
        assert!(payload.contains("(%d+)%. (%a+)"));
        assert!(payload.contains("os.date(\"%Y\")"));
    }

    #[test]
    fn test_secondary_payload_formatting_combinations() {
        let plain = secondary_payload(false, false);
        assert!(plain.starts_with(&format!("\t{BEGIN_MARKER}\n\tMUC_fail")));

        let with_both = secondary_payload(true, true);
        assert!(with_both.starts_with(&format!("\n\t{BEGIN_MARKER}\n\t,MUC_fail")));
        assert!(with_both.ends_with(&format!("\t{END_MARKER}\n")));
    }

    #[test]
    fn test_secondary_payload_contains_all_locales() {
        let payload = secondary_payload(false, false);
        for locale in ["en", "es", "fr", "de", "zh"] {
            assert_eq!(payload.matches(&format!("\t\t{locale} = \"")).count(), 2);
        }
    }
}
