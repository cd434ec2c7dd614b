use std::collections::HashMap;

use crate::context::Platform;

/// Modifier token that resolves to `Cmd` on mac and `Ctrl` elsewhere.
pub const CMD_OR_CTRL: &str = "CmdOrCtrl";

/// Replaces every `CmdOrCtrl` token in `accel` with the platform modifier.
pub fn resolve(accel: &str, platform: Platform) -> String {
    let primary = if platform.is_mac() { "Cmd" } else { "Ctrl" };
    accel
        .split('+')
        .map(|part| {
            if part.trim().eq_ignore_ascii_case(CMD_OR_CTRL) {
                primary
            } else {
                part
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Normalises a user-written accelerator like `"ctrl+shift+b"` into
/// `"Ctrl+Shift+B"`. Returns `None` when a modifier is not recognised or the
/// key is missing.
pub fn parse_override(key: &str) -> Option<String> {
    let parts: Vec<&str> = key.split('+').map(str::trim).collect();
    let (last, modifiers) = parts.split_last()?;
    if last.is_empty() {
        return None;
    }

    let mut normalized = Vec::with_capacity(parts.len());
    for part in modifiers {
        let modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => "Ctrl",
            "shift" => "Shift",
            "alt" | "option" => "Alt",
            "cmd" | "command" => "Cmd",
            "super" => "Super",
            "cmdorctrl" => CMD_OR_CTRL,
            _ => return None,
        };
        normalized.push(modifier.to_string());
    }

    let key_display = if last.chars().count() == 1 {
        last.to_uppercase()
    } else {
        last.to_string()
    };
    normalized.push(key_display);
    Some(normalized.join("+"))
}

/// Returns the accelerator for a menu entry, using the override for `id` if
/// present and valid, otherwise `default`, resolved for `platform`.
pub fn get_accel(
    id: Option<&str>,
    default: Option<&str>,
    overrides: &HashMap<String, String>,
    platform: Platform,
) -> Option<String> {
    if let Some(display_str) = id.and_then(|id| overrides.get(id)) {
        match parse_override(display_str) {
            Some(accel) => return Some(resolve(&accel, platform)),
            None => log::warn!(
                "Ignoring invalid accelerator override {:?} for {:?}",
                display_str,
                id
            ),
        }
    }
    default.map(|accel| resolve(accel, platform))
}
