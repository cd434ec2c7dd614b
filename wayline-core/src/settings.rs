use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Menu settings, persisted to `<config dir>/wayline/menu.json`.
///
/// The `#[serde(default)]` on the struct fills any field missing from an
/// existing file with its `Default` value, so new fields can be added
/// without breaking old config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    // ── Identity ─────────────────────────────────────────────────────────
    pub app_name: String,

    // ── Schemes ──────────────────────────────────────────────────────────
    pub internal_scheme: String,
    pub drive_scheme: String,

    // ── Help links ───────────────────────────────────────────────────────
    pub help_url: String,
    pub developer_portal_url: String,
    pub report_issue_url: String,

    // ── Keyboard ─────────────────────────────────────────────────────────
    /// Accelerator overrides keyed by menu item id, e.g. `"newTab": "Ctrl+Shift+N"`.
    pub accelerator_overrides: HashMap<String, String>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        MenuSettings {
            app_name: String::from("Beaker"),

            internal_scheme: String::from("beaker"),
            drive_scheme: String::from("hyper"),

            help_url: String::from("https://beaker-browser.gitbook.io/docs/"),
            developer_portal_url: String::from("https://beaker.dev/"),
            report_issue_url: String::from("https://github.com/beakerbrowser/beaker/issues"),

            accelerator_overrides: HashMap::new(),
        }
    }
}

impl MenuSettings {
    /// Builds `<internal_scheme>://<path>`.
    pub fn internal_url(&self, path: &str) -> String {
        format!("{}://{}", self.internal_scheme, path)
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wayline").join("menu.json"))
}

pub fn load() -> MenuSettings {
    match settings_path() {
        Some(path) => load_from(&path),
        None => MenuSettings::default(),
    }
}

pub fn load_from(path: &Path) -> MenuSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Malformed menu settings at {}: {}", path.display(), e);
            MenuSettings::default()
        }),
        Err(_) => MenuSettings::default(),
    }
}

pub fn save(settings: &MenuSettings) {
    if let Some(path) = settings_path() {
        save_to(settings, &path);
    }
}

pub fn save_to(settings: &MenuSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(json) = serde_json::to_string_pretty(settings) {
        if let Err(e) = std::fs::write(path, json) {
            log::warn!("Failed to write menu settings to {}: {}", path.display(), e);
        }
    }
}
