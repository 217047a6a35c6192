//! Usage: Persisted application settings (schema + read/write helpers).

use crate::infra::app_paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const SCHEMA_VERSION: u32 = 1;

pub(crate) const DEFAULT_SERVER_URL: &str = "wss://77.244.213.6:3000";
pub(crate) const DEFAULT_START_PAGE_URL: &str = "https://office.shopfinance.ru";
pub(crate) const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub(crate) const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub(crate) const DEFAULT_INTERNAL_PHONE: &str = "000";

const MIN_WINDOW_WIDTH: u32 = 320;
const MIN_WINDOW_HEIGHT: u32 = 240;
const MAX_WINDOW_WIDTH: u32 = 10_000;
const MAX_WINDOW_HEIGHT: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub schema_version: u32,
    /// Push-notification endpoint. `http(s)` forms are accepted and rewritten
    /// to `ws(s)` by the channel.
    pub server_url: String,
    pub start_page_url: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Identity token announced to the server after each connect.
    pub internal_phone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            server_url: DEFAULT_SERVER_URL.to_string(),
            start_page_url: DEFAULT_START_PAGE_URL.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            internal_phone: DEFAULT_INTERNAL_PHONE.to_string(),
        }
    }
}

fn sanitize(settings: &mut AppSettings) -> bool {
    let mut changed = false;

    if settings.server_url.trim().is_empty() {
        settings.server_url = DEFAULT_SERVER_URL.to_string();
        changed = true;
    }
    if settings.start_page_url.trim().is_empty() {
        settings.start_page_url = DEFAULT_START_PAGE_URL.to_string();
        changed = true;
    }
    if settings.internal_phone.trim().is_empty() {
        settings.internal_phone = DEFAULT_INTERNAL_PHONE.to_string();
        changed = true;
    }

    if settings.window_width < MIN_WINDOW_WIDTH || settings.window_width > MAX_WINDOW_WIDTH {
        settings.window_width = DEFAULT_WINDOW_WIDTH;
        changed = true;
    }
    if settings.window_height < MIN_WINDOW_HEIGHT || settings.window_height > MAX_WINDOW_HEIGHT {
        settings.window_height = DEFAULT_WINDOW_HEIGHT;
        changed = true;
    }

    if settings.schema_version != SCHEMA_VERSION {
        settings.schema_version = SCHEMA_VERSION;
        changed = true;
    }

    changed
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

pub(crate) fn settings_file_exists(app: &tauri::AppHandle) -> Result<bool, String> {
    Ok(settings_path(app)?.exists())
}

fn parse_settings_json(content: &str) -> Result<AppSettings, String> {
    serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))
}

pub(crate) fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    let path = settings_path(app)?;

    if !path.exists() {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the
        // config discoverable/editable.
        let _ = write(app, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read settings: {e}"))?;
    let mut settings = parse_settings_json(&content)?;

    if sanitize(&mut settings) {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write(app, &settings);
    }

    Ok(settings)
}

pub(crate) fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    if settings.server_url.trim().is_empty() {
        return Err("server_url must not be empty".to_string());
    }
    if settings.start_page_url.trim().is_empty() {
        return Err("start_page_url must not be empty".to_string());
    }
    if settings.window_width < MIN_WINDOW_WIDTH || settings.window_width > MAX_WINDOW_WIDTH {
        return Err(format!(
            "window_width must be between {MIN_WINDOW_WIDTH} and {MAX_WINDOW_WIDTH}"
        ));
    }
    if settings.window_height < MIN_WINDOW_HEIGHT || settings.window_height > MAX_WINDOW_HEIGHT {
        return Err(format!(
            "window_height must be between {MIN_WINDOW_HEIGHT} and {MAX_WINDOW_HEIGHT}"
        ));
    }

    let path = settings_path(app)?;
    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let mut settings = settings.clone();
    settings.schema_version = SCHEMA_VERSION;

    let content = serde_json::to_vec_pretty(&settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(&path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::rename(&backup_path, &path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = parse_settings_json("{}").expect("parse empty object");
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.start_page_url, DEFAULT_START_PAGE_URL);
        assert_eq!(settings.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(settings.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(settings.internal_phone, DEFAULT_INTERNAL_PHONE);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings =
            parse_settings_json(r#"{ "internal_phone": "204", "legacy_flag": true }"#)
                .expect("parse with unknown field");
        assert_eq!(settings.internal_phone, "204");
    }

    #[test]
    fn sanitize_repairs_out_of_range_window_size() {
        let mut settings = AppSettings {
            window_width: 0,
            window_height: 99_999,
            ..AppSettings::default()
        };
        assert!(sanitize(&mut settings));
        assert_eq!(settings.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(settings.window_height, DEFAULT_WINDOW_HEIGHT);
    }

    #[test]
    fn sanitize_repairs_blank_identity() {
        let mut settings = AppSettings {
            internal_phone: "   ".to_string(),
            ..AppSettings::default()
        };
        assert!(sanitize(&mut settings));
        assert_eq!(settings.internal_phone, DEFAULT_INTERNAL_PHONE);
    }

    #[test]
    fn sanitize_leaves_valid_settings_untouched() {
        let mut settings = AppSettings::default();
        assert!(!sanitize(&mut settings));
    }
}
