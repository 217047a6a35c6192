//! Usage: First-run settings seeding from a one-time desktop config file.

use crate::infra::{app_paths, settings};
use serde::Deserialize;
use std::path::Path;

const BOOTSTRAP_FILE_NAME: &str = "config.json";

#[derive(Debug, Deserialize)]
struct BootstrapWindow {
    width: u32,
    height: u32,
}

/// Shape of the file the installer drops on the desktop. Keys are camelCase
/// because the file is produced by the server-side provisioning tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BootstrapConfig {
    server_url: String,
    start_page_url: String,
    window: BootstrapWindow,
    internal_phone: String,
}

impl BootstrapConfig {
    fn into_settings(self) -> settings::AppSettings {
        settings::AppSettings {
            schema_version: settings::SCHEMA_VERSION,
            server_url: self.server_url,
            start_page_url: self.start_page_url,
            window_width: self.window.width,
            window_height: self.window.height,
            internal_phone: self.internal_phone,
        }
    }
}

#[derive(Debug)]
pub(crate) enum BootstrapOutcome {
    /// Settings already exist; nothing to seed.
    AlreadyConfigured,
    /// Desktop config consumed and written into settings.
    Seeded,
    /// No usable desktop config; defaults written. The warning is shown to
    /// the user exactly once.
    Defaults { warning: String },
}

pub(crate) fn seed_if_first_run(app: &tauri::AppHandle) -> Result<BootstrapOutcome, String> {
    if settings::settings_file_exists(app)? {
        return Ok(BootstrapOutcome::AlreadyConfigured);
    }

    let path = app_paths::desktop_dir(app)?.join(BOOTSTRAP_FILE_NAME);
    match consume_bootstrap_file(&path) {
        Some(config) => match settings::write(app, &config.into_settings()) {
            Ok(_) => {
                tracing::info!("已从桌面引导文件写入初始配置");
                Ok(BootstrapOutcome::Seeded)
            }
            Err(err) => {
                // Out-of-range values in the provisioning file are treated
                // like a corrupt file, not a fatal error.
                tracing::warn!("引导配置无效: {err}");
                let _ = settings::write(app, &settings::AppSettings::default());
                Ok(BootstrapOutcome::Defaults {
                    warning: "无法加载配置文件，已使用默认参数".to_string(),
                })
            }
        },
        None => {
            let _ = settings::write(app, &settings::AppSettings::default());
            Ok(BootstrapOutcome::Defaults {
                warning: "无法加载配置文件，已使用默认参数".to_string(),
            })
        }
    }
}

/// Reads and deletes the bootstrap file. The file is one-time: it is
/// consumed even when it fails to parse.
fn consume_bootstrap_file(path: &Path) -> Option<BootstrapConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    let _ = std::fs::remove_file(path);
    match parse_bootstrap(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("引导配置解析失败: {err}");
            None
        }
    }
}

fn parse_bootstrap(content: &str) -> Result<BootstrapConfig, String> {
    serde_json::from_str(content).map_err(|e| format!("failed to parse bootstrap config: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_provisioning_keys() {
        let config = parse_bootstrap(
            r#"{
                "serverUrl": "wss://crm.example:3000",
                "startPageUrl": "https://office.example",
                "window": { "width": 1024, "height": 768 },
                "internalPhone": "204"
            }"#,
        )
        .expect("parse bootstrap");

        let settings = config.into_settings();
        assert_eq!(settings.server_url, "wss://crm.example:3000");
        assert_eq!(settings.start_page_url, "https://office.example");
        assert_eq!(settings.window_width, 1024);
        assert_eq!(settings.window_height, 768);
        assert_eq!(settings.internal_phone, "204");
    }

    #[test]
    fn missing_keys_are_a_parse_error() {
        assert!(parse_bootstrap(r#"{ "serverUrl": "wss://crm.example" }"#).is_err());
        assert!(parse_bootstrap("not json").is_err());
    }
}
