//! Usage: Resolve per-user app data directory and related path helpers.

use std::path::PathBuf;
use tauri::Manager;

pub(crate) const APP_DOTDIR_NAME: &str = ".crm-desk";
const APP_DOTDIR_NAME_ENV: &str = "CRM_DESK_DOTDIR_NAME";

fn is_safe_dotdir_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if !name.starts_with('.') {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

pub(crate) fn app_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let home_dir = app
        .path()
        .home_dir()
        .map_err(|e| format!("failed to resolve home dir: {e}"))?;

    let dotdir_name = std::env::var(APP_DOTDIR_NAME_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| is_safe_dotdir_name(v))
        .unwrap_or_else(|| APP_DOTDIR_NAME.to_string());

    let dir = home_dir.join(dotdir_name);
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}

/// Where the one-time bootstrap `config.json` is dropped by the installer.
pub(crate) fn desktop_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    app.path()
        .desktop_dir()
        .map_err(|e| format!("failed to resolve desktop dir: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotdir_override_must_stay_a_plain_dotted_name() {
        assert!(is_safe_dotdir_name(".crm-desk"));
        assert!(is_safe_dotdir_name(".crm-desk-dev_1"));
        assert!(!is_safe_dotdir_name("crm-desk"));
        assert!(!is_safe_dotdir_name(""));
        assert!(!is_safe_dotdir_name("."));
        assert!(!is_safe_dotdir_name(".."));
        assert!(!is_safe_dotdir_name(".a/b"));
        assert!(!is_safe_dotdir_name(".a\\b"));
    }
}
