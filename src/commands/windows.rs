//! Usage: Window-opening commands callable from other windows and processes.

use crate::infra::{settings, tauri_windows};

/// Opens a new non-primary window at the configured start page.
#[tauri::command]
pub(crate) fn open_default_window(app: tauri::AppHandle) -> Result<String, String> {
    let settings = settings::read(&app)?;
    let window = tauri_windows::create_secondary_window(&app, &settings.start_page_url, &settings)?;
    Ok(window.label().to_string())
}

/// Opens a new non-primary window at an arbitrary URL.
#[tauri::command]
pub(crate) fn open_target_window(app: tauri::AppHandle, url: String) -> Result<String, String> {
    let settings = settings::read(&app)?;
    let window = tauri_windows::create_secondary_window(&app, &url, &settings)?;
    Ok(window.label().to_string())
}
