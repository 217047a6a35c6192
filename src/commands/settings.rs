//! Usage: Settings get/set commands.

use crate::infra::settings;

#[tauri::command]
pub(crate) fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    settings::read(&app)
}

#[tauri::command]
pub(crate) fn settings_set(
    app: tauri::AppHandle,
    settings: settings::AppSettings,
) -> Result<settings::AppSettings, String> {
    settings::write(&app, &settings)
}
