//! Usage: Desktop resident mode (tray icon, primary-window lifecycle, blur tracking).

use crate::app::app_state::DeliveryState;
use crate::infra::tauri_windows::PRIMARY_WINDOW_LABEL;
use crate::shared::mutex_ext::MutexExt;
use tauri::Manager;

const TRAY_ID: &str = "main-tray";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";

#[cfg(not(desktop))]
pub(crate) fn setup_tray(_app: &tauri::AppHandle) -> Result<(), String> {
    Ok(())
}

#[cfg(not(desktop))]
pub(crate) fn show_primary_window(_app: &tauri::AppHandle) {}

#[cfg(desktop)]
use tauri::menu::{Menu, MenuItem};
#[cfg(desktop)]
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};

#[cfg(desktop)]
pub(crate) fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "退出", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;

    let menu = Menu::with_items(app, &[&quit_item])
        .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let quit_id = quit_item.id().clone();

    #[cfg(target_os = "macos")]
    let icon_bytes = include_bytes!("../../icons/trayTemplate.png");
    #[cfg(not(target_os = "macos"))]
    let icon_bytes = include_bytes!("../../icons/32x32.png");

    let icon = tauri::image::Image::from_bytes(icon_bytes)
        .map_err(|e| format!("failed to load tray icon: {e}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip("CRM Desk")
        .menu(&menu);

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            if event.id == quit_id {
                app.exit(0);
            }
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state,
                ..
            } = event
            {
                if button == MouseButton::Left && button_state == MouseButtonState::Up {
                    show_primary_window(tray.app_handle());
                }
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

/// Also the second-instance handler: a duplicate launch lands here instead
/// of starting another shell.
#[cfg(desktop)]
pub(crate) fn show_primary_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(PRIMARY_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    match event {
        // Blur history feeds the delivery fallback. Every focus loss is
        // recorded; duplicates are expected and handled at pop time.
        tauri::WindowEvent::Focused(false) => {
            let state = window.state::<DeliveryState>();
            state.0.lock_or_recover().record_blur(window.label());
        }
        // The primary window is never destroyed, only hidden.
        tauri::WindowEvent::CloseRequested { api, .. }
            if window.label() == PRIMARY_WINDOW_LABEL =>
        {
            api.prevent_close();
            let _ = window.hide();
        }
        _ => {}
    }
}
