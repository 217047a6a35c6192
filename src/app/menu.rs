//! Usage: Per-window navigation menu (back/forward/home; hide on primary, devtools in debug).

#![cfg(desktop)]

use crate::app::app_state::DebugMode;
use crate::infra::settings;
use tauri::menu::{IsMenuItem, Menu, MenuEvent, MenuItem};
use tauri::{Manager, WebviewWindow, Window, Wry};

const MENU_BACK_ID: &str = "nav.back";
const MENU_FORWARD_ID: &str = "nav.forward";
const MENU_HOME_ID: &str = "nav.home";
const MENU_HIDE_ID: &str = "nav.hide";
const MENU_DEVTOOLS_ID: &str = "nav.devtools";

/// Item IDs for one window's menu, in display order. The primary window
/// leads with Hide; debug mode appends the devtools toggle regardless of
/// build profile.
fn menu_item_ids(is_primary: bool, debug: bool) -> Vec<&'static str> {
    let mut ids = Vec::new();
    if is_primary {
        ids.push(MENU_HIDE_ID);
    }
    ids.extend([MENU_BACK_ID, MENU_FORWARD_ID, MENU_HOME_ID]);
    if debug {
        ids.push(MENU_DEVTOOLS_ID);
    }
    ids
}

fn item_label(id: &str) -> &'static str {
    match id {
        MENU_HIDE_ID => "隐藏窗口",
        MENU_BACK_ID => "后退",
        MENU_FORWARD_ID => "前进",
        MENU_HOME_ID => "主页",
        MENU_DEVTOOLS_ID => "调试工具",
        _ => "",
    }
}

pub(crate) fn attach(window: &WebviewWindow, is_primary: bool) -> Result<(), String> {
    let app = window.app_handle();
    let debug = app.state::<DebugMode>().0;

    let mut items: Vec<Box<dyn IsMenuItem<Wry>>> = Vec::new();
    for id in menu_item_ids(is_primary, debug) {
        let item = MenuItem::with_id(app, id, item_label(id), true, None::<&str>)
            .map_err(|e| format!("failed to create menu item {id:?}: {e}"))?;
        items.push(Box::new(item));
    }

    let item_refs: Vec<&dyn IsMenuItem<Wry>> = items.iter().map(|i| i.as_ref()).collect();
    let menu =
        Menu::with_items(app, &item_refs).map_err(|e| format!("failed to create menu: {e}"))?;

    window
        .set_menu(menu)
        .map_err(|e| format!("failed to attach menu: {e}"))?;
    window.on_menu_event(on_menu_event);

    Ok(())
}

fn on_menu_event(window: &Window<Wry>, event: MenuEvent) {
    let app = window.app_handle();
    let Some(webview) = app.get_webview_window(window.label()) else {
        return;
    };

    match event.id().as_ref() {
        MENU_BACK_ID => {
            let _ = webview.eval("history.back()");
        }
        MENU_FORWARD_ID => {
            let _ = webview.eval("history.forward()");
        }
        MENU_HOME_ID => {
            // Read at click time so a settings change takes effect without
            // rebuilding menus.
            let start_page_url = settings::read(app)
                .map(|s| s.start_page_url)
                .unwrap_or_else(|_| settings::DEFAULT_START_PAGE_URL.to_string());
            match serde_json::to_string(&start_page_url) {
                Ok(quoted) => {
                    let _ = webview.eval(&format!("window.location.replace({quoted})"));
                }
                Err(err) => tracing::debug!("主页地址序列化失败: {err}"),
            }
        }
        MENU_HIDE_ID => {
            let _ = webview.hide();
        }
        MENU_DEVTOOLS_ID => {
            if webview.is_devtools_open() {
                webview.close_devtools();
            } else {
                webview.open_devtools();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_mode_adds_devtools_toggle_in_any_profile() {
        // Driven solely by the runtime flag, not the build profile.
        assert!(menu_item_ids(false, true).contains(&MENU_DEVTOOLS_ID));
        assert!(menu_item_ids(true, true).ends_with(&[MENU_DEVTOOLS_ID]));
        assert!(!menu_item_ids(false, false).contains(&MENU_DEVTOOLS_ID));
        assert!(!menu_item_ids(true, false).contains(&MENU_DEVTOOLS_ID));
    }

    #[test]
    fn primary_window_leads_with_hide() {
        assert_eq!(
            menu_item_ids(true, false),
            vec![MENU_HIDE_ID, MENU_BACK_ID, MENU_FORWARD_ID, MENU_HOME_ID]
        );
        assert_eq!(
            menu_item_ids(false, false),
            vec![MENU_BACK_ID, MENU_FORWARD_ID, MENU_HOME_ID]
        );
    }

    #[test]
    fn every_menu_id_has_a_label() {
        for id in menu_item_ids(true, true) {
            assert!(!item_label(id).is_empty(), "missing label for {id}");
        }
    }
}
