//! Usage: Tauri adapter for the delivery core's window ports, plus the window factory.

use crate::domain::delivery::registry::{WindowRegistry, WindowSurface};
use crate::infra::settings::AppSettings;
use std::sync::atomic::{AtomicU64, Ordering};
use tauri::{Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

pub(crate) const PRIMARY_WINDOW_LABEL: &str = "main";

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct TauriWindow(WebviewWindow);

impl WindowSurface for TauriWindow {
    fn label(&self) -> &str {
        self.0.label()
    }

    fn is_focused(&self) -> bool {
        self.0.is_focused().unwrap_or(false)
    }

    fn set_always_on_top(&self, on: bool) -> Result<(), String> {
        self.0
            .set_always_on_top(on)
            .map_err(|e| format!("set_always_on_top failed: {e}"))
    }

    fn unminimize(&self) -> Result<(), String> {
        self.0
            .unminimize()
            .map_err(|e| format!("unminimize failed: {e}"))
    }

    fn show(&self) -> Result<(), String> {
        self.0.show().map_err(|e| format!("show failed: {e}"))
    }

    fn inject(&self, script: &str) -> Result<(), String> {
        self.0
            .eval(script)
            .map_err(|e| format!("script injection failed: {e}"))
    }
}

/// Registry over Tauri's live window table. No caching; every call goes
/// back to the toolkit.
pub(crate) struct TauriRegistry {
    app: tauri::AppHandle,
}

impl TauriRegistry {
    pub(crate) fn new(app: &tauri::AppHandle) -> Self {
        Self { app: app.clone() }
    }
}

impl WindowRegistry for TauriRegistry {
    type Surface = TauriWindow;

    fn windows(&self) -> Vec<TauriWindow> {
        let mut windows: Vec<WebviewWindow> =
            self.app.webview_windows().into_values().collect();
        // webview_windows() is a HashMap; sort so focus scans are deterministic.
        windows.sort_by(|a, b| a.label().cmp(b.label()));
        windows.into_iter().map(TauriWindow).collect()
    }

    fn window(&self, label: &str) -> Option<TauriWindow> {
        self.app.get_webview_window(label).map(TauriWindow)
    }

    fn primary(&self) -> Option<TauriWindow> {
        self.window(PRIMARY_WINDOW_LABEL)
    }
}

/// Creates the primary window at the configured start page. Close is
/// intercepted elsewhere and turned into hide; this window lives for the
/// whole process.
pub(crate) fn create_primary_window(
    app: &tauri::AppHandle,
    settings: &AppSettings,
) -> Result<WebviewWindow, String> {
    build_window(
        app,
        PRIMARY_WINDOW_LABEL,
        &settings.start_page_url,
        settings,
        true,
    )
}

/// Creates an additional window at an arbitrary URL. Labels are never
/// reused, so stale recency entries for a closed window stay dead.
pub(crate) fn create_secondary_window(
    app: &tauri::AppHandle,
    url: &str,
    settings: &AppSettings,
) -> Result<WebviewWindow, String> {
    let label = format!("window-{}", NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed));
    build_window(app, &label, url, settings, false)
}

fn build_window(
    app: &tauri::AppHandle,
    label: &str,
    url: &str,
    settings: &AppSettings,
    is_primary: bool,
) -> Result<WebviewWindow, String> {
    let url: tauri::Url = url
        .parse()
        .map_err(|e| format!("invalid window url {url:?}: {e}"))?;

    let window = WebviewWindowBuilder::new(app, label, WebviewUrl::External(url))
        .title("CRM Desk")
        .inner_size(
            f64::from(settings.window_width),
            f64::from(settings.window_height),
        )
        .build()
        .map_err(|e| format!("failed to create window {label:?}: {e}"))?;

    #[cfg(desktop)]
    crate::app::menu::attach(&window, is_primary)?;
    #[cfg(not(desktop))]
    let _ = is_primary;

    Ok(window)
}
