//! Usage: Application layer (Tauri-managed state, tray/window lifecycle, startup wiring).

pub(crate) mod app_state;
pub(crate) mod debug;
pub(crate) mod logging;
pub(crate) mod menu;
pub(crate) mod resident;
