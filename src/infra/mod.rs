//! Usage: Adapters to the outside world (settings files, transport, toolkit windows).

pub(crate) mod app_paths;
pub(crate) mod bootstrap;
pub(crate) mod channel;
pub(crate) mod settings;
pub(crate) mod tauri_windows;
