//! Usage: Tauri command surface exposed to window content and other processes.

mod app;
mod settings;
mod windows;

pub(crate) use app::*;
pub(crate) use settings::*;
pub(crate) use windows::*;
