//! Usage: One-shot debug-mode flag read from the environment at startup.

const DEBUG_ENV: &str = "CRM_DESK_DEBUG";

pub(crate) fn from_env() -> bool {
    std::env::var(DEBUG_ENV)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| v == "1" || v == "true" || v == "yes")
}
