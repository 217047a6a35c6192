//! Usage: Ports between the delivery core and the windowing toolkit.

/// Live view over one toolkit-owned window.
///
/// Implementations must reflect the window's current state on every call;
/// the core never caches focus or visibility.
pub(crate) trait WindowSurface {
    fn label(&self) -> &str;

    fn is_focused(&self) -> bool;

    fn set_always_on_top(&self, on: bool) -> Result<(), String>;

    fn unminimize(&self) -> Result<(), String>;

    fn show(&self) -> Result<(), String>;

    /// Fire-and-forget script injection into the window's page context.
    fn inject(&self, script: &str) -> Result<(), String>;
}

/// Lookup over the set of currently live windows.
///
/// Windows are addressed by label (an opaque ID into the toolkit's window
/// table); a closed window simply resolves to `None`, so stale labels held
/// elsewhere never dangle.
pub(crate) trait WindowRegistry {
    type Surface: WindowSurface;

    /// All live windows, sorted by label. The sort keeps focus scans
    /// deterministic when the toolkit reports more than one focused window.
    fn windows(&self) -> Vec<Self::Surface>;

    fn window(&self, label: &str) -> Option<Self::Surface>;

    /// The primary window. It is hidden instead of destroyed on close, so in
    /// steady state this resolves; `None` only during teardown.
    fn primary(&self) -> Option<Self::Surface>;
}
