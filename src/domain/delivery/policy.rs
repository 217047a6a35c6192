//! Usage: Per-message delivery policy (focused-first, recency fallback, restore sequence).

use super::recency::RecencyStack;
use super::registry::{WindowRegistry, WindowSurface};

/// What happened to one inbound message. Returned for logging and tests;
/// the policy itself never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeliveryOutcome {
    /// A focused window existed and the payload was injected directly.
    Injected { label: String },
    /// No window was focused; a fallback target was surfaced via the restore
    /// sequence and then injected.
    Restored { label: String },
    /// No usable target, or the chosen window rejected the injection
    /// (page still loading etc.). The message is lost.
    Dropped,
}

/// Routes one message to a window.
///
/// Focused window wins outright, with no visibility side effects. Otherwise
/// the most recently blurred live window is surfaced, and the primary window
/// is the target of last resort. Failures are swallowed into `Dropped`.
pub(crate) fn deliver<R: WindowRegistry>(
    registry: &R,
    recency: &mut RecencyStack,
    payload: &serde_json::Value,
) -> DeliveryOutcome {
    let script = crate::shared::js::webhook_call(payload);

    // windows() is label-sorted, so a multi-focus report (platform quirk)
    // resolves to the same window every time.
    if let Some(window) = registry.windows().into_iter().find(|w| w.is_focused()) {
        let label = window.label().to_string();
        return match window.inject(&script) {
            Ok(()) => DeliveryOutcome::Injected { label },
            Err(err) => {
                tracing::debug!(label = %label, "注入失败，消息已丢弃: {err}");
                DeliveryOutcome::Dropped
            }
        };
    }

    let target = match recency.pop_candidate(registry) {
        Some(window) => window,
        None => match registry.primary() {
            Some(window) => window,
            None => {
                tracing::debug!("没有可投递的窗口，消息已丢弃");
                return DeliveryOutcome::Dropped;
            }
        },
    };

    let label = target.label().to_string();
    match restore_and_inject(&target, &script) {
        Ok(()) => DeliveryOutcome::Restored { label },
        Err(err) => {
            tracing::debug!(label = %label, "唤起窗口失败，消息已丢弃: {err}");
            DeliveryOutcome::Dropped
        }
    }
}

/// The restore sequence: the always-on-top toggle forces the window above
/// other applications even when the OS would keep a background process
/// behind, then the payload is injected.
fn restore_and_inject<W: WindowSurface>(window: &W, script: &str) -> Result<(), String> {
    window.set_always_on_top(true)?;
    window.unminimize()?;
    window.show()?;
    window.set_always_on_top(false)?;
    window.inject(script)
}
