//! Usage: Ordered history of blurred windows used for fallback targeting.

use super::registry::WindowRegistry;

/// Stack of window labels, most-recently-blurred last.
///
/// A label is pushed on every blur event, so the same window may appear any
/// number of times. Entries for closed windows are not pruned eagerly; they
/// are discarded lazily when a fallback candidate is actually needed.
#[derive(Debug, Default)]
pub(crate) struct RecencyStack {
    entries: Vec<String>,
}

impl RecencyStack {
    pub(crate) fn record_blur(&mut self, label: &str) {
        self.entries.push(label.to_string());
    }

    /// Pops entries until one resolves to a live window. Dead entries are
    /// dropped permanently. Returns `None` once the stack is exhausted.
    pub(crate) fn pop_candidate<R: WindowRegistry>(&mut self, registry: &R) -> Option<R::Surface> {
        while let Some(label) = self.entries.pop() {
            match registry.window(&label) {
                Some(window) => return Some(window),
                None => {
                    tracing::debug!(label = %label, "丢弃已关闭窗口的失焦记录");
                }
            }
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
