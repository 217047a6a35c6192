//! Usage: Build the `new_webhook(...)` injection call from a JSON payload.

/// Serialized JSON is almost valid JS source, except U+2028/U+2029 which are
/// legal inside JSON strings but terminate lines in a script context.
pub(crate) fn webhook_call(payload: &serde_json::Value) -> String {
    let mut json = payload.to_string();
    if json.contains('\u{2028}') || json.contains('\u{2029}') {
        json = json
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029");
    }
    format!("new_webhook({json})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_payload_in_webhook_call() {
        let payload = serde_json::json!({ "event": "incoming_call", "from": "1001" });
        assert_eq!(
            webhook_call(&payload),
            r#"new_webhook({"event":"incoming_call","from":"1001"})"#
        );
    }

    #[test]
    fn escapes_js_line_separators() {
        let payload = serde_json::json!({ "note": "a\u{2028}b\u{2029}c" });
        let call = webhook_call(&payload);
        assert!(!call.contains('\u{2028}'));
        assert!(!call.contains('\u{2029}'));
        assert_eq!(call, "new_webhook({\"note\":\"a\\u2028b\\u2029c\"})");
    }

    #[test]
    fn scalar_payloads_pass_through_verbatim() {
        assert_eq!(
            webhook_call(&serde_json::json!("ping")),
            r#"new_webhook("ping")"#
        );
    }
}
