//! Usage: Reconnecting WebSocket client for server push notifications.

use crate::app::app_state::DeliveryState;
use crate::domain::delivery::policy;
use crate::infra::tauri_windows::TauriRegistry;
use crate::shared::mutex_ext::MutexExt;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tauri::Manager;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(12);
/// Grace period after connect before the identification frame goes out,
/// letting the transport settle server-side.
const IDENTIFY_DELAY: Duration = Duration::from_millis(400);
const BACKOFF_BASE_MS: u64 = 500;
const BACKOFF_MAX_MS: u64 = 30_000;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Starts the channel as a background task for the process lifetime.
/// Transport failures reconnect forever and are never surfaced to the user.
pub(crate) fn spawn(app: tauri::AppHandle, server_url: String, internal_phone: String) {
    tauri::async_runtime::spawn(run(app, server_url, internal_phone));
}

/// Settings may carry the endpoint in its http(s) form.
fn ws_url(server_url: &str) -> String {
    if let Some(rest) = server_url.strip_prefix("https://") {
        return format!("wss://{rest}");
    }
    if let Some(rest) = server_url.strip_prefix("http://") {
        return format!("ws://{rest}");
    }
    server_url.to_string()
}

fn identify_frame(internal_phone: &str) -> String {
    serde_json::json!({ "iam": internal_phone }).to_string()
}

fn backoff_ms(attempt: u32) -> u64 {
    let shifted = BACKOFF_BASE_MS.saturating_mul(1_u64 << attempt.min(6));
    shifted.min(BACKOFF_MAX_MS)
}

async fn run(app: tauri::AppHandle, server_url: String, internal_phone: String) {
    let url = ws_url(&server_url);
    let mut attempt: u32 = 0;

    loop {
        match tokio::time::timeout(CONNECT_TIMEOUT, connect_async(&url)).await {
            Ok(Ok((stream, _))) => {
                attempt = 0;
                tracing::info!(server_url = %url, "通知通道已连接");
                serve_connection(&app, stream, &internal_phone).await;
                tracing::debug!(server_url = %url, "通知通道断开，准备重连");
            }
            Ok(Err(err)) => {
                tracing::debug!(server_url = %url, "通知通道连接失败: {err}");
            }
            Err(_) => {
                tracing::debug!(server_url = %url, "通知通道连接超时");
            }
        }

        let wait = backoff_ms(attempt);
        tracing::debug!(attempt, wait_ms = wait, "通知通道重连等待");
        tokio::time::sleep(Duration::from_millis(wait)).await;
        attempt = attempt.saturating_add(1);
    }
}

/// Drives one connection until it drops. The identification frame is sent
/// exactly once per connection, after `IDENTIFY_DELAY`; it is not retried
/// within the connection, a reconnect re-arms it.
async fn serve_connection(app: &tauri::AppHandle, stream: WsStream, internal_phone: &str) {
    let (mut write, mut read) = stream.split();
    let (send_tx, mut send_rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let identify_task = tauri::async_runtime::spawn(send_identify_after_delay(
        send_tx.clone(),
        internal_phone.to_string(),
    ));

    loop {
        tokio::select! {
            frame = send_rx.recv() => {
                let Some(frame) = frame else { break };
                if let Err(err) = write.send(Message::Text(frame)).await {
                    tracing::debug!("通知通道发送失败: {err}");
                    break;
                }
            }
            inbound = read.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => dispatch_message(app, &text),
                    Some(Ok(Message::Ping(_))) => tracing::debug!("通知通道 ping"),
                    Some(Ok(Message::Pong(_))) => tracing::debug!("通知通道 pong"),
                    Some(Ok(Message::Close(frame))) => {
                        tracing::debug!("通知通道收到关闭帧: {frame:?}");
                        break;
                    }
                    // Binary and raw frames carry nothing for us.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!("通知通道读取错误: {err}");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    identify_task.abort();
}

async fn send_identify_after_delay(
    tx: tokio::sync::mpsc::UnboundedSender<String>,
    internal_phone: String,
) {
    tokio::time::sleep(IDENTIFY_DELAY).await;
    tracing::debug!(internal_phone = %internal_phone, "发送身份标识");
    let _ = tx.send(identify_frame(&internal_phone));
}

/// Hands one inbound payload to the delivery policy. Window state is only
/// touched on the main thread, so handlers run to completion without
/// re-entering each other.
fn dispatch_message(app: &tauri::AppHandle, raw: &str) {
    let payload: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("非 JSON 消息已丢弃: {err}");
            return;
        }
    };

    let app_for_policy = app.clone();
    let scheduled = app.run_on_main_thread(move || {
        let registry = TauriRegistry::new(&app_for_policy);
        let state = app_for_policy.state::<DeliveryState>();
        let mut recency = state.0.lock_or_recover();
        let outcome = policy::deliver(&registry, &mut recency, &payload);
        tracing::debug!(?outcome, "消息投递完成");
    });

    if let Err(err) = scheduled {
        tracing::debug!("主线程调度失败，消息已丢弃: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identify_frame_carries_the_identity_token() {
        assert_eq!(identify_frame("204"), r#"{"iam":"204"}"#);
    }

    #[test]
    fn http_endpoints_are_rewritten_to_websocket_schemes() {
        assert_eq!(ws_url("https://crm.example:3000"), "wss://crm.example:3000");
        assert_eq!(ws_url("http://crm.example:3000"), "ws://crm.example:3000");
        assert_eq!(ws_url("wss://crm.example:3000"), "wss://crm.example:3000");
    }

    #[test]
    fn backoff_grows_and_caps() {
        assert_eq!(backoff_ms(0), 500);
        assert_eq!(backoff_ms(1), 1_000);
        assert_eq!(backoff_ms(3), 4_000);
        assert_eq!(backoff_ms(6), 30_000);
        assert_eq!(backoff_ms(60), 30_000);
    }

    #[tokio::test(start_paused = true)]
    async fn identify_is_sent_exactly_once_after_the_settle_delay() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let task = tokio::spawn(send_identify_after_delay(tx, "204".to_string()));

        tokio::time::advance(Duration::from_millis(399)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        task.await.expect("identify task");
        assert_eq!(rx.try_recv().ok(), Some(r#"{"iam":"204"}"#.to_string()));
        assert!(rx.try_recv().is_err());
    }
}
