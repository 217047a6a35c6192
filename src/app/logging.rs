//! Usage: tracing initialization (console always; append-only file in debug mode).

use std::sync::OnceLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "crm-desk.log";

// The non-blocking writer stops flushing once its guard drops; pin it for
// the process lifetime.
static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

pub(crate) fn init(app: &tauri::AppHandle, debug: bool) {
    let _ = tracing_log::LogTracer::init();

    let default_filter = if debug {
        "crm_desk_lib=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    if debug {
        match crate::infra::app_paths::app_data_dir(app) {
            Ok(dir) => {
                let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_ansi(false)
                            .with_writer(writer),
                    )
                    .init();
                return;
            }
            Err(err) => {
                eprintln!("debug log file unavailable: {err}");
            }
        }
    }

    registry.init();
}
