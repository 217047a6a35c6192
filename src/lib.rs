mod app;
mod commands;
mod domain;
mod infra;
mod shared;

use app::{app_state, debug, logging, resident};
use commands::*;
use infra::{bootstrap, channel, settings, tauri_windows};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let debug_mode = debug::from_env();

    let builder = tauri::Builder::default()
        .manage(app_state::DeliveryState::default())
        .manage(app_state::DebugMode(debug_mode))
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init());

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        // Duplicate launch: surface the running instance, let the new one die.
        resident::show_primary_window(app);
    }));

    let app = builder
        .on_window_event(resident::on_window_event)
        .setup(move |app| {
            logging::init(app.handle(), debug_mode);
            if debug_mode {
                tracing::info!("调试模式已启用");
            }

            let bootstrap_warning = match bootstrap::seed_if_first_run(app.handle()) {
                Ok(bootstrap::BootstrapOutcome::Defaults { warning }) => Some(warning),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!("首次运行引导失败: {err}");
                    None
                }
            };

            let settings = match settings::read(app.handle()) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!("配置读取失败，使用默认值: {err}");
                    settings::AppSettings::default()
                }
            };

            // Shown modally before any window exists, so it cannot be lost
            // behind the primary window grabbing focus.
            if let Some(warning) = bootstrap_warning {
                use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
                app.dialog()
                    .message(warning)
                    .title("CRM Desk")
                    .kind(MessageDialogKind::Warning)
                    .blocking_show();
            }

            #[cfg(desktop)]
            {
                if let Err(err) = resident::setup_tray(app.handle()) {
                    tracing::error!("系统托盘初始化失败: {err}");
                }
            }

            if let Err(err) = tauri_windows::create_primary_window(app.handle(), &settings) {
                tracing::error!("主窗口创建失败: {err}");
            }

            channel::spawn(
                app.handle().clone(),
                settings.server_url.clone(),
                settings.internal_phone.clone(),
            );

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            settings_get,
            settings_set,
            app_about_get,
            app_exit,
            open_default_window,
            open_target_window
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|_app_handle, event| {
        if let tauri::RunEvent::ExitRequested { api, code, .. } = &event {
            // The shell stays resident in the tray; only an explicit quit
            // (tray menu / app_exit) carries an exit code.
            if code.is_none() {
                api.prevent_exit();
            }
        }
    });
}
