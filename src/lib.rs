pub mod core;
pub mod plugins;
pub mod settings;
pub mod shared;

use plugins::{filter, menu, rating};
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // Segunda instância: apenas foca a janela existente
            if let Some(window) = app.get_webview_window("main") {
                let _ = window.show();
                let _ = window.set_focus();
            }
        }))
        .plugin(tauri_plugin_notification::init())
        .invoke_handler(tauri::generate_handler![
            filter::commands::filter_init,
            filter::commands::filter_toggle,
            menu::commands::menu_get_dishes,
            menu::commands::menu_get_dish,
            menu::commands::menu_rate_dish,
            rating::rating_clicked,
            settings::get_settings,
            settings::update_settings,
            core::logging::log_from_frontend,
        ])
        .setup(|app| {
            // Initialize logging first (before any other initialization)
            let logging_guards = core::logging::init_logging();
            app.manage(core::logging::LoggingState::new(logging_guards));

            let store = menu::init_menu_store()
                .map_err(|e| format!("Failed to initialize menu store: {}", e))?;
            app.manage(store);

            // Filter state stays empty until the page binds it
            app.manage(filter::FilterStore::default());

            // The watcher must outlive setup; keep it in managed state
            let menu_watcher = menu::watcher::MenuFileWatcher::new(app.handle().clone())
                .map_err(|e| format!("Failed to start menu watcher: {}", e))?;
            app.manage(std::sync::Mutex::new(menu_watcher));

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
