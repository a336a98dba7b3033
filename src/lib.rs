mod commands;
mod db;
mod recognizer;

use db::Database;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_dir = app.path().app_data_dir()?;
            let database =
                Database::new(&app_dir).expect("Failed to initialize database");
            app.manage(database);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::files::list_files,
            commands::files::get_file,
            commands::files::delete_file,
            commands::files::delete_all_files,
            commands::files::reprocess_file,
            commands::upload::upload_files,
            commands::inference::recognize_file,
            commands::inference::recognize_pending,
            commands::stats::get_stats,
            commands::stats::export_csv,
            commands::stats::open_report,
            commands::settings::get_settings,
            commands::settings::set_setting,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
