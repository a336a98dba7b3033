use std::path::Path;

use crate::db::Database;
use crate::recognizer::stats;
use crate::recognizer::{ApiError, StatsSnapshot};
use tauri::State;
use tauri_plugin_opener::OpenerExt;

use super::resolve_service;

#[tauri::command]
pub async fn get_stats(db: State<'_, Database>) -> Result<StatsSnapshot, ApiError> {
    let config = resolve_service(&db);
    stats::fetch_stats(&config).await
}

/// Save the CSV export to a path picked by the user. Returns bytes written.
#[tauri::command]
pub async fn export_csv(db: State<'_, Database>, dest_path: String) -> Result<u64, ApiError> {
    if dest_path.is_empty() {
        return Err(ApiError::Invalid("No destination selected.".to_string()));
    }
    let config = resolve_service(&db);
    stats::download_csv(&config, Path::new(&dest_path)).await
}

/// Open the service's HTML report in the system browser.
#[tauri::command]
pub async fn open_report(
    app: tauri::AppHandle,
    db: State<'_, Database>,
) -> Result<(), ApiError> {
    let config = resolve_service(&db);
    let url = stats::report_url(&config);
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| ApiError::Invalid(format!("Cannot open report page: {}", e)))
}
