use crate::db::Database;
use crate::recognizer::files::{self, RegistryView};
use crate::recognizer::{ApiError, FileRecord};
use tauri::State;

use super::resolve_service;

#[tauri::command]
pub async fn list_files(db: State<'_, Database>) -> Result<RegistryView, ApiError> {
    let config = resolve_service(&db);
    files::fetch_registry(&config).await
}

#[tauri::command]
pub async fn get_file(db: State<'_, Database>, id: u64) -> Result<FileRecord, ApiError> {
    if id == 0 {
        return Err(ApiError::Invalid("Enter a valid file ID.".to_string()));
    }
    let config = resolve_service(&db);
    files::get_file(&config, id).await
}

/// Delete a file, then refetch the collection. No optimistic local removal:
/// the refreshed view is the only thing the frontend renders from.
#[tauri::command]
pub async fn delete_file(db: State<'_, Database>, id: u64) -> Result<RegistryView, ApiError> {
    if id == 0 {
        return Err(ApiError::Invalid("Enter a valid file ID.".to_string()));
    }
    let config = resolve_service(&db);
    files::delete_file(&config, id).await?;
    files::fetch_registry(&config).await
}

#[tauri::command]
pub async fn delete_all_files(db: State<'_, Database>) -> Result<RegistryView, ApiError> {
    let config = resolve_service(&db);
    files::delete_all_files(&config).await?;
    files::fetch_registry(&config).await
}

#[tauri::command]
pub async fn reprocess_file(db: State<'_, Database>, id: u64) -> Result<RegistryView, ApiError> {
    if id == 0 {
        return Err(ApiError::Invalid("Enter a valid file ID.".to_string()));
    }
    let config = resolve_service(&db);
    files::reprocess_file(&config, id).await?;
    files::fetch_registry(&config).await
}
