use crate::db::Database;
use crate::recognizer::files::{self, RegistryView};
use crate::recognizer::upload;
use crate::recognizer::ApiError;
use serde::Serialize;
use tauri::State;

use super::resolve_service;

#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub uploaded: Vec<String>,
    pub registry: RegistryView,
}

/// Upload the selected paths, then refetch the collection. If the upload
/// fails nothing is refreshed; the error is reported as-is.
#[tauri::command]
pub async fn upload_files(
    db: State<'_, Database>,
    paths: Vec<String>,
) -> Result<UploadOutcome, ApiError> {
    let inputs = upload::read_inputs(&paths)?;
    let config = resolve_service(&db);
    let uploaded = upload::upload(&config, inputs).await?;
    let registry = files::fetch_registry(&config).await?;
    Ok(UploadOutcome { uploaded, registry })
}
