use crate::db::Database;
use crate::recognizer::files::{self, RegistryView};
use crate::recognizer::inference::{self, BatchRecognition};
use crate::recognizer::{ApiError, InferenceResult};
use serde::Serialize;
use tauri::State;

use super::resolve_service;

/// At most this many ranked predictions are surfaced per file. The service
/// returns them best-first; truncation never re-sorts.
const TOP_PREDICTIONS: usize = 3;

fn truncate_ranked(result: &mut InferenceResult) {
    result.predictions.truncate(TOP_PREDICTIONS);
}

#[derive(Debug, Serialize)]
pub struct RecognitionOutcome {
    pub result: InferenceResult,
    pub registry: RegistryView,
}

/// Batch outcome for the frontend. `Empty` renders as an informational
/// note, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PendingRecognition {
    Empty,
    Done {
        results: Vec<InferenceResult>,
        registry: RegistryView,
    },
}

/// Recognize one file, then refetch the collection (its `processed` flag
/// just changed server-side). On failure, report only; no refresh.
#[tauri::command]
pub async fn recognize_file(
    db: State<'_, Database>,
    id: u64,
) -> Result<RecognitionOutcome, ApiError> {
    if id == 0 {
        return Err(ApiError::Invalid("Enter a valid file ID.".to_string()));
    }
    let config = resolve_service(&db);
    let mut result = inference::recognize_one(&config, id).await?;
    truncate_ranked(&mut result);
    let registry = files::fetch_registry(&config).await?;
    Ok(RecognitionOutcome { result, registry })
}

/// Recognize everything still unprocessed. The id set is computed from a
/// snapshot fetched immediately before the batch call, never a stale one,
/// and the registry is refetched once more after the batch completes.
#[tauri::command]
pub async fn recognize_pending(
    db: State<'_, Database>,
) -> Result<PendingRecognition, ApiError> {
    let config = resolve_service(&db);
    let current = files::list_files(&config).await?;
    let ids = inference::unprocessed_ids(&current);
    match inference::recognize_many(&config, &ids).await? {
        BatchRecognition::Empty => Ok(PendingRecognition::Empty),
        BatchRecognition::Done { mut results } => {
            results.iter_mut().for_each(truncate_ranked);
            let registry = files::fetch_registry(&config).await?;
            Ok(PendingRecognition::Done { results, registry })
        }
    }
}
