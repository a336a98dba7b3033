use std::collections::HashMap;

use reqwest::Client;
use serde::Serialize;
use tracing::info;

use super::{unwrap_response, ApiError, FileRecord, InferenceResult, ServiceConfig};

/// Outcome of a batch recognition run. `Empty` means there was nothing to
/// recognize and no request was issued; it is informational, not a failure.
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchRecognition {
    Empty,
    Done { results: Vec<InferenceResult> },
}

/// Trigger recognition for a single file. The call returns once the service
/// has produced ranked predictions or failed.
pub async fn recognize_one(config: &ServiceConfig, id: u64) -> Result<InferenceResult, ApiError> {
    let client = Client::new();
    let resp = client
        .post(config.endpoint(&format!("/inference/{}", id)))
        .send()
        .await?;
    unwrap_response(resp).await
}

/// Trigger recognition for a set of files as one request. The id sequence
/// travels as a single JSON payload so the service can schedule the whole
/// batch as one unit of work.
pub async fn recognize_many(
    config: &ServiceConfig,
    ids: &[u64],
) -> Result<BatchRecognition, ApiError> {
    if ids.is_empty() {
        return Ok(BatchRecognition::Empty);
    }

    info!(count = ids.len(), "running batch recognition");
    let client = Client::new();
    let resp = client
        .post(config.endpoint("/inference/batch"))
        .json(&ids)
        .send()
        .await?;
    let results: Vec<InferenceResult> = unwrap_response(resp).await?;
    Ok(BatchRecognition::Done {
        results: align_to_request(ids, results),
    })
}

/// Reorder batch results to match the requested id order. The service does
/// not guarantee response ordering and may return fewer entries than were
/// requested; entries are matched by id and missing ids are dropped.
pub(crate) fn align_to_request(
    ids: &[u64],
    results: Vec<InferenceResult>,
) -> Vec<InferenceResult> {
    let mut by_id: HashMap<u64, InferenceResult> =
        results.into_iter().map(|r| (r.id, r)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Ids of files still awaiting recognition.
pub fn unprocessed_ids(files: &[FileRecord]) -> Vec<u64> {
    files
        .iter()
        .filter(|f| !f.processed)
        .map(|f| f.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64) -> InferenceResult {
        InferenceResult {
            id,
            filename: format!("car{}.jpg", id),
            predictions: Vec::new(),
        }
    }

    fn record(id: u64, processed: bool) -> FileRecord {
        FileRecord {
            id,
            filename: format!("car{}.jpg", id),
            size_bytes: 1024,
            upload_date: "2024-05-01T12:00:00".into(),
            processed,
            results: None,
        }
    }

    #[test]
    fn test_results_align_to_requested_order() {
        let aligned = align_to_request(&[3, 1, 2], vec![result(1), result(3), result(2)]);
        let ids: Vec<u64> = aligned.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_alignment_tolerates_short_response() {
        let aligned = align_to_request(&[3, 1, 2], vec![result(2)]);
        let ids: Vec<u64> = aligned.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_alignment_drops_unrequested_ids() {
        let aligned = align_to_request(&[1], vec![result(1), result(99)]);
        let ids: Vec<u64> = aligned.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_unprocessed_ids_filters_processed() {
        let files = vec![record(1, true), record(2, false), record(3, false)];
        assert_eq!(unprocessed_ids(&files), vec![2, 3]);
    }

    #[test]
    fn test_empty_id_set_short_circuits_without_network() {
        // Nothing listens on this address; the call must return before any
        // request is built.
        let config = ServiceConfig::new("http://127.0.0.1:9");
        let outcome = futures::executor::block_on(recognize_many(&config, &[])).unwrap();
        assert!(matches!(outcome, BatchRecognition::Empty));
    }
}
