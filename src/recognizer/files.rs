use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{unwrap_response, ApiError, FileRecord, ServiceConfig};

/// Snapshot of the remote file collection plus the summary counts derived
/// from it. Always rebuilt from a fresh fetch, never patched in place.
#[derive(Debug, Serialize, Clone)]
pub struct RegistryView {
    pub files: Vec<FileRecord>,
    pub total: usize,
    pub processed: usize,
    pub unprocessed: usize,
}

impl RegistryView {
    pub fn from_files(files: Vec<FileRecord>) -> Self {
        let total = files.len();
        let processed = files.iter().filter(|f| f.processed).count();
        Self {
            total,
            processed,
            unprocessed: total - processed,
            files,
        }
    }
}

/// Acknowledgement body returned by the management endpoints.
#[derive(Deserialize)]
struct Acknowledgement {
    message: String,
}

pub async fn list_files(config: &ServiceConfig) -> Result<Vec<FileRecord>, ApiError> {
    let client = Client::new();
    let resp = client.get(config.endpoint("/files/")).send().await?;
    unwrap_response(resp).await
}

pub async fn fetch_registry(config: &ServiceConfig) -> Result<RegistryView, ApiError> {
    Ok(RegistryView::from_files(list_files(config).await?))
}

pub async fn get_file(config: &ServiceConfig, id: u64) -> Result<FileRecord, ApiError> {
    let client = Client::new();
    let resp = client
        .get(config.endpoint(&format!("/files/{}", id)))
        .send()
        .await?;
    unwrap_response(resp).await
}

pub async fn delete_file(config: &ServiceConfig, id: u64) -> Result<(), ApiError> {
    let client = Client::new();
    let resp = client
        .delete(config.endpoint(&format!("/files/{}", id)))
        .send()
        .await?;
    let ack: Acknowledgement = unwrap_response(resp).await?;
    info!(id, message = %ack.message, "file deleted");
    Ok(())
}

pub async fn delete_all_files(config: &ServiceConfig) -> Result<(), ApiError> {
    let client = Client::new();
    let resp = client.delete(config.endpoint("/files/")).send().await?;
    let ack: Acknowledgement = unwrap_response(resp).await?;
    info!(message = %ack.message, "workspace cleared");
    Ok(())
}

/// Ask the service to reset results for a file. The service flips
/// `processed` back to false; the caller refetches to observe it.
pub async fn reprocess_file(config: &ServiceConfig, id: u64) -> Result<FileRecord, ApiError> {
    let client = Client::new();
    let resp = client
        .post(config.endpoint(&format!("/files/{}/reprocess", id)))
        .send()
        .await?;
    unwrap_response(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_registry_counts_sum_to_total() {
        let view = RegistryView::from_files(vec![
            record(1, true),
            record(2, false),
            record(3, false),
            record(4, true),
            record(5, false),
        ]);
        assert_eq!(view.total, 5);
        assert_eq!(view.processed, 2);
        assert_eq!(view.unprocessed, 3);
        assert_eq!(view.processed + view.unprocessed, view.total);
    }

    #[test]
    fn test_registry_view_of_empty_collection() {
        let view = RegistryView::from_files(Vec::new());
        assert_eq!(view.total, 0);
        assert_eq!(view.processed, 0);
        assert_eq!(view.unprocessed, 0);
        assert!(view.files.is_empty());
    }
}
