use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tracing::info;

use super::{ensure_success, unwrap_response, ApiError, ServiceConfig, StatsSnapshot};

/// Fetch the server-computed aggregate. Always a full refetch; the
/// aggregate is cheap relative to the correctness risk of a stale cache.
pub async fn fetch_stats(config: &ServiceConfig) -> Result<StatsSnapshot, ApiError> {
    let client = Client::new();
    let resp = client
        .get(config.endpoint("/visualization/stats"))
        .send()
        .await?;
    unwrap_response(resp).await
}

/// Stream the CSV export to a local file and return the bytes written. The
/// artifact itself is opaque to the client.
pub async fn download_csv(config: &ServiceConfig, dest: &Path) -> Result<u64, ApiError> {
    let client = Client::new();
    let resp = client
        .get(config.endpoint("/visualization/export/csv"))
        .send()
        .await?;
    let resp = ensure_success(resp).await?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| ApiError::Invalid(format!("Cannot create {}: {}", dest.display(), e)))?;

    let mut written: u64 = 0;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;
        tokio::io::AsyncWriteExt::write_all(&mut file, &chunk)
            .await
            .map_err(|e| ApiError::Invalid(format!("Failed to write to file: {}", e)))?;
    }

    info!(dest = %dest.display(), bytes = written, "CSV export saved");
    Ok(written)
}

/// URL of the HTML report page, opened externally by the caller.
pub fn report_url(config: &ServiceConfig) -> String {
    config.endpoint("/visualization/report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_url() {
        let config = ServiceConfig::new("http://localhost:8000");
        assert_eq!(
            report_url(&config),
            "http://localhost:8000/visualization/report"
        );
    }
}
