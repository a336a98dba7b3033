pub mod files;
pub mod inference;
pub mod stats;
pub mod upload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Connection settings for the remote recognizer service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// One ranked label produced by the classification model. The service
/// returns predictions ordered best-first; the client never re-sorts them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// Server-side metadata for one uploaded image. The client holds this as a
/// read-only snapshot and refetches after every mutating call instead of
/// patching it locally.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileRecord {
    pub id: u64,
    pub filename: String,
    pub size_bytes: u64,
    pub upload_date: String,
    pub processed: bool,
    #[serde(default)]
    pub results: Option<Vec<Prediction>>,
}

/// Recognition output for one file, from either the single or the batch
/// inference endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InferenceResult {
    pub id: u64,
    pub filename: String,
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BrandCount {
    pub label: String,
    pub count: u64,
}

/// Aggregate counts computed server-side over the whole collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatsSnapshot {
    pub total_files: u64,
    pub processed_files: u64,
    pub unprocessed_files: u64,
    pub top_brands: Vec<BrandCount>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Error body shape used by the service on every non-success status.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Extract a human-readable reason from a failed response body, falling back
/// to the status description when the body carries no structured detail.
fn failure_reason(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}

/// Turn a non-success response into `ApiError::Api`, passing success through.
pub(crate) async fn ensure_success(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: failure_reason(status, &body),
    })
}

/// Decode a response as `T` on success, or produce the structured failure
/// reason. All service calls funnel through here so callers see one shape.
pub(crate) async fn unwrap_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let resp = ensure_success(resp).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
