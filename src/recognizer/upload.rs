use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{unwrap_response, ApiError, ServiceConfig};

/// One local file queued for upload.
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadInput {
    fn into_part(self) -> Result<Part, ApiError> {
        let mime = mime_type_for(&self.filename);
        Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str(mime)
            .map_err(|e| ApiError::Invalid(format!("Invalid MIME type '{}': {}", mime, e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UploadRoute {
    Single,
    Batch,
}

/// The two upload endpoints take different multipart shapes (one `file`
/// field vs. a repeated `files` field); the choice is purely a function of
/// how many inputs there are.
pub(crate) fn route_for(count: usize) -> UploadRoute {
    if count == 1 {
        UploadRoute::Single
    } else {
        UploadRoute::Batch
    }
}

fn mime_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    files: Vec<AcceptedFile>,
}

/// Only `filename` is contractual across both upload endpoints; the rest of
/// the descriptor differs and is ignored.
#[derive(Deserialize)]
struct AcceptedFile {
    filename: String,
}

/// Read the selected paths into named binary inputs. Fails up front if the
/// selection is empty or any path is unreadable, before anything is sent.
pub fn read_inputs(paths: &[String]) -> Result<Vec<UploadInput>, ApiError> {
    if paths.is_empty() {
        return Err(ApiError::Invalid("No files selected.".to_string()));
    }
    let mut inputs = Vec::with_capacity(paths.len());
    for raw in paths {
        let path = Path::new(raw);
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Invalid(format!("Invalid file path: {}", raw)))?
            .to_string();
        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::Invalid(format!("Cannot read {}: {}", raw, e)))?;
        inputs.push(UploadInput { filename, bytes });
    }
    Ok(inputs)
}

/// Upload one or more files and return the filenames the service accepted.
/// Success or failure is whole-call: the single path has no partial mode,
/// and a failed batch call reports nothing as uploaded.
pub async fn upload(
    config: &ServiceConfig,
    inputs: Vec<UploadInput>,
) -> Result<Vec<String>, ApiError> {
    if inputs.is_empty() {
        return Err(ApiError::Invalid("No files selected.".to_string()));
    }

    let (path, field) = match route_for(inputs.len()) {
        UploadRoute::Single => ("/upload/", "file"),
        UploadRoute::Batch => ("/upload/batch", "files"),
    };
    info!(count = inputs.len(), endpoint = path, "uploading files");

    let mut form = Form::new();
    for input in inputs {
        form = form.part(field, input.into_part()?);
    }

    let client = Client::new();
    let resp = client
        .post(config.endpoint(path))
        .multipart(form)
        .send()
        .await?;
    let data: UploadResponse = unwrap_response(resp).await?;
    Ok(data.files.into_iter().map(|f| f.filename).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_route_is_a_function_of_input_count() {
        assert_eq!(route_for(1), UploadRoute::Single);
        assert_eq!(route_for(2), UploadRoute::Batch);
        assert_eq!(route_for(17), UploadRoute::Batch);
    }

    #[test]
    fn test_mime_type_for_known_extensions() {
        assert_eq!(mime_type_for("car1.jpg"), "image/jpeg");
        assert_eq!(mime_type_for("CAR2.JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("shot.png"), "image/png");
        assert_eq!(mime_type_for("notes.txt"), "application/octet-stream");
        assert_eq!(mime_type_for("noextension"), "application/octet-stream");
    }

    #[test]
    fn test_read_inputs_rejects_empty_selection() {
        let err = read_inputs(&[]).unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }

    #[test]
    fn test_read_inputs_rejects_missing_path() {
        let paths = vec!["/definitely/not/here/car.jpg".to_string()];
        let err = read_inputs(&paths).unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }

    #[test]
    fn test_read_inputs_preserves_bytes_and_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("car1.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"\xFF\xD8\xFF\xE0fakejpeg").unwrap();

        let inputs = read_inputs(&[path.to_string_lossy().to_string()]).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].filename, "car1.jpg");
        assert_eq!(inputs[0].bytes, b"\xFF\xD8\xFF\xE0fakejpeg");
    }
}
