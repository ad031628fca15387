use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{multipart, Client, RequestBuilder, Url};

use crate::http_server::client::ApiRequest;
use crate::ServiceState;

use super::UploadResponse;

const FILE_FIELD: &str = "file";

/// `POST /upload-svg`: pin a single multipart file, with its original
/// filename attached as pin-time metadata and a version-0 content
/// identifier. The whole file is buffered in memory for the request.
pub async fn handler(
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, FileError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("multipart parsing error: {}", e);
        FileError::Multipart
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == FILE_FIELD && file.is_none() {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| {
                    tracing::warn!("error reading file data for {}: {}", filename, e);
                    FileError::Multipart
                })?
                .to_vec();

            file = Some((filename, data));
        } else {
            tracing::warn!("ignoring unexpected field: {}", field_name);
        }
    }

    let (filename, data) = file.ok_or(FileError::NoFile)?;

    tracing::info!(file = %filename, size = data.len(), "uploading file");

    let ipfs_hash = state.pin_file(data, &filename).await.map_err(|e| {
        tracing::error!("failed to pin file {}: {}", filename, e);
        FileError::Upstream
    })?;

    tracing::info!(%ipfs_hash, "pinned file");
    Ok((http::StatusCode::OK, Json(UploadResponse { ipfs_hash })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("No file uploaded.")]
    NoFile,
    #[error("Invalid multipart form data.")]
    Multipart,
    #[error("Failed to upload SVG to Pinata.")]
    Upstream,
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let status = match &self {
            FileError::NoFile | FileError::Multipart => http::StatusCode::BAD_REQUEST,
            FileError::Upstream => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

// Client implementation - builds request for this operation
#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ApiRequest for FileUploadRequest {
    type Response = UploadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/upload-svg").unwrap();
        let part = multipart::Part::bytes(self.data).file_name(self.file_name);
        let form = multipart::Form::new().part(FILE_FIELD, part);
        client.post(full_url).multipart(form)
    }
}
