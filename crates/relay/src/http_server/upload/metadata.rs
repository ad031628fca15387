use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::http_server::client::ApiRequest;
use crate::ServiceState;

use super::UploadResponse;

/// `POST /upload-metadata`: forward a JSON metadata document to the
/// pinning provider and relay the resulting content identifier.
pub async fn handler(
    State(state): State<ServiceState>,
    body: Bytes,
) -> Result<impl IntoResponse, MetadataError> {
    if body.is_empty() {
        tracing::warn!("metadata upload rejected: empty body");
        return Err(MetadataError::Missing);
    }

    let metadata: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("metadata upload rejected: {}", e);
        MetadataError::InvalidJson
    })?;

    // Only a non-null JSON object counts as metadata; `{}` is allowed.
    if !metadata.is_object() {
        tracing::warn!("metadata upload rejected: body is not a JSON object");
        return Err(MetadataError::Missing);
    }

    let ipfs_hash = state.pin_json(&metadata).await.map_err(|e| {
        tracing::error!("failed to pin metadata: {}", e);
        MetadataError::Upstream
    })?;

    tracing::info!(%ipfs_hash, "pinned metadata");
    Ok((http::StatusCode::OK, Json(UploadResponse { ipfs_hash })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("No metadata provided.")]
    Missing,
    #[error("Invalid JSON body.")]
    InvalidJson,
    #[error("Failed to upload metadata to Pinata.")]
    Upstream,
}

impl IntoResponse for MetadataError {
    fn into_response(self) -> Response {
        let status = match &self {
            MetadataError::Missing | MetadataError::InvalidJson => http::StatusCode::BAD_REQUEST,
            MetadataError::Upstream => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

// Client implementation - builds request for this operation
#[derive(Debug, Clone)]
pub struct MetadataUploadRequest(pub Value);

impl ApiRequest for MetadataUploadRequest {
    type Response = UploadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/upload-metadata").unwrap();
        client.post(full_url).json(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    use crate::pinata::tests::MockProvider;

    fn state(provider: MockProvider) -> ServiceState {
        ServiceState::new(Arc::new(provider), Duration::from_secs(5))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_metadata_is_pinned() {
        let state = state(MockProvider::Success("QmMeta".to_string()));
        let body = Bytes::from(r#"{"name": "token #1", "image": "ipfs://Qm..."}"#);

        let response = handler(State(state), body).await.into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(json_body(response).await["ipfsHash"], "QmMeta");
    }

    #[tokio::test]
    async fn test_empty_object_is_accepted() {
        let state = state(MockProvider::Success("QmEmpty".to_string()));
        let response = handler(State(state), Bytes::from("{}")).await.into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let state = state(MockProvider::Success("QmMeta".to_string()));
        let response = handler(State(state), Bytes::new()).await.into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No metadata provided.");
    }

    #[tokio::test]
    async fn test_null_body_is_rejected() {
        let state = state(MockProvider::Success("QmMeta".to_string()));
        let response = handler(State(state), Bytes::from("null")).await.into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No metadata provided.");
    }

    #[tokio::test]
    async fn test_scalar_body_is_rejected() {
        let state = state(MockProvider::Success("QmMeta".to_string()));
        let response = handler(State(state), Bytes::from("0")).await.into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No metadata provided.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let state = state(MockProvider::Success("QmMeta".to_string()));
        let response = handler(State(state), Bytes::from("{not json"))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Invalid JSON body.");
    }

    #[tokio::test]
    async fn test_provider_failure_is_masked() {
        let state = state(MockProvider::Failure);
        let response = handler(State(state), Bytes::from("{}")).await.into_response();
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to upload metadata to Pinata.");
        // the upstream error text must never reach the caller
        assert!(!body.to_string().contains("upstream exploded"));
    }
}
