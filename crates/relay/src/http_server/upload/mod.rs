use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

pub mod file;
pub mod metadata;

use crate::ServiceState;

/// Success envelope shared by both upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "ipfsHash")]
    pub ipfs_hash: String,
}

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/upload-metadata", post(metadata::handler))
        .route("/upload-svg", post(file::handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_uses_camel_case_on_the_wire() {
        let response = UploadResponse {
            ipfs_hash: "QmTest".to_string(),
        };
        let raw = serde_json::to_string(&response).unwrap();
        assert_eq!(raw, r#"{"ipfsHash":"QmTest"}"#);
    }
}
