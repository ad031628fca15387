use std::path::PathBuf;

use clap::Args;

use pin_relay::http_server::client::ApiError;
use pin_relay::http_server::upload::file::FileUploadRequest;
use pin_relay::http_server::upload::metadata::MetadataUploadRequest;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("invalid JSON in {}: {}", .0.display(), .1)]
    Json(PathBuf, serde_json::Error),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[derive(Args, Debug, Clone)]
pub struct UploadMetadata {
    /// Path to a JSON file containing the metadata document
    #[arg(long)]
    pub file: PathBuf,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for UploadMetadata {
    type Error = UploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = tokio::fs::read(&self.file)
            .await
            .map_err(|e| UploadError::Io(self.file.clone(), e))?;
        let metadata = serde_json::from_slice(&raw)
            .map_err(|e| UploadError::Json(self.file.clone(), e))?;

        let response = ctx.client.call(MetadataUploadRequest(metadata)).await?;
        Ok(response.ipfs_hash)
    }
}

#[derive(Args, Debug, Clone)]
pub struct UploadSvg {
    /// Path to the file to pin
    #[arg(long)]
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for UploadSvg {
    type Error = UploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| UploadError::Io(self.path.clone(), e))?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let response = ctx.client.call(FileUploadRequest { file_name, data }).await?;
        Ok(response.ipfs_hash)
    }
}
