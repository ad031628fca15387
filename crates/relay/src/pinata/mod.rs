mod client;

pub use client::PinataClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// A remote service that stores content addressed by a content
/// identifier and keeps it available ("pinned") on IPFS.
///
/// Handlers only see this trait so they can be exercised against a
/// substitute provider in tests.
#[async_trait]
pub trait PinningProvider: Send + Sync {
    /// Pin a JSON document, returning its content identifier.
    async fn pin_json(&self, content: &Value) -> Result<String, PinError>;

    /// Pin raw bytes under the given name, returning the content identifier.
    async fn pin_file(&self, data: Vec<u8>, name: &str) -> Result<String, PinError>;
}

pub type DynPinningProvider = Arc<dyn PinningProvider>;

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid API credentials: {0}")]
    Credentials(#[from] reqwest::header::InvalidHeaderValue),
    #[error("HTTP status {0}: {1}")]
    Status(reqwest::StatusCode, String),
    #[error("pinning request timed out")]
    Timeout,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Scripted provider for handler tests.
    pub(crate) enum MockProvider {
        Success(String),
        Failure,
        Hang,
    }

    impl MockProvider {
        async fn respond(&self) -> Result<String, PinError> {
            match self {
                MockProvider::Success(hash) => Ok(hash.clone()),
                MockProvider::Failure => Err(PinError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream exploded".to_string(),
                )),
                MockProvider::Hang => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    #[async_trait]
    impl PinningProvider for MockProvider {
        async fn pin_json(&self, _content: &Value) -> Result<String, PinError> {
            self.respond().await
        }

        async fn pin_file(&self, _data: Vec<u8>, _name: &str) -> Result<String, PinError> {
            self.respond().await
        }
    }
}
