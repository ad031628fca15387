use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::pinata::{DynPinningProvider, PinError, PinataClient};
use crate::ServiceConfig;

/// Shared handler state: the pinning provider plus the deadline
/// applied to every provider call. Constructed once at startup and
/// cloned into each handler.
#[derive(Clone)]
pub struct State {
    provider: DynPinningProvider,
    upstream_timeout: Duration,
}

impl State {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StateError> {
        let provider = PinataClient::new(&config.pinata)?;
        Ok(Self {
            provider: Arc::new(provider),
            upstream_timeout: config.upstream_timeout,
        })
    }

    /// Build state around a substitute provider.
    pub fn new(provider: DynPinningProvider, upstream_timeout: Duration) -> Self {
        Self {
            provider,
            upstream_timeout,
        }
    }

    /// Pin a JSON document, bounded by the configured deadline.
    pub async fn pin_json(&self, content: &serde_json::Value) -> Result<String, PinError> {
        match timeout(self.upstream_timeout, self.provider.pin_json(content)).await {
            Ok(result) => result,
            Err(_) => Err(PinError::Timeout),
        }
    }

    /// Pin raw bytes under the given name, bounded by the configured deadline.
    pub async fn pin_file(&self, data: Vec<u8>, name: &str) -> Result<String, PinError> {
        match timeout(self.upstream_timeout, self.provider.pin_file(data, name)).await {
            Ok(result) => result,
            Err(_) => Err(PinError::Timeout),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build pinning client: {0}")]
    Provider(#[from] PinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pinata::tests::MockProvider;

    #[tokio::test]
    async fn test_pin_json_passes_through() {
        let state = State::new(
            Arc::new(MockProvider::Success("QmTest".to_string())),
            Duration::from_secs(5),
        );
        let hash = state.pin_json(&serde_json::json!({})).await.unwrap();
        assert_eq!(hash, "QmTest");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_provider_hits_deadline() {
        let state = State::new(Arc::new(MockProvider::Hang), Duration::from_millis(100));
        let err = state.pin_json(&serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, PinError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pin_file_hits_deadline() {
        let state = State::new(Arc::new(MockProvider::Hang), Duration::from_millis(100));
        let err = state.pin_file(b"<svg/>".to_vec(), "art.svg").await.unwrap_err();
        assert!(matches!(err, PinError::Timeout));
    }
}
