use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::service_config::PinataConfig;

use super::{PinError, PinningProvider};

const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";
const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";

/// Client for the legacy Pinata pinning API, authenticated with the
/// key/secret header pair. Built once at startup and shared across
/// requests.
#[derive(Debug, Clone)]
pub struct PinataClient {
    api_url: Url,
    client: Client,
}

/// Successful pin response; only the hash is relayed to callers.
#[derive(Debug, Clone, Deserialize)]
pub struct PinReceipt {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pub pin_size: Option<u64>,
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<String>,
}

impl PinataClient {
    pub fn new(config: &PinataConfig) -> Result<Self, PinError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("pinata_api_key", HeaderValue::from_str(&config.api_key)?);
        let mut secret = HeaderValue::from_str(&config.secret_api_key)?;
        secret.set_sensitive(true);
        default_headers.insert("pinata_secret_api_key", secret);

        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        // the base URL is validated at config load, joining a fixed path cannot fail
        self.api_url.join(path).expect("pinning API path must join")
    }

    async fn receipt(response: reqwest::Response) -> Result<String, PinError> {
        if response.status().is_success() {
            let receipt = response.json::<PinReceipt>().await?;
            Ok(receipt.ipfs_hash)
        } else {
            Err(PinError::Status(
                response.status(),
                response.text().await?,
            ))
        }
    }
}

#[async_trait]
impl PinningProvider for PinataClient {
    async fn pin_json(&self, content: &Value) -> Result<String, PinError> {
        let body = json!({ "pinataContent": content });
        let response = self
            .client
            .post(self.endpoint(PIN_JSON_PATH))
            .json(&body)
            .send()
            .await?;
        Self::receipt(response).await
    }

    async fn pin_file(&self, data: Vec<u8>, name: &str) -> Result<String, PinError> {
        let mime = mime_guess::from_path(name).first_or_octet_stream();
        let part = multipart::Part::bytes(data)
            .file_name(name.to_string())
            .mime_str(mime.as_ref())?;

        // The original filename doubles as the pin-time metadata name;
        // cidVersion 0 keeps identifiers compatible with existing clients.
        let form = multipart::Form::new()
            .part("file", part)
            .text("pinataMetadata", json!({ "name": name }).to_string())
            .text("pinataOptions", json!({ "cidVersion": 0 }).to_string());

        let response = self
            .client
            .post(self.endpoint(PIN_FILE_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::receipt(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_receipt_deserializes_pascal_case() {
        let raw = r#"{
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 1234,
            "Timestamp": "2024-01-01T00:00:00.000Z"
        }"#;
        let receipt: PinReceipt = serde_json::from_str(raw).unwrap();
        assert_eq!(
            receipt.ipfs_hash,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
        assert_eq!(receipt.pin_size, Some(1234));
    }

    #[test]
    fn test_pin_receipt_tolerates_missing_optionals() {
        let raw = r#"{"IpfsHash": "QmTest"}"#;
        let receipt: PinReceipt = serde_json::from_str(raw).unwrap();
        assert_eq!(receipt.ipfs_hash, "QmTest");
        assert_eq!(receipt.pin_size, None);
        assert_eq!(receipt.timestamp, None);
    }

    #[test]
    fn test_endpoint_joins_pinning_paths() {
        let config = PinataConfig {
            api_key: "key".to_string(),
            secret_api_key: "secret".to_string(),
            api_url: Url::parse("https://api.pinata.cloud").unwrap(),
        };
        let client = PinataClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(PIN_JSON_PATH).as_str(),
            "https://api.pinata.cloud/pinning/pinJSONToIPFS"
        );
        assert_eq!(
            client.endpoint(PIN_FILE_PATH).as_str(),
            "https://api.pinata.cloud/pinning/pinFileToIPFS"
        );
    }
}
