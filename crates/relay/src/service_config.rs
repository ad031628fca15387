use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_API_URL: &str = "https://api.pinata.cloud";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for the Pinata pinning API.
#[derive(Clone)]
pub struct PinataConfig {
    pub api_key: String,
    pub secret_api_key: String,
    /// Base URL of the pinning API, overridable for testing
    pub api_url: Url,
}

// Credentials must never end up in logs.
impl std::fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_key", &"<redacted>")
            .field("secret_api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug)]
pub struct Config {
    // http server configuration
    /// Port for the relay HTTP server
    pub port: u16,
    /// The single origin allowed by CORS, exact string match
    pub frontend_origin: String,

    // pinning provider configuration
    pub pinata: PinataConfig,
    /// Deadline applied to every provider call
    pub upstream_timeout: Duration,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present,
    /// so local setups can keep credentials out of the shell profile.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let port = parse_or_default("PORT", DEFAULT_PORT)?;
        let frontend_origin = require("FRONTEND_ORIGIN")?;
        let api_key = require("PINATA_API_KEY")?;
        let secret_api_key = require("PINATA_SECRET_API_KEY")?;
        let api_url = match std::env::var("PINATA_API_URL") {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => Url::parse(DEFAULT_API_URL).expect("default API URL must parse"),
        };
        let timeout_secs =
            parse_or_default("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;

        Ok(Self {
            port,
            frontend_origin,
            pinata: PinataConfig {
                api_key,
                secret_api_key,
                api_url,
            },
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_level: tracing::Level::INFO,
            log_dir: None,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_or_default<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
