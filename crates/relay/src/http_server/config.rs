use std::net::SocketAddr;

use http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // The single origin allowed to call the relay
    pub frontend_origin: HeaderValue,
    // log level for http tracing
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, frontend_origin: &str) -> Result<Self, ConfigError> {
        // Origins are often copied out of a browser URL bar; a trailing
        // slash would never match the Origin header, so strip it.
        let frontend_origin = HeaderValue::from_str(frontend_origin.trim_end_matches('/'))
            .map_err(|_| ConfigError::Origin(frontend_origin.to_string()))?;
        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, frontend_origin={:?}",
            listen_addr,
            frontend_origin
        );
        Ok(Self {
            listen_addr,
            frontend_origin,
            log_level: tracing::Level::INFO,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frontend origin: {0}")]
    Origin(String),
    #[error("Invalid Socket Address: {0}")]
    ListenAddr(#[from] std::net::AddrParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = Config::new(
            "127.0.0.1:3001".parse().unwrap(),
            "https://securemediawithnft.netlify.app/",
        )
        .unwrap();
        assert_eq!(
            config.frontend_origin,
            HeaderValue::from_static("https://securemediawithnft.netlify.app")
        );
    }

    #[test]
    fn test_unparseable_origin_is_rejected() {
        let err = Config::new("127.0.0.1:3001".parse().unwrap(), "bad\norigin").unwrap_err();
        assert!(matches!(err, ConfigError::Origin(_)));
    }
}
