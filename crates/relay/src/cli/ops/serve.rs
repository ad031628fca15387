use clap::Args;

use pin_relay::{spawn_service, ConfigError, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Override the listen port (default from PORT or 3001)
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the allowed frontend origin (default from FRONTEND_ORIGIN)
    #[arg(long)]
    pub origin: Option<String>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = ServiceConfig::from_env()?;

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(origin) = &self.origin {
            config.frontend_origin = origin.clone();
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir.clone();
        }

        spawn_service(&config).await;
        Ok("relay ended".to_string())
    }
}
