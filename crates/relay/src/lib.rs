// Service modules (relay functionality)
pub mod http_server;
pub mod pinata;
pub mod process;
pub mod service_config;
pub mod service_state;

// Re-exports for consumers
pub use process::{spawn_service, start_service, ShutdownHandle};
pub use service_config::{Config as ServiceConfig, ConfigError, PinataConfig};
pub use service_state::State as ServiceState;
