pub mod health;
pub mod serve;
pub mod upload;
pub mod version;

pub use health::Health;
pub use serve::Serve;
pub use upload::{UploadMetadata, UploadSvg};
pub use version::Version;
