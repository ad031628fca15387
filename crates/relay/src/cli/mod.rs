pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Health, Serve, UploadMetadata, UploadSvg, Version};
