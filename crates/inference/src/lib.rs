pub mod backend;
pub mod config;
pub mod decoder;
pub mod error;
pub mod nms;
pub mod palette;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use backend::InferenceBackend;
pub use config::DetectorConfig;
pub use decoder::{BoxDecoder, Detection};
pub use error::{ConfigError, DecodeError};
pub use palette::ClassPalette;
pub use pipeline::DetectionPipeline;
