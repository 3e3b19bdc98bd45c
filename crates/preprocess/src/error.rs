use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("invalid target shape {width}x{height}: dimensions must be non-zero")]
    InvalidTargetShape { width: u32, height: u32 },

    #[error("invalid source shape {width}x{height}: dimensions must be non-zero")]
    InvalidSourceShape { width: u32, height: u32 },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("NV12 conversion requires even dimensions, got {width}x{height}")]
    OddDimensions { width: u32, height: u32 },

    #[error(transparent)]
    ImageBuffer(#[from] fast_image_resize::ImageBufferError),

    #[error(transparent)]
    Resize(#[from] fast_image_resize::ResizeError),
}
