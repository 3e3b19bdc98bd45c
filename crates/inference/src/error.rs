use thiserror::Error;

/// Configuration violations. Fatal: surfaced to the caller immediately,
/// never silently corrected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("score threshold must be in (0, 1), got {0}")]
    InvalidScoreThreshold(f32),

    #[error("IoU threshold must be in (0, 1), got {0}")]
    InvalidIouThreshold(f32),

    #[error("reg_max must be a positive bin count, got {0}")]
    InvalidRegMax(usize),

    #[error("num_classes must be positive, got {0}")]
    InvalidClassCount(usize),

    #[error("input size must be non-zero, got {0}x{1}")]
    InvalidInputSize(u32, u32),

    #[error("per-scale stride list must not be empty")]
    EmptyStrides,
}

/// Mismatches between the inference output and the configured model layout.
/// Fatal for the frame: decoding garbage is never an option.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("expected an even number of output tensors (reg/cls pairs), got {0}")]
    OddTensorCount(usize),

    #[error("{scales} output scales but {strides} strides configured")]
    StrideCountMismatch { scales: usize, strides: usize },

    #[error("scale {scale}: score tensor has {actual} channels, expected {expected} classes")]
    ClassCountMismatch {
        scale: usize,
        expected: usize,
        actual: usize,
    },

    #[error("scale {scale}: distribution tensor has {actual} channels, expected 4*reg_max = {expected}")]
    DistributionChannelMismatch {
        scale: usize,
        expected: usize,
        actual: usize,
    },

    #[error("scale {scale}: tensor grids disagree: {reg_rows}x{reg_cols} vs {cls_rows}x{cls_cols}")]
    GridMismatch {
        scale: usize,
        reg_rows: usize,
        reg_cols: usize,
        cls_rows: usize,
        cls_cols: usize,
    },
}
