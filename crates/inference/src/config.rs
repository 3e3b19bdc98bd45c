use crate::error::ConfigError;
use std::env;

pub use common::Environment;
use common::env_or;
use preprocess::ResizePolicy;

/// Read-only detector configuration, supplied once per run.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub environment: Environment,
    /// Confidence gate: cells must score strictly above this to be kept.
    pub score_threshold: f32,
    /// Greedy suppression threshold on pairwise IoU.
    pub iou_threshold: f32,
    /// DFL bin count per box edge.
    pub reg_max: usize,
    pub num_classes: usize,
    /// Network input size as (width, height).
    pub input_size: (u32, u32),
    /// Spatial stride of each feature-map scale, in output order.
    pub strides: Vec<u32>,
    pub pad_color: u8,
    pub resize_policy: ResizePolicy,
}

impl DetectorConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let strides = env::var("STRIDES")
            .ok()
            .map(|s| {
                s.split(',')
                    .filter_map(|part| part.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_else(|| vec![8, 16, 32]);

        let resize_policy = match env::var("RESIZE_POLICY")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "top_left" | "topleft" => ResizePolicy::TopLeft,
            _ => ResizePolicy::Letterbox,
        };

        let config = Self {
            environment,
            score_threshold: env_or("SCORE_THRESHOLD", 0.4),
            iou_threshold: env_or("IOU_THRESHOLD", 0.65),
            reg_max: env_or("REG_MAX", 16),
            num_classes: env_or("NUM_CLASSES", 80),
            input_size: (env_or("INPUT_WIDTH", 640), env_or("INPUT_HEIGHT", 640)),
            strides,
            pad_color: env_or("PAD_COLOR", 114),
            resize_policy,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject invalid configurations up front rather than mis-decoding later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.score_threshold > 0.0 && self.score_threshold < 1.0) {
            return Err(ConfigError::InvalidScoreThreshold(self.score_threshold));
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold < 1.0) {
            return Err(ConfigError::InvalidIouThreshold(self.iou_threshold));
        }
        if self.reg_max == 0 {
            return Err(ConfigError::InvalidRegMax(self.reg_max));
        }
        if self.num_classes == 0 {
            return Err(ConfigError::InvalidClassCount(self.num_classes));
        }
        if self.input_size.0 == 0 || self.input_size.1 == 0 {
            return Err(ConfigError::InvalidInputSize(
                self.input_size.0,
                self.input_size.1,
            ));
        }
        if self.strides.is_empty() {
            return Err(ConfigError::EmptyStrides);
        }
        Ok(())
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            score_threshold: 0.4,
            iou_threshold: 0.65,
            reg_max: 16,
            num_classes: 80,
            input_size: (640, 640),
            strides: vec![8, 16, 32],
            pad_color: 114,
            resize_policy: ResizePolicy::TopLeft,
        }
    }
}
