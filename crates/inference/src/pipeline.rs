use crate::backend::InferenceBackend;
use crate::config::DetectorConfig;
use crate::decoder::{BoxDecoder, Detection};
use crate::nms;
use preprocess::{GeometryPreprocessor, rgb_to_nv12};

/// The per-frame detection pipeline: geometry preprocess, pixel-format
/// conversion, inference, DFL decode, greedy suppression. Strictly linear,
/// single-threaded; all buffers are frame-scoped or reused across frames.
pub struct DetectionPipeline<B: InferenceBackend> {
    backend: B,
    config: DetectorConfig,
    preprocessor: GeometryPreprocessor,
    decoder: BoxDecoder,
}

impl<B: InferenceBackend> DetectionPipeline<B> {
    pub fn new(backend: B, config: DetectorConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let preprocessor =
            GeometryPreprocessor::new(config.input_size, config.resize_policy, config.pad_color)?;
        let decoder = BoxDecoder::new(&config);

        Ok(Self {
            backend,
            config,
            preprocessor,
            decoder,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run one frame through the pipeline and return the final, suppressed
    /// detection list in original-image coordinates.
    pub fn process_frame(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Vec<Detection>> {
        let span = tracing::info_span!("process_frame", width, height);
        let _enter = span.enter();

        let (input_width, input_height) = self.config.input_size;

        let (canvas, transform) = {
            let _s = tracing::info_span!("geometry_preprocess").entered();
            self.preprocessor.apply(pixels, width, height)?
        };

        let nv12 = {
            let _s = tracing::info_span!("pixel_format").entered();
            rgb_to_nv12(canvas, input_width, input_height)?
        };

        let outputs = {
            let _s = tracing::info_span!("model_inference").entered();
            self.backend.infer(&nv12)?
        };

        let decoded = {
            let _s = tracing::info_span!("decode").entered();
            self.decoder.decode(&outputs, width, height, &transform)?
        };

        let kept = nms::suppress(decoded, self.config.iou_threshold);

        tracing::debug!(detections = kept.len(), "Frame processed");

        Ok(kept)
    }
}
