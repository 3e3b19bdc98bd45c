use ndarray::Array3;

/// Raw per-scale output tensors from one inference call.
///
/// Tensors alternate per feature-map scale: the box-distribution tensor
/// (`4 * reg_max` channels) followed by the class-score tensor
/// (`num_classes` channels of raw logits), each indexed `(row, col, channel)`.
/// The list length is therefore `2 * num_scales`.
pub type RawOutputs = Vec<Array3<f32>>;

/// The accelerator boundary. The core never references a specific inference
/// runtime; callers implement this per target platform (hardware
/// accelerator, CPU reference, or a test stub).
pub trait InferenceBackend {
    /// Run one inference on an NV12 buffer of exactly
    /// `height * width * 3 / 2` bytes matching the configured input size.
    ///
    /// A non-success result is propagated as a frame-level failure without
    /// any decoding attempt.
    fn infer(&mut self, nv12: &[u8]) -> anyhow::Result<RawOutputs>;
}
