use crate::backend::RawOutputs;
use crate::config::DetectorConfig;
use crate::error::DecodeError;
use ndarray::Array3;
use preprocess::GeometryTransform;

/// One labeled box in original-image pixel coordinates, clipped to the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: u32,
}

/// Decodes raw per-scale DFL output tensors into pre-suppression detections.
///
/// For every spatial cell: sigmoid the class logits, gate on the max
/// probability, decode the four edge distributions into continuous offsets,
/// build the box around the cell center in the resized frame, then invert
/// the frame's geometry transform and clip to the original image.
pub struct BoxDecoder {
    score_threshold: f32,
    reg_max: usize,
    num_classes: usize,
    strides: Vec<u32>,
}

impl BoxDecoder {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            score_threshold: config.score_threshold,
            reg_max: config.reg_max,
            num_classes: config.num_classes,
            strides: config.strides.clone(),
        }
    }

    pub fn decode(
        &self,
        outputs: &RawOutputs,
        orig_width: u32,
        orig_height: u32,
        transform: &GeometryTransform,
    ) -> Result<Vec<Detection>, DecodeError> {
        if outputs.len() % 2 != 0 {
            return Err(DecodeError::OddTensorCount(outputs.len()));
        }
        let num_scales = outputs.len() / 2;
        if num_scales != self.strides.len() {
            return Err(DecodeError::StrideCountMismatch {
                scales: num_scales,
                strides: self.strides.len(),
            });
        }

        let mut detections = Vec::new();

        for scale in 0..num_scales {
            let reg = &outputs[scale * 2];
            let cls = &outputs[scale * 2 + 1];
            self.check_scale_shapes(scale, reg, cls)?;

            let (rows, cols, _) = cls.dim();
            let stride = self.strides[scale] as f32;
            let retained_before = detections.len();

            for row in 0..rows {
                for col in 0..cols {
                    // Sigmoid is monotonic, so the argmax over raw logits is
                    // the argmax over probabilities.
                    let mut best_logit = f32::NEG_INFINITY;
                    let mut best_class = 0usize;
                    for c in 0..self.num_classes {
                        let logit = cls[[row, col, c]];
                        if logit > best_logit {
                            best_logit = logit;
                            best_class = c;
                        }
                    }

                    let score = sigmoid(best_logit);
                    if score <= self.score_threshold {
                        continue;
                    }

                    let edges = self.decode_edges(reg, row, col);

                    let cx = col as f32 + 0.5;
                    let cy = row as f32 + 0.5;
                    let (x1, y1) =
                        transform.to_original((cx - edges[0]) * stride, (cy - edges[1]) * stride);
                    let (x2, y2) =
                        transform.to_original((cx + edges[2]) * stride, (cy + edges[3]) * stride);

                    detections.push(Detection {
                        x1: x1.clamp(0.0, orig_width as f32),
                        y1: y1.clamp(0.0, orig_height as f32),
                        x2: x2.clamp(0.0, orig_width as f32),
                        y2: y2.clamp(0.0, orig_height as f32),
                        score,
                        class_id: best_class as u32,
                    });
                }
            }

            tracing::trace!(
                scale,
                stride,
                retained = detections.len() - retained_before,
                "Decoded scale"
            );
        }

        Ok(detections)
    }

    /// DFL decode for one cell: softmax each `reg_max`-bin group and take its
    /// expectation against the bin indices, yielding `(l, t, r, b)` offsets
    /// in stride units.
    fn decode_edges(&self, reg: &Array3<f32>, row: usize, col: usize) -> [f32; 4] {
        let mut edges = [0.0f32; 4];

        for (edge, slot) in edges.iter_mut().enumerate() {
            let base = edge * self.reg_max;

            let mut max_logit = f32::NEG_INFINITY;
            for bin in 0..self.reg_max {
                max_logit = max_logit.max(reg[[row, col, base + bin]]);
            }

            let mut denom = 0.0f32;
            let mut expectation = 0.0f32;
            for bin in 0..self.reg_max {
                let weight = (reg[[row, col, base + bin]] - max_logit).exp();
                denom += weight;
                expectation += weight * bin as f32;
            }

            *slot = expectation / denom;
        }

        edges
    }

    fn check_scale_shapes(
        &self,
        scale: usize,
        reg: &Array3<f32>,
        cls: &Array3<f32>,
    ) -> Result<(), DecodeError> {
        let (reg_rows, reg_cols, reg_channels) = reg.dim();
        let (cls_rows, cls_cols, cls_channels) = cls.dim();

        if cls_channels != self.num_classes {
            return Err(DecodeError::ClassCountMismatch {
                scale,
                expected: self.num_classes,
                actual: cls_channels,
            });
        }
        if reg_channels != 4 * self.reg_max {
            return Err(DecodeError::DistributionChannelMismatch {
                scale,
                expected: 4 * self.reg_max,
                actual: reg_channels,
            });
        }
        if (reg_rows, reg_cols) != (cls_rows, cls_cols) {
            return Err(DecodeError::GridMismatch {
                scale,
                reg_rows,
                reg_cols,
                cls_rows,
                cls_cols,
            });
        }
        Ok(())
    }
}

/// Numerically stable logistic function.
fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
