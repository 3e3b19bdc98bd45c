pub mod error;
pub mod geometry;
pub mod nv12;

pub use error::PreprocessError;
pub use geometry::GeometryPreprocessor;
pub use nv12::rgb_to_nv12;

/// Exact inverse of the resize-and-pad applied to a frame.
///
/// Maps resized-frame coordinates back to the original image:
/// `original = (resized - pad) * inverse_scale`. Produced once per frame and
/// consumed by the box decoder; immutable for the frame's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTransform {
    /// Reciprocal of the resize ratio. Always > 0.
    pub inverse_scale: f32,
    /// Horizontal padding in resized-frame pixels (fractional half-padding
    /// for letterbox, 0 for top-left placement).
    pub pad_x: f32,
    /// Vertical padding in resized-frame pixels.
    pub pad_y: f32,
}

impl GeometryTransform {
    /// Map a resized-frame point back into original-image coordinates.
    pub fn to_original(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x) * self.inverse_scale,
            (y - self.pad_y) * self.inverse_scale,
        )
    }
}

/// How the source image is placed on the network-input canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Aspect-preserving resize centered on the canvas with symmetric
    /// padding on both axes.
    #[default]
    Letterbox,
    /// Aspect-preserving resize placed flush at the top-left corner, the
    /// rest of the canvas filled with the pad color.
    TopLeft,
}
