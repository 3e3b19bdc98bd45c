use crate::{GeometryTransform, PreprocessError, ResizePolicy};
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};

/// Resizes arbitrary-size RGB frames onto a fixed-size network-input canvas,
/// recording the exact inverse transform for the decoder.
///
/// The canvas buffer is reused across frames; each call overwrites it.
pub struct GeometryPreprocessor {
    target_width: u32,
    target_height: u32,
    policy: ResizePolicy,
    pad_color: u8,
    canvas: Vec<u8>,
}

impl GeometryPreprocessor {
    pub fn new(
        target_size: (u32, u32),
        policy: ResizePolicy,
        pad_color: u8,
    ) -> Result<Self, PreprocessError> {
        let (target_width, target_height) = target_size;
        if target_width == 0 || target_height == 0 {
            return Err(PreprocessError::InvalidTargetShape {
                width: target_width,
                height: target_height,
            });
        }

        Ok(Self {
            target_width,
            target_height,
            policy,
            pad_color,
            canvas: vec![pad_color; target_width as usize * target_height as usize * 3],
        })
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    /// Place `pixels` (RGB, HWC) onto the canvas according to the configured
    /// policy and return the canvas together with the frame's transform.
    pub fn apply(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(&[u8], GeometryTransform), PreprocessError> {
        if width == 0 || height == 0 {
            return Err(PreprocessError::InvalidSourceShape { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(PreprocessError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let ratio = (self.target_width as f32 / width as f32)
            .min(self.target_height as f32 / height as f32);
        let new_width = ((width as f32 * ratio).round() as u32).max(1);
        let new_height = ((height as f32 * ratio).round() as u32).max(1);

        let (dst_x, dst_y, pad_x, pad_y) = match self.policy {
            ResizePolicy::Letterbox => {
                let dw = (self.target_width - new_width) as f32 / 2.0;
                let dh = (self.target_height - new_height) as f32 / 2.0;
                // The 0.1 bias keeps an exact .5 half-padding from rounding
                // to the same side twice when the leftover is odd.
                ((dw - 0.1).round() as u32, (dh - 0.1).round() as u32, dw, dh)
            }
            ResizePolicy::TopLeft => (0, 0, 0.0, 0.0),
        };

        self.canvas.fill(self.pad_color);

        if (new_width, new_height) == (width, height) {
            // Already at the scaled size, pure copy onto the canvas.
            self.blit(pixels, new_width, new_height, dst_x, dst_y);
        } else {
            let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;
            let mut resized = Image::new(new_width, new_height, PixelType::U8x3);

            Resizer::new().resize(
                &src,
                &mut resized,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            )?;

            self.blit(resized.buffer(), new_width, new_height, dst_x, dst_y);
        }

        let transform = GeometryTransform {
            inverse_scale: 1.0 / ratio,
            pad_x,
            pad_y,
        };

        tracing::trace!(
            width,
            height,
            new_width,
            new_height,
            ?transform,
            "Placed frame onto network-input canvas"
        );

        Ok((&self.canvas, transform))
    }

    fn blit(&mut self, src: &[u8], src_width: u32, src_height: u32, dst_x: u32, dst_y: u32) {
        let stride = (self.target_width * 3) as usize;
        let row_bytes = (src_width * 3) as usize;

        for y in 0..src_height {
            let src_row = (y * src_width * 3) as usize;
            let dst_row = (y + dst_y) as usize * stride + (dst_x * 3) as usize;

            self.canvas[dst_row..dst_row + row_bytes]
                .copy_from_slice(&src[src_row..src_row + row_bytes]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_frame(width: u32, height: u32) -> Vec<u8> {
        vec![128u8; (width * height * 3) as usize]
    }

    #[test]
    fn test_rejects_zero_target_shape() {
        let result = GeometryPreprocessor::new((0, 640), ResizePolicy::Letterbox, 114);
        assert!(matches!(
            result,
            Err(PreprocessError::InvalidTargetShape { .. })
        ));
    }

    #[test]
    fn test_rejects_buffer_size_mismatch() {
        let mut pre = GeometryPreprocessor::new((640, 640), ResizePolicy::Letterbox, 114).unwrap();
        let result = pre.apply(&[0u8; 100], 10, 10);
        assert!(matches!(result, Err(PreprocessError::SizeMismatch { .. })));
    }

    #[test]
    fn test_letterbox_centers_content() {
        // 800x600 source into 640x640: ratio 0.8, content 640x480,
        // vertical margin split 80/80.
        let pixels = gray_frame(800, 600);
        let mut pre = GeometryPreprocessor::new((640, 640), ResizePolicy::Letterbox, 114).unwrap();
        let (canvas, transform) = pre.apply(&pixels, 800, 600).unwrap();

        assert_eq!(transform.pad_x, 0.0);
        assert_eq!(transform.pad_y, 80.0);
        assert!((transform.inverse_scale - 1.25).abs() < 1e-6);

        // Rows 0..80 and 560..640 are padding, the middle is content.
        assert_eq!(canvas[(79 * 640) * 3], 114);
        assert_eq!(canvas[(80 * 640) * 3], 128);
        assert_eq!(canvas[(559 * 640 + 639) * 3], 128);
        assert_eq!(canvas[(560 * 640) * 3], 114);
    }

    #[test]
    fn test_letterbox_odd_margin_splits_within_one_pixel() {
        // 631x640 content leaves a 9-pixel horizontal margin: 4/5 split.
        let pixels = gray_frame(631, 640);
        let mut pre = GeometryPreprocessor::new((640, 640), ResizePolicy::Letterbox, 114).unwrap();
        let (canvas, transform) = pre.apply(&pixels, 631, 640).unwrap();

        assert_eq!(transform.pad_x, 4.5);
        assert_eq!(transform.pad_y, 0.0);

        // Left margin 4 px, right margin 5 px.
        assert_eq!(canvas[3 * 3], 114);
        assert_eq!(canvas[4 * 3], 128);
        assert_eq!(canvas[634 * 3], 128);
        assert_eq!(canvas[635 * 3], 114);
    }

    #[test]
    fn test_top_left_has_zero_padding() {
        let pixels = gray_frame(1280, 720);
        let mut pre = GeometryPreprocessor::new((640, 640), ResizePolicy::TopLeft, 114).unwrap();
        let (canvas, transform) = pre.apply(&pixels, 1280, 720).unwrap();

        assert_eq!(transform.pad_x, 0.0);
        assert_eq!(transform.pad_y, 0.0);
        assert!((transform.inverse_scale - 2.0).abs() < 1e-6);

        // Content is 640x360 flush at the origin; below it is pad color.
        assert_eq!(canvas[0], 128);
        assert_eq!(canvas[(359 * 640 + 639) * 3], 128);
        assert_eq!(canvas[(360 * 640) * 3], 114);
    }

    #[test]
    fn test_inverse_transform_round_trips_content_corners() {
        let cases = [
            ((800u32, 600u32), ResizePolicy::Letterbox),
            ((800, 600), ResizePolicy::TopLeft),
            ((1280, 720), ResizePolicy::Letterbox),
            ((333, 777), ResizePolicy::Letterbox),
        ];

        for ((width, height), policy) in cases {
            let pixels = gray_frame(width, height);
            let mut pre = GeometryPreprocessor::new((640, 640), policy, 114).unwrap();
            let (_, transform) = pre.apply(&pixels, width, height).unwrap();

            // The content region spans [pad, pad + scaled_size) in the
            // resized frame; its corners must map back to the source corners.
            let ratio = 1.0 / transform.inverse_scale;
            let (x0, y0) = transform.to_original(transform.pad_x, transform.pad_y);
            let (x1, y1) = transform.to_original(
                transform.pad_x + width as f32 * ratio,
                transform.pad_y + height as f32 * ratio,
            );

            assert!(x0.abs() < 1e-3, "{width}x{height} {policy:?}: x0={x0}");
            assert!(y0.abs() < 1e-3, "{width}x{height} {policy:?}: y0={y0}");
            assert!((x1 - width as f32).abs() < 1e-3);
            assert!((y1 - height as f32).abs() < 1e-3);
        }
    }

    #[test]
    fn test_matching_size_skips_resize() {
        let mut pixels = gray_frame(640, 640);
        pixels[0] = 1;
        pixels[1] = 2;
        pixels[2] = 3;

        let mut pre = GeometryPreprocessor::new((640, 640), ResizePolicy::Letterbox, 114).unwrap();
        let (canvas, transform) = pre.apply(&pixels, 640, 640).unwrap();

        // Bit-exact copy, no interpolation artifacts.
        assert_eq!(&canvas[..3], &[1, 2, 3]);
        assert_eq!(transform.inverse_scale, 1.0);
        assert_eq!(canvas, &pixels[..]);
    }
}
