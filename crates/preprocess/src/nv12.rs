use crate::PreprocessError;

/// Convert an RGB (HWC) buffer to NV12: a full-range BT.601 luma plane
/// followed by a single interleaved UV plane at 4:2:0 subsampling.
///
/// Each chroma sample averages its 2x2 pixel block, so both dimensions must
/// be even. The output is exactly `width * height * 3 / 2` bytes.
pub fn rgb_to_nv12(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PreprocessError> {
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(PreprocessError::OddDimensions { width, height });
    }
    let (w, h) = (width as usize, height as usize);
    let expected = w * h * 3;
    if pixels.len() != expected {
        return Err(PreprocessError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let area = w * h;
    let mut out = vec![0u8; area * 3 / 2];
    let (luma, chroma) = out.split_at_mut(area);

    for y in 0..h {
        for x in 0..w {
            let p = (y * w + x) * 3;
            let (r, g, b) = (
                pixels[p] as f32,
                pixels[p + 1] as f32,
                pixels[p + 2] as f32,
            );
            luma[y * w + x] = (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8;
        }
    }

    for by in 0..h / 2 {
        for bx in 0..w / 2 {
            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            for (dy, dx) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                let p = ((by * 2 + dy) * w + bx * 2 + dx) * 3;
                r += pixels[p] as f32;
                g += pixels[p + 1] as f32;
                b += pixels[p + 2] as f32;
            }
            r /= 4.0;
            g /= 4.0;
            b /= 4.0;

            let u = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
            let v = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;

            let c = (by * (w / 2) + bx) * 2;
            chroma[c] = u.round().clamp(0.0, 255.0) as u8;
            chroma[c + 1] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_size_is_one_and_a_half_planes() {
        let pixels = vec![128u8; 640 * 480 * 3];
        let nv12 = rgb_to_nv12(&pixels, 640, 480).unwrap();
        assert_eq!(nv12.len(), 640 * 480 * 3 / 2);
    }

    #[test]
    fn test_rejects_odd_dimensions() {
        let pixels = vec![0u8; 3 * 3 * 3];
        assert!(matches!(
            rgb_to_nv12(&pixels, 3, 3),
            Err(PreprocessError::OddDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let pixels = vec![0u8; 10];
        assert!(matches!(
            rgb_to_nv12(&pixels, 4, 4),
            Err(PreprocessError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_white_maps_to_neutral_chroma() {
        let pixels = vec![255u8; 2 * 2 * 3];
        let nv12 = rgb_to_nv12(&pixels, 2, 2).unwrap();
        // Full-range white: Y = 255, U = V = 128.
        assert_eq!(&nv12[..4], &[255, 255, 255, 255]);
        assert_eq!(&nv12[4..], &[128, 128]);
    }

    #[test]
    fn test_pure_red_chroma() {
        let pixels = vec![255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];
        let nv12 = rgb_to_nv12(&pixels, 2, 2).unwrap();
        // Y = 0.299 * 255 ≈ 76, U ≈ 85, V = 255.
        assert_eq!(nv12[0], 76);
        assert_eq!(nv12[4], 85);
        assert_eq!(nv12[5], 255);
    }

    #[test]
    fn test_chroma_averages_block() {
        // One red and three black pixels: chroma reflects the mean color.
        let mut pixels = vec![0u8; 2 * 2 * 3];
        pixels[0] = 255;
        let nv12 = rgb_to_nv12(&pixels, 2, 2).unwrap();

        // Mean color (63.75, 0, 0): V = 0.5 * 63.75 + 128 ≈ 160.
        assert_eq!(nv12[5], 160);
        // Only the top-left pixel has non-zero luma.
        assert_eq!(nv12[0], 76);
        assert_eq!(&nv12[1..4], &[0, 0, 0]);
    }
}
