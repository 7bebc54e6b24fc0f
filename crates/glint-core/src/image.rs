//! Frame representation for the filter pipeline.

use glam::Vec2;

use crate::error::CoreError;

/// A single RGBA frame. Channels are display-referred f32 in `[0, 1]`.
///
/// Construct through [`FrameImage::new`] or [`FrameImage::solid`]. A frame
/// assembled from its fields must be non-empty with `pixels.len()` equal to
/// `width * height`; sampling assumes both.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameImage {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Row-major pixel data, `width * height` entries.
    pub pixels: Vec<[f32; 4]>,
}

impl FrameImage {
    /// Build a frame, checking that the buffer matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CoreError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with one color.
    pub fn solid(width: u32, height: u32, color: [f32; 4]) -> Result<Self, CoreError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// Convert from 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, CoreError> {
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();
        Self::new(width, height, pixels)
    }

    /// Quantize to 8-bit RGBA bytes, clamping each channel to `[0, 1]`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    /// Raw byte view of the pixel buffer, for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at integer coordinates, clamped to the frame edge.
    pub fn pixel(&self, x: i64, y: i64) -> [f32; 4] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Bilinear sample at normalized texture coordinates with clamp-to-edge
    /// addressing. Texel centers sit at `(i + 0.5) / size`.
    pub fn sample(&self, uv: Vec2) -> [f32; 4] {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let p00 = self.pixel(x0, y0);
        let p10 = self.pixel(x0 + 1, y0);
        let p01 = self.pixel(x0, y0 + 1);
        let p11 = self.pixel(x0 + 1, y0 + 1);

        std::array::from_fn(|c| {
            let top = p00[c] + (p10[c] - p00[c]) * fx;
            let bottom = p01[c] + (p11[c] - p01[c]) * fx;
            top + (bottom - top) * fy
        })
    }

    /// Normalized texture coordinate of the center of pixel `(x, y)`.
    pub fn uv_of(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn gradient() -> FrameImage {
        let pixels = (0..4)
            .map(|i| {
                let v = i as f32 / 3.0;
                [v, v, v, 1.0]
            })
            .collect();
        FrameImage::new(4, 1, pixels).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_buffer() {
        let err = FrameImage::new(2, 2, vec![[0.0; 4]; 3]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(FrameImage::new(0, 4, vec![]).is_err());
    }

    #[test]
    fn test_solid_rejects_zero_size() {
        assert!(matches!(
            FrameImage::solid(0, 3, [1.0; 4]),
            Err(CoreError::InvalidDimensions { width: 0, height: 3 })
        ));
        let img = FrameImage::solid(2, 3, [0.5; 4]).unwrap();
        assert_eq!(img.pixel_count(), 6);
        assert_eq!(img.pixel(-1, 9), [0.5; 4]);
    }

    #[test]
    fn test_sample_at_texel_center_is_exact() {
        let img = gradient();
        for x in 0..4 {
            let s = img.sample(img.uv_of(x, 0));
            let expected = x as f32 / 3.0;
            assert!((s[0] - expected).abs() < EPSILON, "x={x}: {} vs {expected}", s[0]);
        }
    }

    #[test]
    fn test_sample_clamps_outside_frame() {
        let img = gradient();
        assert!((img.sample(Vec2::new(-2.0, 0.5))[0]).abs() < EPSILON);
        assert!((img.sample(Vec2::new(5.0, 0.5))[0] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_sample_interpolates_between_texels() {
        let img = gradient();
        // Halfway between pixel 0 and pixel 1.
        let s = img.sample(Vec2::new(0.25, 0.5));
        assert!((s[0] - 1.0 / 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_rgba8_conversion_preserves_bytes() {
        let bytes = [0u8, 64, 128, 255, 255, 0, 10, 200];
        let img = FrameImage::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(img.to_rgba8(), bytes.to_vec());
    }
}
