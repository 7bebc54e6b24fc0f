//! Lossless export of a rendered frame.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::CoreError;
use crate::image::FrameImage;

/// Encode a frame as an 8-bit RGBA PNG.
pub fn encode_png(frame: &FrameImage) -> Result<Vec<u8>, CoreError> {
    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.to_rgba8()).ok_or(
        CoreError::PixelCountMismatch {
            expected: frame.width as usize * frame.height as usize,
            actual: frame.pixels.len(),
        },
    )?;
    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trips_8bit_pixels() {
        let bytes = [255u8, 0, 0, 255, 0, 128, 0, 255, 10, 20, 30, 40, 0, 0, 0, 0];
        let frame = FrameImage::from_rgba8(2, 2, &bytes).unwrap();
        let png = encode_png(&frame).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), bytes.to_vec());
    }

    #[test]
    fn test_malformed_frame_is_rejected() {
        let frame = FrameImage {
            width: 3,
            height: 3,
            pixels: vec![[0.0; 4]; 2],
        };
        assert!(encode_png(&frame).is_err());
    }
}
