//! Error type shared by the core crate.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
    #[error("renderer failed: {0}")]
    Render(String),
}
