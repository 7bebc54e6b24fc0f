//! Image loading for still and feed frames.

use std::path::Path;

use glint_core::FrameImage;

/// Load an image from disk as display-referred RGBA f32.
///
/// Supports PNG and JPEG via the `image` crate.
pub fn load_image(path: &Path) -> Result<FrameImage, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    let rgba = img.to_rgba32f();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<[f32; 4]> = rgba.pixels().map(|p| p.0).collect();

    FrameImage::new(width, height, pixels).map_err(|_| ImageLoadError::Empty {
        path: path.display().to_string(),
    })
}

/// Whether `path` has an extension the loader understands.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or(false)
}

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("image {path} has no pixels")]
    Empty { path: String },
}
