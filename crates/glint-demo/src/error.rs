//! Host-level errors.

use std::path::PathBuf;

use glint_core::CoreError;

use crate::image_loader::ImageLoadError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("media acquisition failed: {0}")]
    Acquisition(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[cfg(feature = "gpu")]
    #[error(transparent)]
    Gpu(#[from] glint_gpu::GpuError),
}
