//! Glint GPU — wgpu compute backend for the filter pipeline.
//!
//! Runs the same grade and blend math as `glint-core` in a single compute
//! pass (`shaders/filter.wgsl`) and reads the result back as a
//! [`glint_core::FrameImage`].

pub mod buffers;
pub mod error;
pub mod pipeline;
pub mod readback;

pub use error::GpuError;
pub use pipeline::GpuFilterPipeline;

/// Device features the filter pipeline needs. Plain storage buffers only.
pub fn required_features() -> wgpu::Features {
    wgpu::Features::empty()
}
