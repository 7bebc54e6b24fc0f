//! Renderer abstraction so the session can run on CPU or GPU.

use crate::error::CoreError;
use crate::image::FrameImage;
use crate::transform::evaluate::render_frame;
use crate::transform::params::FilterParameterSet;

/// Applies a parameter set to a frame.
pub trait FrameRenderer {
    fn render(
        &mut self,
        frame: &FrameImage,
        params: &FilterParameterSet,
        time: f32,
    ) -> Result<FrameImage, CoreError>;

    /// Name for logs.
    fn name(&self) -> &'static str;
}

/// Reference renderer running the pipeline on the CPU.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuRenderer;

impl FrameRenderer for CpuRenderer {
    fn render(
        &mut self,
        frame: &FrameImage,
        params: &FilterParameterSet,
        time: f32,
    ) -> Result<FrameImage, CoreError> {
        Ok(render_frame(frame, params, time))
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}
