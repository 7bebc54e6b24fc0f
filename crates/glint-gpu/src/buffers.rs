//! GPU buffers for frames and filter parameters.

use glint_core::{FilterParameterSet, FrameImage};
use wgpu::util::DeviceExt;

/// Bytes per `vec4<f32>` pixel.
pub const BYTES_PER_PIXEL: u64 = 16;

/// Handle to a frame stored as a storage buffer of `vec4<f32>`.
pub struct GpuImageHandle {
    pub buffer: wgpu::Buffer,
    pub width: u32,
    pub height: u32,
}

impl GpuImageHandle {
    /// Upload a [`FrameImage`] as a read-only storage buffer.
    pub fn upload(device: &wgpu::Device, image: &FrameImage) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint_frame_upload"),
            contents: image.as_bytes(),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            width: image.width,
            height: image.height,
        }
    }

    /// Create an uninitialized output buffer.
    pub fn create_output(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint_frame_output"),
            size: width as u64 * height as u64 * BYTES_PER_PIXEL,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            width,
            height,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn byte_size(&self) -> u64 {
        self.pixel_count() as u64 * BYTES_PER_PIXEL
    }

    pub fn same_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// Uniform block matching `FilterUniforms` in `filter.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FilterUniforms {
    pub width: u32,
    pub height: u32,
    /// 0 = grade, 1 = blend.
    pub mode: u32,
    pub _pad: u32,
    /// brightness, temperature, contrast, saturation
    pub grade: [f32; 4],
    /// fade, hue_shift, time, unused
    pub grade_extra: [f32; 4],
    /// top, right, bottom, left
    pub weights: [f32; 4],
}

impl FilterUniforms {
    pub fn new(width: u32, height: u32, params: &FilterParameterSet, time: f32) -> Self {
        let mut uniforms = Self {
            width,
            height,
            mode: params.mode().to_u32(),
            _pad: 0,
            grade: [0.0; 4],
            grade_extra: [0.0, 0.0, time, 0.0],
            weights: [0.0; 4],
        };
        match params {
            FilterParameterSet::Grade(g) => {
                uniforms.grade = [g.brightness, g.temperature, g.contrast, g.saturation];
                uniforms.grade_extra[0] = g.fade;
                uniforms.grade_extra[1] = g.hue_shift;
            }
            FilterParameterSet::Blend(w) => uniforms.weights = w.to_array(),
        }
        uniforms
    }
}
