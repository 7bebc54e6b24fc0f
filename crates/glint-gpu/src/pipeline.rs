//! GPU filter pipeline: upload, one compute pass, readback.

use std::num::NonZeroU64;

use glint_core::{CoreError, FilterParameterSet, FrameImage, FrameRenderer};

use crate::buffers::{BYTES_PER_PIXEL, FilterUniforms, GpuImageHandle};
use crate::error::GpuError;
use crate::readback::download_image;

const WORKGROUP_SIZE: u32 = 16;

/// Owns the device, the compiled filter shader, and cached buffers.
pub struct GpuFilterPipeline {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    /// Reallocated when the frame size changes.
    output: Option<GpuImageHandle>,
    staging: Option<wgpu::Buffer>,
}

impl GpuFilterPipeline {
    /// Pick the default adapter, create a device, and compile the shader.
    pub fn create_blocking() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            ..Default::default()
        }))?;
        let info = adapter.get_info();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "GPU adapter selected");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("glint_device"),
            required_features: crate::required_features(),
            required_limits: adapter.limits(),
            ..Default::default()
        }))?;
        Self::new(device, queue)
    }

    /// Build the pipeline on an existing device.
    ///
    /// Shader validation errors are captured and returned as
    /// [`GpuError::ShaderCompile`] instead of reaching the device's
    /// uncaptured-error handler.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Result<Self, GpuError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint_filter_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/filter.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint_filter_layout"),
            entries: &[
                storage_ro_entry(0, BYTES_PER_PIXEL),
                storage_rw_entry(1, BYTES_PER_PIXEL),
                uniform_entry(2, std::mem::size_of::<FilterUniforms>() as u64),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint_filter_pipeline_layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("glint_filter_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("apply_filter"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GpuError::ShaderCompile(err.to_string()));
        }

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint_filter_uniforms"),
            size: std::mem::size_of::<FilterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            layout,
            uniform_buffer,
            output: None,
            staging: None,
        })
    }

    /// Filter `frame` on the GPU and read the result back.
    ///
    /// Neutral parameters skip the dispatch and return a copy of the input.
    pub fn apply(
        &mut self,
        frame: &FrameImage,
        params: &FilterParameterSet,
        time: f32,
    ) -> Result<FrameImage, GpuError> {
        if params.is_neutral() {
            return Ok(frame.clone());
        }

        let source = GpuImageHandle::upload(&self.device, frame);
        if self
            .output
            .as_ref()
            .is_some_and(|out| !out.same_size(frame.width, frame.height))
        {
            self.output = None;
        }
        let output = self.output.get_or_insert_with(|| {
            tracing::debug!(width = frame.width, height = frame.height, "allocating GPU output");
            GpuImageHandle::create_output(&self.device, frame.width, frame.height)
        });

        let uniforms = FilterUniforms::new(frame.width, frame.height, params, time);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint_filter_bg"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: source.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("glint_filter_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("glint_filter_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(
                frame.width.div_ceil(WORKGROUP_SIZE),
                frame.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        download_image(&self.device, &self.queue, output, &mut self.staging)
    }
}

impl FrameRenderer for GpuFilterPipeline {
    fn render(
        &mut self,
        frame: &FrameImage,
        params: &FilterParameterSet,
        time: f32,
    ) -> Result<FrameImage, CoreError> {
        self.apply(frame, params, time)
            .map_err(|err| CoreError::Render(err.to_string()))
    }

    fn name(&self) -> &'static str {
        "gpu"
    }
}

// ── Layout helpers ──────────────────────────────────────────────────

fn storage_ro_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    storage_entry(binding, min_size, true)
}

fn storage_rw_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    storage_entry(binding, min_size, false)
}

fn storage_entry(binding: u32, min_size: u64, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}

fn uniform_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}
