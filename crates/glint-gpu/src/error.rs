use glint_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("filter shader failed to compile: {0}")]
    ShaderCompile(String),
    #[error("GPU poll failed: {0}")]
    Poll(#[from] wgpu::PollError),
    #[error("readback mapping failed: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("readback finished without a mapping result")]
    MapIncomplete,
    #[error(transparent)]
    Core(#[from] CoreError),
}
