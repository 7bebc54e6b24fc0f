//! GPU-to-CPU frame download.

use glint_core::FrameImage;

use crate::buffers::GpuImageHandle;
use crate::error::GpuError;

/// Copy `handle` into a mappable staging buffer and read it back. Blocks
/// until the copy completes.
///
/// `staging_cache` is reused across calls and grown when too small.
pub fn download_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    handle: &GpuImageHandle,
    staging_cache: &mut Option<wgpu::Buffer>,
) -> Result<FrameImage, GpuError> {
    let size = handle.byte_size();
    if staging_cache.as_ref().is_some_and(|buf| buf.size() < size) {
        *staging_cache = None;
    }
    let staging: &wgpu::Buffer = staging_cache.get_or_insert_with(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint_frame_staging"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        })
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("glint_frame_download_encoder"),
    });
    encoder.copy_buffer_to_buffer(&handle.buffer, 0, staging, 0, size);
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..size);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::PollType::wait_indefinitely())?;
    rx.try_recv().map_err(|_| GpuError::MapIncomplete)??;

    let pixels = {
        let data = slice.get_mapped_range();
        bytemuck::cast_slice::<u8, [f32; 4]>(&data).to_vec()
    };
    staging.unmap();

    Ok(FrameImage::new(handle.width, handle.height, pixels)?)
}
