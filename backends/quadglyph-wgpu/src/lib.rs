//! wgpu backend for quadglyph textures
//!
//! Both the curve atlas and the layout stream are `Rgba32Float` textures
//! created once at full size and then only written in sub-regions with
//! [`wgpu::Queue::write_texture`]. The line count travels in a 16-byte
//! uniform buffer next to the layout texture.
//!
//! # Example
//!
//! ```ignore
//! use quadglyph_wgpu::{GpuContext, GpuTexture};
//!
//! let gpu = GpuContext::new(&GpuConfig::default())?;
//! let texture = GpuTexture::new(&gpu, 1024, 64, "layout")?;
//! let stream = LayoutStream::create(texture, config.with_limits(gpu.texture_limits()))?;
//! ```

use bytemuck::{Pod, Zeroable};
use thiserror::Error;
use wgpu::{Device, Queue};

use quadglyph_core::{
    error::{Result, UploadError},
    texture::{TexelRegion, TextureLimits, TextureSize, TEXEL_BYTES},
    traits::{TextureSurface, UniformSink},
    QuadglyphError,
};

/// Errors specific to the wgpu backend
#[derive(Error, Debug)]
pub enum GpuError {
    /// Failed to initialize wgpu adapter.
    #[error("Failed to find a suitable GPU adapter")]
    NoAdapter,
    /// Failed to create wgpu device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(String),
}

impl From<GpuError> for QuadglyphError {
    fn from(e: GpuError) -> Self {
        QuadglyphError::Upload(UploadError::BackendError(e.to_string()))
    }
}

/// Adapter selection
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Whether to use a software adapter (slower but more compatible).
    pub use_cpu_fallback: bool,
    /// Power preference for GPU adapter selection.
    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            use_cpu_fallback: false,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// GPU context holding wgpu device and queue
#[derive(Clone)]
pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    pub fn new(config: &GpuConfig) -> std::result::Result<Self, GpuError> {
        pollster::block_on(Self::new_async(config))
    }

    pub async fn new_async(config: &GpuConfig) -> std::result::Result<Self, GpuError> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                force_fallback_adapter: config.use_cpu_fallback,
                compatible_surface: None,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("quadglyph"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                ..Default::default()
            })
            .await
            .map_err(|e| GpuError::DeviceCreation(e.to_string()))?;

        Ok(Self { device, queue })
    }

    /// The device's largest 2D texture side
    pub fn texture_limits(&self) -> TextureLimits {
        TextureLimits::new(self.device.limits().max_texture_dimension_2d)
    }
}

/// Layout of the line count uniform: one `u32` padded to 16 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct LineCountUniform {
    pub line_count: u32,
    pub _pad: [u32; 3],
}

/// An RGBA32F texture plus the line count uniform buffer
pub struct GpuTexture {
    queue: Queue,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    uniform: wgpu::Buffer,
    size: TextureSize,
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuTexture")
            .field("size", &self.size)
            .field("texture", &"<wgpu::Texture>")
            .finish()
    }
}

impl GpuTexture {
    /// Allocate a zeroed `width` x `height` texture
    pub fn new(gpu: &GpuContext, width: u32, height: u32, label: &str) -> Result<Self> {
        gpu.texture_limits().check(width as u64, height as u64)?;

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let uniform = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<LineCountUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::debug!("Allocated {}x{} RGBA32F texture '{}'", width, height, label);

        Ok(Self {
            queue: gpu.queue.clone(),
            texture,
            view,
            uniform,
            size: TextureSize::new(width, height),
        })
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Uniform buffer holding a [`LineCountUniform`]
    pub fn line_count_buffer(&self) -> &wgpu::Buffer {
        &self.uniform
    }
}

impl TextureSurface for GpuTexture {
    fn size(&self) -> TextureSize {
        self.size
    }

    fn write_region(&mut self, region: TexelRegion, texels: &[f32]) -> Result<()> {
        region.validate(self.size, texels.len())?;
        if region.is_empty() {
            return Ok(());
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: region.x,
                    y: region.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(texels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(region.width * TEXEL_BYTES as u32),
                rows_per_image: Some(region.height),
            },
            wgpu::Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }
}

impl UniformSink for GpuTexture {
    fn set_line_count(&mut self, count: u32) {
        let uniform = LineCountUniform {
            line_count: count,
            _pad: [0; 3],
        };
        self.queue
            .write_buffer(&self.uniform, 0, bytemuck::bytes_of(&uniform));
    }
}
