//! Texture geometry and a CPU-side texture
//!
//! Every texel is four 32-bit floats (16 bytes). Textures are addressed
//! row-major: `u` walks along a row, `v` selects the row.

use serde::Serialize;

use crate::{
    config,
    error::{Axis, CapacityError, Result, UploadError},
    traits::{TextureSurface, UniformSink},
};

/// Floats per RGBA texel
pub const FLOATS_PER_TEXEL: usize = 4;

/// Bytes per RGBA32F texel
pub const TEXEL_BYTES: usize = 16;

/// Width and height in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A rectangle of texels to overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TexelRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Floats a caller must supply to fill this region
    pub fn float_len(&self) -> usize {
        self.width as usize * self.height as usize * FLOATS_PER_TEXEL
    }

    /// Check that the region fits `size` and `len` floats fill it exactly
    pub fn validate(&self, size: TextureSize, len: usize) -> std::result::Result<(), UploadError> {
        let fits_x = self.x as u64 + self.width as u64 <= size.width as u64;
        let fits_y = self.y as u64 + self.height as u64 <= size.height as u64;
        if !fits_x || !fits_y {
            return Err(UploadError::OutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                texture_width: size.width,
                texture_height: size.height,
            });
        }
        if len != self.float_len() {
            return Err(UploadError::LengthMismatch {
                expected: self.float_len(),
                actual: len,
            });
        }
        Ok(())
    }
}

/// Largest texture dimension the device accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLimits {
    pub max_dimension: u32,
}

impl TextureLimits {
    pub const fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Fail fast when either dimension is over the limit
    pub fn check(&self, width: u64, height: u64) -> std::result::Result<(), CapacityError> {
        let available = self.max_dimension as u64;
        if width > available {
            return Err(CapacityError {
                axis: Axis::Width,
                required: width,
                available,
            });
        }
        if height > available {
            return Err(CapacityError {
                axis: Axis::Height,
                required: height,
                available,
            });
        }
        Ok(())
    }
}

impl Default for TextureLimits {
    fn default() -> Self {
        Self::new(config::max_texture_dimension())
    }
}

/// Constants a shader needs to address both textures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShaderConstants {
    pub curve_texture: TextureSize,
    pub layout_texture: TextureSize,
    /// Glyph bounding radius in font units
    pub glyph_bounding_radius: f32,
}

/// A texture that lives in ordinary memory
///
/// Behaves like a GPU texture for uploads and can be read back, which makes
/// it the reference surface for tests and offline dumps.
#[derive(Debug, Clone)]
pub struct HostTexture {
    size: TextureSize,
    texels: Vec<f32>,
    uploads: usize,
    line_count: u32,
}

impl HostTexture {
    /// A zero-filled texture
    pub fn new(width: u32, height: u32) -> Self {
        let size = TextureSize::new(width, height);
        Self {
            size,
            texels: vec![0.0; size.texel_count() * FLOATS_PER_TEXEL],
            uploads: 0,
            line_count: 0,
        }
    }

    /// The four floats at `(u, v)`
    pub fn texel(&self, u: u32, v: u32) -> Option<[f32; 4]> {
        if u >= self.size.width || v >= self.size.height {
            return None;
        }
        let start = (v as usize * self.size.width as usize + u as usize) * FLOATS_PER_TEXEL;
        let t = &self.texels[start..start + FLOATS_PER_TEXEL];
        Some([t[0], t[1], t[2], t[3]])
    }

    /// All floats of row `v`
    pub fn row(&self, v: u32) -> Option<&[f32]> {
        if v >= self.size.height {
            return None;
        }
        let stride = self.size.width as usize * FLOATS_PER_TEXEL;
        let start = v as usize * stride;
        Some(&self.texels[start..start + stride])
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.texels
    }

    /// How many region writes this texture has accepted
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Last value pushed through [`UniformSink::set_line_count`]
    pub fn line_count(&self) -> u32 {
        self.line_count
    }
}

impl TextureSurface for HostTexture {
    fn size(&self) -> TextureSize {
        self.size
    }

    fn write_region(&mut self, region: TexelRegion, texels: &[f32]) -> Result<()> {
        region.validate(self.size, texels.len())?;
        if region.is_empty() {
            return Ok(());
        }

        let src_stride = region.width as usize * FLOATS_PER_TEXEL;
        let dst_stride = self.size.width as usize * FLOATS_PER_TEXEL;
        for (row, src) in texels.chunks_exact(src_stride).enumerate() {
            let dst_start =
                (region.y as usize + row) * dst_stride + region.x as usize * FLOATS_PER_TEXEL;
            self.texels[dst_start..dst_start + src_stride].copy_from_slice(src);
        }
        self.uploads += 1;
        Ok(())
    }
}

impl UniformSink for HostTexture {
    fn set_line_count(&mut self, count: u32) {
        self.line_count = count;
    }
}
