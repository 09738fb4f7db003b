//! GPU texture resources
//!
//! The plugin owns exactly one GPU resource, the font atlas. Uploads are
//! asynchronous on the host's GPU timeline: a texture is usable only once
//! [`GpuTexture::has_resident_mip`] reports true.

use super::TextureId;
use bitflags::bitflags;
use thiserror::Error;

/// Texel formats the plugin requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit RGBA, normalized
    R8G8B8A8Unorm,
}

impl PixelFormat {
    /// Size of one texel in bytes
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::R8G8B8A8Unorm => 4,
        }
    }
}

bitflags! {
    /// How a texture may be bound
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u32 {
        /// Sampled from shaders
        const SHADER_RESOURCE = 1 << 0;
    }
}

/// Texture creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescription {
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Texel format
    pub format: PixelFormat,
    /// Binding flags
    pub flags: TextureFlags,
}

impl TextureDescription {
    /// Describe a 2D texture
    pub const fn new_2d(
        width: u32,
        height: u32,
        mip_levels: u32,
        format: PixelFormat,
        flags: TextureFlags,
    ) -> Self {
        Self {
            width,
            height,
            mip_levels,
            format,
            flags,
        }
    }

    /// Byte size of one mip level
    pub fn mip_size_bytes(&self, mip_index: u32) -> usize {
        let width = (self.width >> mip_index).max(1) as usize;
        let height = (self.height >> mip_index).max(1) as usize;
        width * height * self.format.bytes_per_pixel()
    }

    /// Check the description can be created
    pub fn validate(&self) -> Result<(), GpuError> {
        if self.width == 0 || self.height == 0 {
            return Err(GpuError::InvalidDescription(format!(
                "zero-sized texture {}x{}",
                self.width, self.height
            )));
        }
        if self.mip_levels == 0 {
            return Err(GpuError::InvalidDescription("texture needs at least one mip level".to_string()));
        }
        Ok(())
    }
}

/// GPU resource errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// The description cannot be created
    #[error("Invalid texture description: {0}")]
    InvalidDescription(String),

    /// The device failed to allocate the texture
    #[error("Texture creation failed: {0}")]
    CreationFailed(String),

    /// The upload could not be queued
    #[error("Texture upload failed: {0}")]
    UploadFailed(String),
}

/// Texture owned by the plugin
///
/// Dropping the texture releases the GPU resource.
pub trait GpuTexture {
    /// Identifier the host renderer resolves when drawing
    fn id(&self) -> TextureId;

    /// Description the texture was created with
    fn description(&self) -> &TextureDescription;

    /// Queue an upload of one mip level without waiting for it
    fn upload_mip_async(&mut self, mip_index: u32, data: &[u8]) -> Result<(), GpuError>;

    /// Whether at least one mip level is resident on the GPU
    fn has_resident_mip(&self) -> bool;
}

/// Host GPU device
pub trait GpuDevice {
    /// Create a texture with a debug name
    fn create_texture(
        &mut self,
        name: &str,
        description: &TextureDescription,
    ) -> Result<Box<dyn GpuTexture>, GpuError>;
}
