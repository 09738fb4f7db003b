//! Glyph atlas upload

use super::UiBackend;
use crate::error::PluginError;
use crate::render::{GpuDevice, GpuTexture, PixelFormat, TextureDescription, TextureFlags};

/// Pixel format of the uploaded atlas
pub const FONT_ATLAS_FORMAT: PixelFormat = PixelFormat::R8G8B8A8Unorm;

/// Upload the UI library's glyph atlas into a new GPU texture
///
/// The upload is queued without waiting; the texture becomes usable once it
/// reports a resident mip. A failed upload is logged and leaves the texture
/// permanently non-resident. On success the texture id is handed back to the
/// library as its font texture.
///
/// # Errors
/// Returns [`PluginError::FontAtlasSize`] if the atlas pixels do not match its
/// dimensions, or [`PluginError::Gpu`] if the texture cannot be created.
pub fn upload_font_atlas<B: UiBackend + ?Sized>(
    backend: &mut B,
    gpu: &mut dyn GpuDevice,
    name: &str,
) -> Result<Box<dyn GpuTexture>, PluginError> {
    let pixels = backend.font_atlas_rgba32();
    let expected = pixels.width as usize * pixels.height as usize * FONT_ATLAS_FORMAT.bytes_per_pixel();
    if pixels.data.len() != expected {
        return Err(PluginError::FontAtlasSize {
            width: pixels.width,
            height: pixels.height,
            len: pixels.data.len(),
        });
    }

    let description = TextureDescription::new_2d(
        pixels.width,
        pixels.height,
        1,
        FONT_ATLAS_FORMAT,
        TextureFlags::SHADER_RESOURCE,
    );
    description.validate()?;
    let mut texture = gpu.create_texture(name, &description)?;

    if let Err(e) = texture.upload_mip_async(0, pixels.data) {
        log::error!("Failed to queue font atlas upload: {}", e);
    }

    let texture_id = texture.id();
    log::debug!(
        "Created font atlas texture '{}' ({}x{}, id {:?})",
        name,
        description.width,
        description.height,
        texture_id
    );
    backend.set_font_texture(texture_id);
    Ok(texture)
}
