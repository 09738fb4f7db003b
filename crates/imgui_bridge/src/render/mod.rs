//! Rendering interfaces
//!
//! Keeps the plugin independent of the host's graphics backend: the UI is
//! drawn through [`Renderer2D`], an immediate-mode 2D renderer with a clip
//! stack, and its font atlas lives in a texture created through
//! [`gpu::GpuDevice`].

pub mod draw_data;
pub mod gpu;
pub mod translator;

pub use draw_data::{ClipRect, DrawCallback, DrawCommand, DrawData, DrawList, DrawVert};
pub use gpu::{GpuDevice, GpuError, GpuTexture, PixelFormat, TextureDescription, TextureFlags};
pub use translator::{unpack_color, DrawTranslator, TranslateStats};

use crate::foundation::math::{Rect, Vec2, Vec4};

/// Host-side texture identifier, handed to the UI library as an opaque id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

/// Render target a frame is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputViewId(pub u64);

/// Output viewport in render-target pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Viewport {
    /// Viewport covering `width` x `height` from the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// What the post-render hook draws into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Output render target
    pub output: OutputViewId,
    /// Output viewport
    pub viewport: Viewport,
}

/// Host 2D immediate renderer
///
/// Calls arrive as `begin`, any number of clip pushes/pops and draws, `end`.
/// Clip rectangles are in render-target pixels and nest like a stack.
pub trait Renderer2D {
    /// Begin drawing into an output view
    fn begin(&mut self, output: OutputViewId, viewport: Viewport);

    /// Push a scissor rectangle; draws are clipped to the top of the stack
    fn push_clip(&mut self, rect: Rect);

    /// Pop the last pushed scissor rectangle
    fn pop_clip(&mut self);

    /// Draw an indexed triangle list
    ///
    /// # Arguments
    /// * `texture` - Texture sampled by the triangles
    /// * `indices` - Triangle list indices into the vertex attribute slices
    /// * `positions` - Vertex positions in render-target pixels
    /// * `uvs` - Vertex texture coordinates
    /// * `colors` - Vertex colors (linear RGBA, 0.0-1.0)
    fn draw_textured_triangles(
        &mut self,
        texture: TextureId,
        indices: &[u16],
        positions: &[Vec2],
        uvs: &[Vec2],
        colors: &[Vec4],
    );

    /// Finish drawing and flush
    fn end(&mut self);
}
