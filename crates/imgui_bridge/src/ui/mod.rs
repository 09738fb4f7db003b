//! UI library seam
//!
//! [`UiBackend`] is the narrow set of library calls the frame adapter drives:
//! IO setup, input events, the frame lifecycle and draw data retrieval.
//! [`ImguiBackend`] implements it on top of Dear ImGui.

pub mod font_atlas;
pub mod imgui_backend;

pub use font_atlas::{upload_font_atlas, FONT_ATLAS_FORMAT};
pub use imgui_backend::ImguiBackend;

use crate::foundation::math::Vec2;
use crate::input::{MouseButton, UiKey};
use crate::render::{DrawData, TextureId};

/// Input event forwarded to the UI library
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Application focus gained or lost; losing focus releases held input
    Focus(bool),
    /// Absolute mouse position in display pixels
    MousePos(Vec2),
    /// Mouse button state
    MouseButton {
        /// Button
        button: MouseButton,
        /// Whether it is held
        down: bool,
    },
    /// Vertical wheel movement
    MouseWheel(f32),
    /// One UTF-16 code unit of typed text
    Character(u16),
    /// Key transition
    Key {
        /// Key
        key: UiKey,
        /// `true` for key-down, `false` for key-up
        down: bool,
    },
}

/// RGBA32 glyph atlas pixels, borrowed from the UI library
#[derive(Debug, Clone, Copy)]
pub struct FontAtlasPixels<'a> {
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
    /// `width * height * 4` bytes, row-major
    pub data: &'a [u8],
}

/// Calls into the immediate-mode UI library
///
/// Frame calls must arrive as `new_frame`, `end_frame`, then optionally
/// `render`; [`UiBackend::take_draw_data`] returns the output of the last
/// `render` once.
pub trait UiBackend {
    /// Enable or disable keyboard navigation
    fn set_keyboard_navigation(&mut self, enabled: bool);

    /// Set the settings file; `None` disables persistence
    fn set_ini_filename(&mut self, filename: Option<&str>);

    /// Rasterize the font atlas as RGBA32
    fn font_atlas_rgba32(&mut self) -> FontAtlasPixels<'_>;

    /// Texture id the library uses when drawing glyphs
    fn set_font_texture(&mut self, texture: TextureId);

    /// Seconds since the previous frame; must be positive
    fn set_delta_time(&mut self, seconds: f32);

    /// Display size in pixels
    fn set_display_size(&mut self, size: Vec2);

    /// Queue an input event for the next frame
    fn push_event(&mut self, event: InputEvent);

    /// Open a frame
    fn new_frame(&mut self);

    /// Close the open frame
    fn end_frame(&mut self);

    /// Generate draw data for the closed frame
    fn render(&mut self);

    /// Draw data produced by the last `render`, if not taken yet
    fn take_draw_data(&mut self) -> Option<DrawData>;
}
