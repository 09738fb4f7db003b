//! Dear ImGui backend
//!
//! Owns the process's only `imgui::Context`. Widget code is registered as UI
//! builders that run right after the frame opens, the same way plugin UIs are
//! built inside a host's frame.
//!
//! The safe API reaches EndFrame only through the `Ui` that NewFrame returns,
//! so `new_frame` arms the frame and `end_frame` runs NewFrame, the builders
//! and EndFrame back to back. Input queued in between is consumed by that
//! NewFrame. Draw lists are generated and copied out by `render` alone.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{FontAtlasPixels, InputEvent, UiBackend};
use crate::error::PluginError;
use crate::foundation::math::Vec2;
use crate::input::{MouseButton, UiKey};
use crate::render::{ClipRect, DrawCommand, DrawData, DrawList, DrawVert, TextureId};

static CONTEXT_ACTIVE: AtomicBool = AtomicBool::new(false);

type UiBuilder = Box<dyn FnMut(&imgui::Ui)>;

/// [`UiBackend`] backed by an `imgui::Context`
pub struct ImguiBackend {
    context: imgui::Context,
    builders: Vec<UiBuilder>,
    held_keys: HashSet<UiKey>,
    frame_armed: bool,
    frame_ended: bool,
    rendered: Option<DrawData>,
}

impl ImguiBackend {
    /// Create the UI context
    ///
    /// # Errors
    /// Returns [`PluginError::ContextAlreadyActive`] while another
    /// `ImguiBackend` is alive.
    pub fn new() -> Result<Self, PluginError> {
        if CONTEXT_ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PluginError::ContextAlreadyActive);
        }

        let mut context = imgui::Context::create();
        context.set_platform_name(Some(format!("imgui_bridge {}", env!("CARGO_PKG_VERSION"))));
        log::info!("Created ImGui context");

        Ok(Self {
            context,
            builders: Vec::new(),
            held_keys: HashSet::new(),
            frame_armed: false,
            frame_ended: false,
            rendered: None,
        })
    }

    /// Register widget code to run every frame, in registration order
    pub fn add_ui_builder(&mut self, builder: impl FnMut(&imgui::Ui) + 'static) {
        self.builders.push(Box::new(builder));
    }

    /// Underlying context, for style and font customization
    pub fn context_mut(&mut self) -> &mut imgui::Context {
        &mut self.context
    }

    fn release_held_input(&mut self) {
        let io = self.context.io_mut();
        for key in self.held_keys.drain() {
            io.add_key_event(to_imgui_key(key), false);
        }
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            io.add_mouse_button_event(to_imgui_button(button), false);
        }
    }
}

impl Drop for ImguiBackend {
    fn drop(&mut self) {
        CONTEXT_ACTIVE.store(false, Ordering::Release);
        log::info!("Destroyed ImGui context");
    }
}

impl std::fmt::Debug for ImguiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImguiBackend")
            .field("builders", &self.builders.len())
            .field("held_keys", &self.held_keys)
            .finish_non_exhaustive()
    }
}

impl UiBackend for ImguiBackend {
    fn set_keyboard_navigation(&mut self, enabled: bool) {
        self.context
            .io_mut()
            .config_flags
            .set(imgui::ConfigFlags::NAV_ENABLE_KEYBOARD, enabled);
    }

    fn set_ini_filename(&mut self, filename: Option<&str>) {
        self.context.set_ini_filename(filename.map(PathBuf::from));
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasPixels<'_> {
        let texture = self.context.fonts().build_rgba32_texture();
        FontAtlasPixels {
            width: texture.width,
            height: texture.height,
            data: texture.data,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_font_texture(&mut self, texture: TextureId) {
        self.context.fonts().tex_id = imgui::TextureId::new(texture.0 as usize);
    }

    fn set_delta_time(&mut self, seconds: f32) {
        // ImGui asserts on a zero delta
        self.context.io_mut().delta_time = seconds.max(f32::EPSILON);
    }

    fn set_display_size(&mut self, size: Vec2) {
        self.context.io_mut().display_size = [size.x.max(0.0), size.y.max(0.0)];
    }

    fn push_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Focus(true) => {}
            InputEvent::Focus(false) => self.release_held_input(),
            InputEvent::MousePos(pos) => self.context.io_mut().add_mouse_pos_event([pos.x, pos.y]),
            InputEvent::MouseButton { button, down } => {
                self.context
                    .io_mut()
                    .add_mouse_button_event(to_imgui_button(button), down);
            }
            InputEvent::MouseWheel(delta) => self.context.io_mut().add_mouse_wheel_event([0.0, delta]),
            InputEvent::Character(unit) => {
                match char::decode_utf16(std::iter::once(unit)).next() {
                    Some(Ok(c)) => self.context.io_mut().add_input_character(c),
                    _ => log::trace!("Dropping unpaired UTF-16 surrogate {:#06x}", unit),
                }
            }
            InputEvent::Key { key, down } => {
                if down {
                    self.held_keys.insert(key);
                } else {
                    self.held_keys.remove(&key);
                }
                self.context.io_mut().add_key_event(to_imgui_key(key), down);
            }
        }
    }

    fn new_frame(&mut self) {
        self.rendered = None;
        self.frame_ended = false;
        self.frame_armed = true;
    }

    fn end_frame(&mut self) {
        if !std::mem::take(&mut self.frame_armed) {
            log::trace!("end_frame without an open frame");
            return;
        }
        let ui = self.context.new_frame();
        for builder in &mut self.builders {
            builder(ui);
        }
        ui.end_frame_early();
        self.frame_ended = true;
    }

    // ImGui::Render skips EndFrame for a frame that already ended
    fn render(&mut self) {
        if !std::mem::take(&mut self.frame_ended) {
            log::trace!("render without a closed frame");
            return;
        }
        self.rendered = Some(convert_draw_data(self.context.render()));
    }

    fn take_draw_data(&mut self) -> Option<DrawData> {
        self.rendered.take()
    }
}

/// Copy ImGui's draw data into owned, library-independent lists
fn convert_draw_data(draw_data: &imgui::DrawData) -> DrawData {
    let lists = draw_data
        .draw_lists()
        .map(|list| {
            let vertices = list
                .vtx_buffer()
                .iter()
                .map(|vertex| DrawVert {
                    pos: vertex.pos,
                    uv: vertex.uv,
                    col: u32::from_le_bytes(vertex.col),
                })
                .collect();
            let commands = list.commands().filter_map(convert_command).collect();
            DrawList {
                vertices,
                indices: list.idx_buffer().to_vec(),
                commands,
            }
        })
        .collect();

    DrawData {
        display_pos: Vec2::new(draw_data.display_pos[0], draw_data.display_pos[1]),
        display_size: Vec2::new(draw_data.display_size[0], draw_data.display_size[1]),
        lists,
    }
}

fn convert_command(command: imgui::DrawCmd) -> Option<DrawCommand> {
    match command {
        imgui::DrawCmd::Elements { count, cmd_params } => Some(DrawCommand::Elements {
            count,
            idx_offset: cmd_params.idx_offset,
            clip_rect: ClipRect::from_array(cmd_params.clip_rect),
            texture_id: TextureId(cmd_params.texture_id.id() as u64),
        }),
        imgui::DrawCmd::ResetRenderState => Some(DrawCommand::ResetRenderState),
        imgui::DrawCmd::RawCallback { .. } => {
            // Raw C callbacks cannot be invoked without unsafe
            log::trace!("Dropping raw ImGui draw callback");
            None
        }
    }
}

const fn to_imgui_key(key: UiKey) -> imgui::Key {
    match key {
        UiKey::Tab => imgui::Key::Tab,
        UiKey::LeftArrow => imgui::Key::LeftArrow,
        UiKey::RightArrow => imgui::Key::RightArrow,
        UiKey::UpArrow => imgui::Key::UpArrow,
        UiKey::DownArrow => imgui::Key::DownArrow,
        UiKey::PageUp => imgui::Key::PageUp,
        UiKey::PageDown => imgui::Key::PageDown,
        UiKey::Home => imgui::Key::Home,
        UiKey::End => imgui::Key::End,
        UiKey::Insert => imgui::Key::Insert,
        UiKey::Delete => imgui::Key::Delete,
        UiKey::Backspace => imgui::Key::Backspace,
        UiKey::Space => imgui::Key::Space,
        UiKey::Enter => imgui::Key::Enter,
        UiKey::Escape => imgui::Key::Escape,
        UiKey::Comma => imgui::Key::Comma,
        UiKey::Minus => imgui::Key::Minus,
        UiKey::Period => imgui::Key::Period,
        UiKey::Slash => imgui::Key::Slash,
        UiKey::Semicolon => imgui::Key::Semicolon,
        UiKey::LeftBracket => imgui::Key::LeftBracket,
        UiKey::RightBracket => imgui::Key::RightBracket,
    }
}

const fn to_imgui_button(button: MouseButton) -> imgui::MouseButton {
    match button {
        MouseButton::Left => imgui::MouseButton::Left,
        MouseButton::Right => imgui::MouseButton::Right,
        MouseButton::Middle => imgui::MouseButton::Middle,
    }
}
