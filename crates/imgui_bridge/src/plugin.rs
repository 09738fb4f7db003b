//! ImGui frame adapter
//!
//! [`ImGuiPlugin`] ties the UI library's frame to the host tick:
//!
//! - `Update`: push delta time, display size and input, then open a frame
//! - `LateUpdate`: close the frame and, once the font atlas is resident,
//!   generate draw data
//! - `PostRender`: translate the draw data into 2D renderer calls
//!
//! Setup failures never propagate out of the hooks. A plugin whose font atlas
//! could not be created keeps running frames but never draws.

use std::any::Any;

use crate::config::ImGuiPluginConfig;
use crate::error::PluginError;
use crate::host::{
    GamePlugin, HookHandle, LifecycleEvents, LifecycleHook, PluginContext, PluginDescription,
    UpdateContext,
};
use crate::input::{InputSource, MouseButton, KEY_MAPPINGS};
use crate::render::{DrawTranslator, GpuTexture, RenderContext, Renderer2D, TranslateStats};
use crate::ui::{upload_font_atlas, ImguiBackend, InputEvent, UiBackend};

/// Where the adapter is within the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// No frame open
    Idle,
    /// Frame opened by the update hook; widget calls are allowed
    FrameOpen,
    /// Frame closed, draw data not generated yet
    FrameClosed,
    /// Draw data generated and waiting for post-render
    Rendered,
    /// Frame closed without draw data (not ready or rendering disabled)
    Skipped,
}

/// Creates the UI backend during initialization
pub type BackendFactory<B> = Box<dyn FnMut() -> Result<B, PluginError>>;

/// Plugin driving an immediate-mode UI from the host lifecycle
pub struct ImGuiPlugin<B: UiBackend> {
    config: ImGuiPluginConfig,
    factory: BackendFactory<B>,
    backend: Option<B>,
    font_texture: Option<Box<dyn GpuTexture>>,
    translator: DrawTranslator,
    hook_handles: Vec<HookHandle>,
    phase: FramePhase,
    enabled: bool,
    input_enabled: bool,
    render_enabled: bool,
    last_stats: TranslateStats,
}

impl ImGuiPlugin<ImguiBackend> {
    /// Plugin backed by Dear ImGui
    ///
    /// # Errors
    /// Returns [`PluginError::Config`] if the configuration is invalid.
    pub fn with_imgui(config: ImGuiPluginConfig) -> Result<Self, PluginError> {
        Self::new(config, Box::new(ImguiBackend::new))
    }
}

impl<B: UiBackend> ImGuiPlugin<B> {
    /// Create an uninitialized plugin
    ///
    /// The backend is created by `factory` when the host initializes the
    /// plugin, and dropped again on deinitialization.
    ///
    /// # Errors
    /// Returns [`PluginError::Config`] if the configuration is invalid.
    pub fn new(config: ImGuiPluginConfig, factory: BackendFactory<B>) -> Result<Self, PluginError> {
        config.validate()?;
        Ok(Self {
            enabled: config.enabled,
            input_enabled: config.read_input,
            render_enabled: config.render_ui,
            config,
            factory,
            backend: None,
            font_texture: None,
            translator: DrawTranslator::new(),
            hook_handles: Vec::new(),
            phase: FramePhase::Idle,
            last_stats: TranslateStats::default(),
        })
    }

    /// Whether the font atlas texture exists and is resident on the GPU
    pub fn is_ready(&self) -> bool {
        self.font_texture
            .as_ref()
            .is_some_and(|texture| texture.has_resident_mip())
    }

    /// Current frame phase
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Master switch
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the UI on or off; takes effect at the next update
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether host input is forwarded
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Forward host input or treat the viewport as unfocused
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    /// Whether the UI is drawn
    pub fn render_enabled(&self) -> bool {
        self.render_enabled
    }

    /// Draw the UI or keep closing frames without drawing
    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.render_enabled = enabled;
    }

    /// Configuration the plugin was created with
    pub fn config(&self) -> &ImGuiPluginConfig {
        &self.config
    }

    /// The UI backend while initialized
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// The UI backend while initialized, mutably
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Counters from the last translated frame
    pub fn last_stats(&self) -> TranslateStats {
        self.last_stats
    }

    fn push_input(backend: &mut B, input: &dyn InputSource, focused: bool) {
        backend.push_event(InputEvent::Focus(focused));
        if !focused {
            return;
        }

        backend.push_event(InputEvent::MousePos(input.mouse_position()));
        for button in [MouseButton::Left, MouseButton::Right] {
            backend.push_event(InputEvent::MouseButton {
                button,
                down: input.mouse_button(button),
            });
        }
        backend.push_event(InputEvent::MouseWheel(input.mouse_scroll_delta()));

        if let Some(unit) = input.input_text().encode_utf16().next() {
            backend.push_event(InputEvent::Character(unit));
        }

        for mapping in &KEY_MAPPINGS {
            if input.key_down(mapping.host) {
                backend.push_event(InputEvent::Key { key: mapping.ui, down: true });
            } else if input.key_up(mapping.host) {
                backend.push_event(InputEvent::Key { key: mapping.ui, down: false });
            }
        }
    }
}

impl<B: UiBackend + 'static> GamePlugin for ImGuiPlugin<B> {
    fn description(&self) -> PluginDescription {
        PluginDescription {
            name: "ImGui".to_string(),
            category: "Debug".to_string(),
            description: "Dear ImGui plugin that adds debug GUI interface to game viewport.".to_string(),
            author: "Omar Cornut".to_string(),
            version: "1.88".to_string(),
            homepage_url: "https://github.com/ocornut/imgui".to_string(),
            repository_url: "https://github.com/FlaxEngine/ImGui".to_string(),
        }
    }

    fn initialize(&mut self, context: &mut PluginContext<'_>) {
        let mut backend = match (self.factory)() {
            Ok(backend) => backend,
            Err(e) => {
                log::error!("Failed to create ImGui context: {}", e);
                return;
            }
        };

        backend.set_keyboard_navigation(self.config.keyboard_navigation);
        backend.set_ini_filename(self.config.ini_filename.as_deref());

        self.hook_handles = LifecycleHook::ALL
            .iter()
            .map(|&hook| context.hooks.bind(hook))
            .collect();

        match upload_font_atlas(&mut backend, &mut *context.gpu, &self.config.font_atlas_name) {
            Ok(texture) => self.font_texture = Some(texture),
            Err(e) => log::error!("Failed to setup ImGui font atlas texture: {}", e),
        }

        self.backend = Some(backend);
        self.phase = FramePhase::Idle;
        log::info!("ImGui plugin initialized");
    }

    fn deinitialize(&mut self, hooks: &mut dyn LifecycleEvents) {
        for handle in self.hook_handles.drain(..) {
            hooks.unbind(handle);
        }
        self.backend = None;
        self.font_texture = None;
        self.phase = FramePhase::Idle;
        log::info!("ImGui plugin deinitialized");
    }

    fn on_update(&mut self, tick: &UpdateContext<'_>) {
        debug_assert!(
            self.phase != FramePhase::FrameOpen,
            "update hook fired twice without a late update in between"
        );
        self.phase = FramePhase::Idle;

        if !self.enabled {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        backend.set_delta_time(tick.unscaled_delta.as_secs_f32());
        backend.set_display_size(tick.screen_size);

        let focused = tick.input.has_viewport_focus() && self.input_enabled;
        Self::push_input(backend, tick.input, focused);

        backend.new_frame();
        self.phase = FramePhase::FrameOpen;
    }

    fn on_late_update(&mut self) {
        debug_assert!(
            matches!(self.phase, FramePhase::Idle | FramePhase::FrameOpen),
            "late update hook fired twice in one tick"
        );
        if self.phase != FramePhase::FrameOpen {
            return;
        }
        let ready = self.is_ready();
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        backend.end_frame();
        self.phase = FramePhase::FrameClosed;

        if ready && self.render_enabled {
            backend.render();
            self.phase = FramePhase::Rendered;
        } else {
            log::trace!("Skipping ImGui render (ready: {}, render enabled: {})", ready, self.render_enabled);
            self.phase = FramePhase::Skipped;
        }
    }

    fn on_post_render(&mut self, renderer: &mut dyn Renderer2D, render_context: &RenderContext) {
        if !self.is_ready() || self.phase != FramePhase::Rendered {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        if let Some(draw_data) = backend.take_draw_data() {
            self.last_stats = self.translator.translate(&draw_data, renderer, render_context);
        }
        self.phase = FramePhase::Idle;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<B: UiBackend> std::fmt::Debug for ImGuiPlugin<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImGuiPlugin")
            .field("phase", &self.phase)
            .field("initialized", &self.backend.is_some())
            .field("ready", &self.is_ready())
            .field("enabled", &self.enabled)
            .field("input_enabled", &self.input_enabled)
            .field("render_enabled", &self.render_enabled)
            .finish_non_exhaustive()
    }
}
