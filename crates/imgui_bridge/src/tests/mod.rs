//! Plugin scenarios driven through a [`PluginHost`] with recording fakes

mod input_forwarding;

use std::time::Duration;

use crate::config::ImGuiPluginConfig;
use crate::foundation::math::Vec2;
use crate::host::{PluginHost, UpdateContext};
use crate::input::InputState;
use crate::plugin::ImGuiPlugin;
use crate::render::{
    ClipRect, DrawCommand, DrawData, DrawList, DrawVert, OutputViewId, RenderContext, TextureId,
    Viewport,
};
use crate::testing::{FakeGpuDevice, RecordingBackend, RecordingRenderer};

pub(super) const SCREEN_WIDTH: f32 = 1280.0;
pub(super) const SCREEN_HEIGHT: f32 = 720.0;

pub(super) fn screen_size() -> Vec2 {
    Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Host with one ImGui plugin over a recording backend
pub(super) struct Harness {
    pub host: PluginHost,
    pub backend: RecordingBackend,
    pub gpu: FakeGpuDevice,
    pub renderer: RecordingRenderer,
    pub input: InputState,
}

impl Harness {
    pub fn new(config: ImGuiPluginConfig) -> Self {
        Self::with_gpu(config, FakeGpuDevice::new())
    }

    pub fn with_gpu(config: ImGuiPluginConfig, mut gpu: FakeGpuDevice) -> Self {
        let backend = RecordingBackend::new();
        let shared = backend.clone();
        let plugin = ImGuiPlugin::new(config, Box::new(move || Ok(shared.clone()))).unwrap();

        let mut host = PluginHost::new();
        host.add_plugin(plugin);
        host.initialize(&mut gpu);

        Self {
            host,
            backend,
            gpu,
            renderer: RecordingRenderer::new(),
            input: InputState::new(),
        }
    }

    /// Initialized harness whose font atlas is already resident
    pub fn ready(config: ImGuiPluginConfig) -> Self {
        let harness = Self::new(config);
        harness.gpu.complete_uploads();
        harness
    }

    pub fn plugin(&self) -> &ImGuiPlugin<RecordingBackend> {
        self.host.plugin::<ImGuiPlugin<RecordingBackend>>().unwrap()
    }

    pub fn plugin_mut(&mut self) -> &mut ImGuiPlugin<RecordingBackend> {
        self.host.plugin_mut::<ImGuiPlugin<RecordingBackend>>().unwrap()
    }

    pub fn update(&mut self) {
        let tick = UpdateContext {
            unscaled_delta: Duration::from_millis(20),
            screen_size: screen_size(),
            input: &self.input,
        };
        self.host.update(&tick);
    }

    pub fn late_update(&mut self) {
        self.host.late_update();
    }

    pub fn post_render(&mut self) {
        let render_context = RenderContext {
            output: OutputViewId(3),
            viewport: Viewport::from_size(SCREEN_WIDTH, SCREEN_HEIGHT),
        };
        self.host.post_render(&mut self.renderer, &render_context);
    }

    /// Run all three hooks, then start a new input tick
    pub fn tick(&mut self) {
        self.update();
        self.late_update();
        self.post_render();
        self.input.begin_tick();
    }
}

/// One window-sized quad drawn with the font texture
pub(super) fn quad_frame(count: usize) -> DrawData {
    let vertex = |x: f32, y: f32| DrawVert {
        pos: [x, y],
        uv: [0.0, 0.0],
        col: 0xFF00_FF00,
    };
    DrawData {
        display_pos: Vec2::zeros(),
        display_size: screen_size(),
        lists: vec![DrawList {
            vertices: vec![vertex(0.0, 0.0), vertex(64.0, 0.0), vertex(64.0, 64.0), vertex(0.0, 64.0)],
            indices: vec![0, 1, 2, 0, 2, 3],
            commands: vec![DrawCommand::Elements {
                count,
                idx_offset: 0,
                clip_rect: ClipRect::from_array([0.0, 0.0, 64.0, 64.0]),
                texture_id: TextureId(1),
            }],
        }],
    }
}
