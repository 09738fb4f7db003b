//! Overlay demo
//!
//! Runs the ImGui plugin headlessly for a fixed number of ticks with scripted
//! input, then reports what reached the renderer.
//!
//! Usage: `overlay_demo [config.toml|config.ron] [ticks]`

mod headless;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use imgui_bridge::config::{Config, ConfigError, ImGuiPluginConfig};
use imgui_bridge::foundation::logging;
use imgui_bridge::foundation::math::Vec2;
use imgui_bridge::foundation::time::FrameTimer;
use imgui_bridge::host::{PluginHost, UpdateContext};
use imgui_bridge::input::{InputState, KeyboardKey, MouseButton};
use imgui_bridge::render::{OutputViewId, RenderContext, Viewport};
use imgui_bridge::ui::ImguiBackend;
use imgui_bridge::{ImGuiPlugin, PluginError};
use thiserror::Error;

use headless::{LoggingRenderer, MemoryGpuDevice};

const FIXED_STEP: Duration = Duration::from_micros(16_667);
const DEFAULT_TICKS: u64 = 120;
const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid tick count '{0}'")]
    Ticks(String),
}

fn main() {
    logging::init_with_default("info");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading plugin config from {}", path);
            ImGuiPluginConfig::load_from_file(path)?
        }
        None => ImGuiPluginConfig::default(),
    };
    let ticks = match args.next() {
        Some(arg) => arg.parse::<u64>().map_err(|_| DemoError::Ticks(arg))?,
        None => DEFAULT_TICKS,
    };

    let mut gpu = MemoryGpuDevice::new();
    let mut host = PluginHost::new();
    host.add_plugin(ImGuiPlugin::with_imgui(config)?);
    host.initialize(&mut gpu);

    let current_tick = Rc::new(Cell::new(0_u64));
    let clicks = Rc::new(Cell::new(0_u32));
    if let Some(backend) = host
        .plugin_mut::<ImGuiPlugin<ImguiBackend>>()
        .and_then(ImGuiPlugin::backend_mut)
    {
        let tick = Rc::clone(&current_tick);
        let clicked = Rc::clone(&clicks);
        backend.add_ui_builder(move |ui| {
            ui.window("Overlay Demo")
                .position([16.0, 16.0], imgui::Condition::FirstUseEver)
                .size([260.0, 120.0], imgui::Condition::FirstUseEver)
                .build(|| {
                    ui.text(format!("tick {}", tick.get()));
                    if ui.button("Click me") {
                        clicked.set(clicked.get() + 1);
                    }
                    ui.text(format!("clicks: {}", clicked.get()));
                });
        });
    }

    let mut timer = FrameTimer::new();
    let mut input = InputState::new();
    let mut renderer = LoggingRenderer::default();
    let screen_size = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let render_context = RenderContext {
        output: OutputViewId(0),
        viewport: Viewport::from_size(SCREEN_WIDTH, SCREEN_HEIGHT),
    };

    for tick in 0..ticks {
        current_tick.set(tick);
        gpu.flush();
        script_input(tick, &mut input);
        timer.advance(FIXED_STEP);

        host.update(&UpdateContext {
            unscaled_delta: timer.unscaled_delta(),
            screen_size,
            input: &input,
        });
        host.late_update();
        host.post_render(&mut renderer, &render_context);
        input.begin_tick();
    }

    let counters = renderer.counters();
    log::info!(
        "{} ticks in {:.2}s simulated: {} passes, {} draws, {} triangles, clip depth {}",
        timer.tick_count(),
        timer.total_unscaled().as_secs_f32(),
        counters.passes,
        counters.draws,
        counters.triangles,
        counters.max_clip_depth
    );
    log::info!("Button clicks registered: {}", clicks.get());
    log::info!("GPU memory in use: {} bytes", gpu.resident_bytes());

    host.deinitialize();
    log::info!("GPU memory after shutdown: {} bytes", gpu.resident_bytes());
    Ok(())
}

/// Focus the viewport, click the demo button, then type and navigate
fn script_input(tick: u64, input: &mut InputState) {
    match tick {
        1 => input.set_focus(true),
        // Inside the default button position of the demo window
        2 => input.handle_mouse_move(40.0, 60.0),
        10 => input.handle_mouse_button(MouseButton::Left, true),
        12 => input.handle_mouse_button(MouseButton::Left, false),
        20 => input.handle_text("x"),
        30 => input.handle_key(KeyboardKey::Tab, true),
        32 => input.handle_key(KeyboardKey::Tab, false),
        40 => input.handle_scroll(-1.0),
        90 => input.set_focus(false),
        _ => {}
    }
}
