//! # ImGui Bridge
//!
//! Runs Dear ImGui inside a game engine's plugin lifecycle.
//!
//! ## Features
//!
//! - **Frame Adapter**: opens and closes one UI frame per host tick
//! - **Input Forwarding**: mouse, text and mapped keys while the viewport is focused
//! - **Draw Translation**: UI draw lists to clipped, textured triangles on the host's 2D renderer
//! - **Font Atlas Upload**: glyph atlas uploaded once, drawing waits until it is resident
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgui_bridge::prelude::*;
//!
//! fn run(gpu: &mut dyn GpuDevice) -> Result<(), PluginError> {
//!     let config = ImGuiPluginConfig::default();
//!     let mut host = PluginHost::new();
//!     host.add_plugin(ImGuiPlugin::with_imgui(config)?);
//!     host.initialize(gpu);
//!
//!     if let Some(ui) = host
//!         .plugin_mut::<ImGuiPlugin<ImguiBackend>>()
//!         .and_then(ImGuiPlugin::backend_mut)
//!     {
//!         ui.add_ui_builder(|ui| ui.show_demo_window(&mut true));
//!     }
//!
//!     // Once per tick: host.update(..), host.late_update(), host.post_render(..)
//!
//!     host.deinitialize();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod foundation;
pub mod host;
pub mod input;
pub mod render;
pub mod ui;

mod error;
mod plugin;

pub use error::PluginError;
pub use plugin::{BackendFactory, FramePhase, ImGuiPlugin};

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests;

/// Common imports for plugin hosts
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigFormat, ImGuiPluginConfig},
        foundation::math::{Rect, Vec2, Vec4},
        host::{GamePlugin, LifecycleHook, PluginHost, UpdateContext},
        input::{InputSource, InputState, KeyboardKey, MouseButton},
        render::{
            GpuDevice, GpuTexture, OutputViewId, RenderContext, Renderer2D, TextureId, Viewport,
        },
        ui::{ImguiBackend, UiBackend},
        FramePhase, ImGuiPlugin, PluginError,
    };
}
