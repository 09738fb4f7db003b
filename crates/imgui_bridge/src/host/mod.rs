//! Host engine plugin surface
//!
//! The pieces of a game engine's plugin system the ImGui plugin depends on:
//! a plugin trait with metadata, explicit lifecycle hook subscriptions and a
//! [`PluginHost`] that drives registered plugins through a tick.

pub mod hooks;
mod plugin_host;

pub use hooks::{HookHandle, HookRegistry, LifecycleEvents, LifecycleHook};
pub use plugin_host::PluginHost;

use std::any::Any;
use std::time::Duration;

use crate::foundation::math::Vec2;
use crate::input::InputSource;
use crate::render::{GpuDevice, RenderContext, Renderer2D};

/// Plugin metadata shown by the host's plugin manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescription {
    /// Display name
    pub name: String,
    /// Category used to group plugins
    pub category: String,
    /// One-line description
    pub description: String,
    /// Author
    pub author: String,
    /// Version string
    pub version: String,
    /// Project homepage
    pub homepage_url: String,
    /// Source repository
    pub repository_url: String,
}

/// Host services available during plugin setup
pub struct PluginContext<'a> {
    /// Lifecycle hook subscriptions owned by this plugin
    pub hooks: &'a mut dyn LifecycleEvents,
    /// Device for creating GPU resources
    pub gpu: &'a mut dyn GpuDevice,
}

/// Per-tick data passed to the update hook
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Real time since the previous tick, ignoring time scale
    pub unscaled_delta: Duration,
    /// Output size in pixels
    pub screen_size: Vec2,
    /// Host input for this tick
    pub input: &'a dyn InputSource,
}

/// A plugin loaded into the host
///
/// Hook methods are only called while the plugin has the matching
/// [`LifecycleHook`] bound.
pub trait GamePlugin: Any {
    /// Plugin metadata
    fn description(&self) -> PluginDescription;

    /// Set up resources and bind hooks
    fn initialize(&mut self, context: &mut PluginContext<'_>);

    /// Release resources and unbind hooks
    fn deinitialize(&mut self, hooks: &mut dyn LifecycleEvents);

    /// [`LifecycleHook::Update`]
    fn on_update(&mut self, _tick: &UpdateContext<'_>) {}

    /// [`LifecycleHook::LateUpdate`]
    fn on_late_update(&mut self) {}

    /// [`LifecycleHook::PostRender`]
    fn on_post_render(&mut self, _renderer: &mut dyn Renderer2D, _render_context: &RenderContext) {}

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
