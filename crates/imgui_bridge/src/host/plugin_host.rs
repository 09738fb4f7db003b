//! Reference plugin driver

use super::{GamePlugin, HookRegistry, LifecycleEvents, LifecycleHook, PluginContext, UpdateContext};
use crate::render::{GpuDevice, RenderContext, Renderer2D};

struct PluginSlot {
    plugin: Box<dyn GamePlugin>,
    hooks: HookRegistry,
    initialized: bool,
}

/// Drives plugins through initialization, the three per-tick hooks and teardown
///
/// Each plugin gets its own [`HookRegistry`]; a hook is dispatched to a
/// plugin only while that plugin has it bound. Hosts call
/// [`PluginHost::update`], [`PluginHost::late_update`] and
/// [`PluginHost::post_render`] once per tick in that order.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<PluginSlot>,
}

impl PluginHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin; it is set up by the next [`PluginHost::initialize`]
    pub fn add_plugin(&mut self, plugin: impl GamePlugin) {
        let description = plugin.description();
        log::debug!("Registered plugin '{}' v{}", description.name, description.version);
        self.plugins.push(PluginSlot {
            plugin: Box::new(plugin),
            hooks: HookRegistry::new(),
            initialized: false,
        });
    }

    /// Number of registered plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Initialize every plugin not initialized yet, in registration order
    pub fn initialize(&mut self, gpu: &mut dyn GpuDevice) {
        for slot in self.plugins.iter_mut().filter(|slot| !slot.initialized) {
            let mut context = PluginContext {
                hooks: &mut slot.hooks,
                gpu: &mut *gpu,
            };
            slot.plugin.initialize(&mut context);
            slot.initialized = true;
            log::info!("Initialized plugin '{}'", slot.plugin.description().name);
        }
    }

    /// Dispatch [`LifecycleHook::Update`]
    pub fn update(&mut self, tick: &UpdateContext<'_>) {
        for slot in self.bound_slots(LifecycleHook::Update) {
            slot.plugin.on_update(tick);
        }
    }

    /// Dispatch [`LifecycleHook::LateUpdate`]
    pub fn late_update(&mut self) {
        for slot in self.bound_slots(LifecycleHook::LateUpdate) {
            slot.plugin.on_late_update();
        }
    }

    /// Dispatch [`LifecycleHook::PostRender`]
    pub fn post_render(&mut self, renderer: &mut dyn Renderer2D, render_context: &RenderContext) {
        for slot in self.bound_slots(LifecycleHook::PostRender) {
            slot.plugin.on_post_render(renderer, render_context);
        }
    }

    /// Deinitialize plugins in reverse registration order
    pub fn deinitialize(&mut self) {
        for slot in self.plugins.iter_mut().rev().filter(|slot| slot.initialized) {
            slot.plugin.deinitialize(&mut slot.hooks);
            slot.initialized = false;
            if slot.hooks.bound_count() > 0 {
                log::warn!(
                    "Plugin '{}' left {} hooks bound after deinitialize",
                    slot.plugin.description().name,
                    slot.hooks.bound_count()
                );
            }
            log::info!("Deinitialized plugin '{}'", slot.plugin.description().name);
        }
    }

    /// First registered plugin of type `T`
    pub fn plugin<T: GamePlugin>(&self) -> Option<&T> {
        self.plugins
            .iter()
            .find_map(|slot| slot.plugin.as_any().downcast_ref::<T>())
    }

    /// First registered plugin of type `T`, mutably
    pub fn plugin_mut<T: GamePlugin>(&mut self) -> Option<&mut T> {
        self.plugins
            .iter_mut()
            .find_map(|slot| slot.plugin.as_any_mut().downcast_mut::<T>())
    }

    /// Live hook subscriptions across all plugins
    pub fn bound_hook_count(&self) -> usize {
        self.plugins.iter().map(|slot| slot.hooks.bound_count()).sum()
    }

    fn bound_slots(&mut self, hook: LifecycleHook) -> impl Iterator<Item = &mut PluginSlot> {
        self.plugins.iter_mut().filter(move |slot| slot.hooks.is_bound(hook))
    }
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("plugins", &self.plugins.len())
            .field("bound_hooks", &self.bound_hook_count())
            .finish()
    }
}
