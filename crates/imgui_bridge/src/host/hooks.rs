//! Lifecycle hook subscriptions

use slotmap::{new_key_type, SlotMap};

/// Per-tick hooks a plugin can subscribe to, listed in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// Before game code runs for the tick
    Update,
    /// After game code ran for the tick
    LateUpdate,
    /// After the scene was rendered into the output view
    PostRender,
}

impl LifecycleHook {
    /// All hooks in dispatch order
    pub const ALL: [Self; 3] = [Self::Update, Self::LateUpdate, Self::PostRender];
}

new_key_type! {
    /// Handle to one hook subscription
    pub struct HookHandle;
}

/// Subscription interface the host hands to plugins
///
/// Subscriptions are explicit: a plugin receives a hook only between
/// [`LifecycleEvents::bind`] and the matching [`LifecycleEvents::unbind`].
pub trait LifecycleEvents {
    /// Subscribe to a hook
    fn bind(&mut self, hook: LifecycleHook) -> HookHandle;

    /// Cancel a subscription; returns whether it existed
    fn unbind(&mut self, handle: HookHandle) -> bool;

    /// Whether any subscription to `hook` exists
    fn is_bound(&self, hook: LifecycleHook) -> bool;

    /// Number of live subscriptions
    fn bound_count(&self) -> usize;
}

/// Slot-map backed [`LifecycleEvents`]
#[derive(Debug, Default)]
pub struct HookRegistry {
    subscriptions: SlotMap<HookHandle, LifecycleHook>,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

impl LifecycleEvents for HookRegistry {
    fn bind(&mut self, hook: LifecycleHook) -> HookHandle {
        self.subscriptions.insert(hook)
    }

    fn unbind(&mut self, handle: HookHandle) -> bool {
        self.subscriptions.remove(handle).is_some()
    }

    fn is_bound(&self, hook: LifecycleHook) -> bool {
        self.subscriptions.values().any(|&bound| bound == hook)
    }

    fn bound_count(&self) -> usize {
        self.subscriptions.len()
    }
}
