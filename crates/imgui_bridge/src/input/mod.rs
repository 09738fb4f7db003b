//! Host input surface
//!
//! The plugin reads input through [`InputSource`], a query interface modelled
//! after the engine's input module: absolute state for the mouse, edge
//! transitions for keys. [`InputState`] is a ready-made implementation that
//! hosts feed from their window events.

pub mod key_map;

pub use key_map::{KeyMapping, UiKey, KEY_MAPPINGS};

use crate::foundation::math::Vec2;
use std::collections::HashSet;

/// Host keyboard keys the plugin can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardKey {
    /// Tab key
    Tab,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Home key
    Home,
    /// End key
    End,
    /// Insert key
    Insert,
    /// Delete key
    Delete,
    /// Backspace key
    Backspace,
    /// Space bar
    Spacebar,
    /// Return / Enter key
    Return,
    /// Escape key
    Escape,
    /// `,` key
    Comma,
    /// `-` key
    Minus,
    /// `.` key
    Period,
    /// `/` key
    Slash,
    /// `;` key (named after the engine's `Colon` key code)
    Colon,
    /// `[` key
    LeftBracket,
    /// `]` key
    RightBracket,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Read-only view of the host's input for the current tick
pub trait InputSource {
    /// Whether the game viewport currently holds input focus
    fn has_viewport_focus(&self) -> bool;

    /// Mouse position in viewport pixels
    fn mouse_position(&self) -> Vec2;

    /// Whether the button is currently held
    fn mouse_button(&self, button: MouseButton) -> bool;

    /// Vertical scroll delta accumulated this tick
    fn mouse_scroll_delta(&self) -> f32;

    /// Text typed this tick (may be empty)
    fn input_text(&self) -> &str;

    /// Whether the key went down this tick
    fn key_down(&self, key: KeyboardKey) -> bool;

    /// Whether the key went up this tick
    fn key_up(&self, key: KeyboardKey) -> bool;
}

/// Input state accumulated from host window events
///
/// Call [`InputState::begin_tick`] once per tick after the update hooks ran
/// so that edge transitions, scroll and text only last a single tick.
#[derive(Debug)]
pub struct InputState {
    focused: bool,
    mouse_position: Vec2,
    left_button: bool,
    right_button: bool,
    middle_button: bool,
    scroll_delta: f32,
    text: String,
    held_keys: HashSet<KeyboardKey>,
    pressed_this_tick: HashSet<KeyboardKey>,
    released_this_tick: HashSet<KeyboardKey>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an empty, unfocused input state
    pub fn new() -> Self {
        Self {
            focused: false,
            mouse_position: Vec2::zeros(),
            left_button: false,
            right_button: false,
            middle_button: false,
            scroll_delta: 0.0,
            text: String::new(),
            held_keys: HashSet::new(),
            pressed_this_tick: HashSet::new(),
            released_this_tick: HashSet::new(),
        }
    }

    /// Clear per-tick state (edges, scroll, text)
    pub fn begin_tick(&mut self) {
        self.pressed_this_tick.clear();
        self.released_this_tick.clear();
        self.scroll_delta = 0.0;
        self.text.clear();
    }

    /// Record a viewport focus change
    ///
    /// Losing focus releases every held key and button.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.held_keys.clear();
            self.left_button = false;
            self.right_button = false;
            self.middle_button = false;
        }
    }

    /// Record a mouse move
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    /// Record a mouse button transition
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_button = pressed,
            MouseButton::Right => self.right_button = pressed,
            MouseButton::Middle => self.middle_button = pressed,
        }
    }

    /// Record a scroll wheel movement
    pub fn handle_scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Record a key transition
    ///
    /// Repeated presses of a key that is already held do not produce a new edge.
    pub fn handle_key(&mut self, key: KeyboardKey, pressed: bool) {
        if pressed {
            if self.held_keys.insert(key) {
                self.pressed_this_tick.insert(key);
            }
        } else if self.held_keys.remove(&key) {
            self.released_this_tick.insert(key);
        }
    }

    /// Record typed text
    pub fn handle_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Whether the key is currently held
    pub fn is_key_held(&self, key: KeyboardKey) -> bool {
        self.held_keys.contains(&key)
    }
}

impl InputSource for InputState {
    fn has_viewport_focus(&self) -> bool {
        self.focused
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    fn mouse_button(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_button,
            MouseButton::Right => self.right_button,
            MouseButton::Middle => self.middle_button,
        }
    }

    fn mouse_scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    fn input_text(&self) -> &str {
        &self.text
    }

    fn key_down(&self, key: KeyboardKey) -> bool {
        self.pressed_this_tick.contains(&key)
    }

    fn key_up(&self, key: KeyboardKey) -> bool {
        self.released_this_tick.contains(&key)
    }
}
