//! Host key to UI key translation table

use super::KeyboardKey;

/// UI library key identifiers the plugin forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    /// Tab
    Tab,
    /// Left arrow
    LeftArrow,
    /// Right arrow
    RightArrow,
    /// Up arrow
    UpArrow,
    /// Down arrow
    DownArrow,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Home
    Home,
    /// End
    End,
    /// Insert
    Insert,
    /// Delete
    Delete,
    /// Backspace
    Backspace,
    /// Space
    Space,
    /// Enter
    Enter,
    /// Escape
    Escape,
    /// `,`
    Comma,
    /// `-`
    Minus,
    /// `.`
    Period,
    /// `/`
    Slash,
    /// `;`
    Semicolon,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
}

/// One (UI key, host key) association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMapping {
    /// Key reported to the UI library
    pub ui: UiKey,
    /// Host key that drives it
    pub host: KeyboardKey,
}

impl KeyMapping {
    const fn new(ui: UiKey, host: KeyboardKey) -> Self {
        Self { ui, host }
    }
}

/// Keys forwarded to the UI every focused tick, in forwarding order
///
/// `RightArrow` is driven by `ArrowLeft` and `ArrowRight` drives nothing.
/// Left untouched until the intended binding is confirmed; see
/// `test_right_arrow_follows_host_arrow_left`.
pub const KEY_MAPPINGS: [KeyMapping; 22] = [
    KeyMapping::new(UiKey::Tab, KeyboardKey::Tab),
    KeyMapping::new(UiKey::LeftArrow, KeyboardKey::ArrowLeft),
    KeyMapping::new(UiKey::RightArrow, KeyboardKey::ArrowLeft),
    KeyMapping::new(UiKey::UpArrow, KeyboardKey::ArrowUp),
    KeyMapping::new(UiKey::DownArrow, KeyboardKey::ArrowDown),
    KeyMapping::new(UiKey::PageUp, KeyboardKey::PageUp),
    KeyMapping::new(UiKey::PageDown, KeyboardKey::PageDown),
    KeyMapping::new(UiKey::Home, KeyboardKey::Home),
    KeyMapping::new(UiKey::End, KeyboardKey::End),
    KeyMapping::new(UiKey::Insert, KeyboardKey::Insert),
    KeyMapping::new(UiKey::Delete, KeyboardKey::Delete),
    KeyMapping::new(UiKey::Backspace, KeyboardKey::Backspace),
    KeyMapping::new(UiKey::Space, KeyboardKey::Spacebar),
    KeyMapping::new(UiKey::Enter, KeyboardKey::Return),
    KeyMapping::new(UiKey::Escape, KeyboardKey::Escape),
    KeyMapping::new(UiKey::Comma, KeyboardKey::Comma),
    KeyMapping::new(UiKey::Minus, KeyboardKey::Minus),
    KeyMapping::new(UiKey::Period, KeyboardKey::Period),
    KeyMapping::new(UiKey::Slash, KeyboardKey::Slash),
    KeyMapping::new(UiKey::Semicolon, KeyboardKey::Colon),
    KeyMapping::new(UiKey::LeftBracket, KeyboardKey::LeftBracket),
    KeyMapping::new(UiKey::RightBracket, KeyboardKey::RightBracket),
];

/// UI keys driven by a host key, in table order
pub fn ui_keys_for(host: KeyboardKey) -> impl Iterator<Item = UiKey> {
    KEY_MAPPINGS
        .iter()
        .filter(move |mapping| mapping.host == host)
        .map(|mapping| mapping.ui)
}
