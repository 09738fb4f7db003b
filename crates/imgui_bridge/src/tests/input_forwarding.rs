//! Input reaching the UI library

use super::Harness;
use crate::config::ImGuiPluginConfig;
use crate::foundation::math::Vec2;
use crate::input::{KeyboardKey, MouseButton, UiKey};
use crate::testing::BackendCall;
use crate::ui::InputEvent;

fn focused_harness(config: ImGuiPluginConfig) -> Harness {
    let mut harness = Harness::ready(config);
    harness.input.set_focus(true);
    harness.backend.clear();
    harness
}

fn key_events(events: &[InputEvent]) -> Vec<(UiKey, bool)> {
    events
        .iter()
        .filter_map(|event| match *event {
            InputEvent::Key { key, down } => Some((key, down)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_unfocused_tick_forwards_only_focus_loss() {
    let mut harness = Harness::ready(ImGuiPluginConfig::new());
    harness.input.handle_mouse_move(10.0, 20.0);
    harness.input.handle_mouse_button(MouseButton::Left, true);
    harness.input.handle_scroll(2.0);
    harness.input.handle_text("x");
    harness.input.handle_key(KeyboardKey::Tab, true);
    harness.backend.clear();

    harness.tick();

    assert_eq!(harness.backend.events(), vec![InputEvent::Focus(false)]);
    assert_eq!(harness.backend.count(&BackendCall::NewFrame), 1);
}

#[test]
fn test_input_toggle_off_behaves_as_unfocused() {
    let mut harness = focused_harness(ImGuiPluginConfig::new().with_input(false));
    harness.input.handle_key(KeyboardKey::Escape, true);

    harness.tick();
    assert_eq!(harness.backend.events(), vec![InputEvent::Focus(false)]);

    harness.plugin_mut().set_input_enabled(true);
    harness.backend.clear();
    harness.tick();
    assert_eq!(harness.backend.events()[0], InputEvent::Focus(true));
}

#[test]
fn test_focused_tick_forwards_state_before_the_frame_opens() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());
    harness.input.handle_mouse_move(100.0, 50.0);
    harness.input.handle_mouse_button(MouseButton::Right, true);
    harness.input.handle_scroll(-1.0);
    harness.input.handle_text("a");
    harness.input.handle_key(KeyboardKey::Return, true);

    harness.tick();

    assert_eq!(
        harness.backend.events(),
        vec![
            InputEvent::Focus(true),
            InputEvent::MousePos(Vec2::new(100.0, 50.0)),
            InputEvent::MouseButton { button: MouseButton::Left, down: false },
            InputEvent::MouseButton { button: MouseButton::Right, down: true },
            InputEvent::MouseWheel(-1.0),
            InputEvent::Character(u16::from(b'a')),
            InputEvent::Key { key: UiKey::Enter, down: true },
        ]
    );

    let calls = harness.backend.calls();
    let new_frame = calls.iter().position(|call| *call == BackendCall::NewFrame).unwrap();
    let last_event = calls
        .iter()
        .rposition(|call| matches!(call, BackendCall::Event(_)))
        .unwrap();
    assert!(last_event < new_frame);
}

#[test]
fn test_keys_forward_edges_only() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());

    harness.input.handle_key(KeyboardKey::Tab, true);
    harness.tick();
    assert_eq!(key_events(&harness.backend.events()), vec![(UiKey::Tab, true)]);

    // Held, no transition
    harness.backend.clear();
    harness.tick();
    assert!(key_events(&harness.backend.events()).is_empty());

    harness.backend.clear();
    harness.input.handle_key(KeyboardKey::Tab, false);
    harness.tick();
    assert_eq!(key_events(&harness.backend.events()), vec![(UiKey::Tab, false)]);
}

#[test]
fn test_key_events_follow_table_order() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());
    harness.input.handle_key(KeyboardKey::RightBracket, true);
    harness.input.handle_key(KeyboardKey::Tab, true);
    harness.input.handle_key(KeyboardKey::Colon, true);

    harness.tick();

    assert_eq!(
        key_events(&harness.backend.events()),
        vec![
            (UiKey::Tab, true),
            (UiKey::Semicolon, true),
            (UiKey::RightBracket, true),
        ]
    );
}

#[test]
fn test_host_arrow_left_drives_both_horizontal_arrows() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());
    harness.input.handle_key(KeyboardKey::ArrowLeft, true);
    harness.input.handle_key(KeyboardKey::ArrowRight, true);

    harness.tick();

    assert_eq!(
        key_events(&harness.backend.events()),
        vec![(UiKey::LeftArrow, true), (UiKey::RightArrow, true)]
    );
}

#[test]
fn test_only_first_utf16_unit_of_text_is_forwarded() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());
    harness.input.handle_text("\u{1F600}b");

    harness.tick();

    let characters: Vec<InputEvent> = harness
        .backend
        .events()
        .into_iter()
        .filter(|event| matches!(event, InputEvent::Character(_)))
        .collect();
    assert_eq!(characters, vec![InputEvent::Character(0xD83D)]);
}

#[test]
fn test_no_character_without_text() {
    let mut harness = focused_harness(ImGuiPluginConfig::new());
    harness.tick();

    assert!(!harness
        .backend
        .events()
        .iter()
        .any(|event| matches!(event, InputEvent::Character(_))));
}
