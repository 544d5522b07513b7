use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Pan).unwrap(), "\"pan\"");
    let back: Tool = serde_json::from_str("\"select\"").unwrap();
    assert_eq!(back, Tool::Select);
}

#[test]
fn tool_variants_distinct() {
    assert_ne!(Tool::Select, Tool::Pan);
}

// =============================================================
// Button
// =============================================================

#[test]
fn dom_button_codes() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
    assert_eq!(Button::from_dom(3), None);
}

// =============================================================
// Key
// =============================================================

#[test]
fn space_places() {
    assert!(Key(" ".into()).is_place());
    assert!(!Key("Enter".into()).is_place());
}

#[test]
fn escape_cancels() {
    assert!(Key("Escape".into()).is_cancel());
    assert!(!Key(" ".into()).is_cancel());
}

// =============================================================
// State
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selected_id.is_none());
}

#[test]
fn panning_carries_last_screen() {
    let state = InputState::Panning { last_screen: Vec2::new(1.0, 2.0) };
    let InputState::Panning { last_screen } = state else {
        panic!("expected Panning");
    };
    assert_eq!(last_screen, Vec2::new(1.0, 2.0));
}
